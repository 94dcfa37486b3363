//! Gmail connection and bulk-send routes.

use super::common::*;
use crate::domain::entities::recipient::Recipient;
use crate::use_cases::bulk_send::SendOutcome;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth-url", get(get_auth_url))
        .route("/callback", get(oauth_callback))
        .route("/send-bulk-emails", post(send_bulk_emails))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUrlQuery {
    user_id: Uuid,
}

#[derive(Serialize)]
struct AuthUrlResponse {
    url: String,
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: String,
    state: String,
}

#[derive(Serialize)]
struct CallbackResponse {
    success: bool,
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendBulkPayload {
    user_id: Uuid,
    email_template_id: Uuid,
    recipients: Vec<Recipient>,
}

#[derive(Serialize)]
struct SendBulkResponse {
    message: String,
    results: Vec<SendOutcome>,
}

/// GET /bulkemails/auth-url
async fn get_auth_url(
    State(app_state): State<AppState>,
    Query(query): Query<AuthUrlQuery>,
) -> AppResult<impl IntoResponse> {
    let url = app_state.gmail_grants.authorization_url(query.user_id)?;
    Ok(Json(AuthUrlResponse { url }))
}

/// GET /bulkemails/callback
///
/// Google redirects here after consent. The state parameter carries the id
/// of the user who started the flow.
async fn oauth_callback(
    State(app_state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<impl IntoResponse> {
    let user_id = Uuid::parse_str(&query.state)
        .map_err(|_| AppError::InvalidInput("state is not a valid user id".to_string()))?;
    let email = app_state
        .gmail_grants
        .complete_authorization(user_id, &query.code)
        .await?;
    Ok(Json(CallbackResponse {
        success: true,
        email,
    }))
}

/// POST /bulkemails/send-bulk-emails
async fn send_bulk_emails(
    State(app_state): State<AppState>,
    Json(payload): Json<SendBulkPayload>,
) -> AppResult<impl IntoResponse> {
    let results = app_state
        .bulk_send
        .send_bulk(payload.user_id, payload.email_template_id, &payload.recipients)
        .await?;
    Ok(Json(SendBulkResponse {
        message: "Emails processed".to_string(),
        results,
    }))
}
