//! Template CRUD routes.
//!
//! Email and cover-letter templates expose the same surface, so one module
//! serves both collections; the collection's kind is injected as a router
//! extension at mount time.

use super::common::*;
use crate::domain::entities::template::TemplateKind;
use crate::use_cases::templates::{TemplateInput, default_placeholders};

pub fn router(kind: TemplateKind) -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route("/global", get(get_global_template))
        .route(
            "/{id}",
            get(get_template).put(update_template).delete(delete_template),
        )
        .layer(Extension(kind))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplatePayload {
    title: String,
    subject: String,
    body: String,
    template_type: String,
    placeholders: Option<Vec<String>>,
}

impl TemplatePayload {
    fn into_input(self) -> TemplateInput {
        TemplateInput {
            title: self.title,
            subject: self.subject,
            body: self.body,
            template_type: self.template_type,
            placeholders: self.placeholders.unwrap_or_else(default_placeholders),
        }
    }
}

/// GET /emailtemplates and /coverlettertemplates
async fn list_templates(
    State(app_state): State<AppState>,
    Extension(kind): Extension<TemplateKind>,
) -> AppResult<impl IntoResponse> {
    let templates = app_state.template_use_cases.list(kind).await?;
    Ok(Json(templates))
}

/// POST /emailtemplates and /coverlettertemplates
async fn create_template(
    State(app_state): State<AppState>,
    Extension(kind): Extension<TemplateKind>,
    Json(payload): Json<TemplatePayload>,
) -> AppResult<impl IntoResponse> {
    let template = app_state
        .template_use_cases
        .create(kind, payload.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET .../global
async fn get_global_template(
    State(app_state): State<AppState>,
    Extension(kind): Extension<TemplateKind>,
) -> AppResult<impl IntoResponse> {
    let template = app_state.template_use_cases.global(kind).await?;
    Ok(Json(template))
}

/// GET .../{id}
async fn get_template(
    State(app_state): State<AppState>,
    Extension(kind): Extension<TemplateKind>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let template = app_state.template_use_cases.get(kind, id).await?;
    Ok(Json(template))
}

/// PUT .../{id}
async fn update_template(
    State(app_state): State<AppState>,
    Extension(kind): Extension<TemplateKind>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TemplatePayload>,
) -> AppResult<impl IntoResponse> {
    let template = app_state
        .template_use_cases
        .update(kind, id, payload.into_input())
        .await?;
    Ok(Json(template))
}

/// DELETE .../{id}
async fn delete_template(
    State(app_state): State<AppState>,
    Extension(kind): Extension<TemplateKind>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.template_use_cases.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
