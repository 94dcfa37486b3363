//! Address-book CRUD routes.

use super::common::*;
use crate::use_cases::contacts::ContactInput;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route(
            "/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

#[derive(Deserialize)]
struct ContactPayload {
    name: String,
    email: String,
    company: String,
    role: String,
}

impl ContactPayload {
    fn into_input(self) -> ContactInput {
        ContactInput {
            name: self.name,
            email: self.email,
            company: self.company,
            role: self.role,
        }
    }
}

/// GET /contacts
async fn list_contacts(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let contacts = app_state.contact_use_cases.list().await?;
    Ok(Json(contacts))
}

/// POST /contacts
async fn create_contact(
    State(app_state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> AppResult<impl IntoResponse> {
    let contact = app_state
        .contact_use_cases
        .create(payload.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /contacts/{id}
async fn get_contact(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let contact = app_state.contact_use_cases.get(id).await?;
    Ok(Json(contact))
}

/// PUT /contacts/{id}
async fn update_contact(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContactPayload>,
) -> AppResult<impl IntoResponse> {
    let contact = app_state
        .contact_use_cases
        .update(id, payload.into_input())
        .await?;
    Ok(Json(contact))
}

/// DELETE /contacts/{id}
async fn delete_contact(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.contact_use_cases.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
