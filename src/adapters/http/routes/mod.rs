pub mod auth;
pub mod bulk_email;
pub mod common;
pub mod contacts;
pub mod templates;

use axum::Router;

use crate::adapters::http::app_state::AppState;
use crate::domain::entities::template::TemplateKind;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/contacts", contacts::router())
        .nest("/emailtemplates", templates::router(TemplateKind::Email))
        .nest(
            "/coverlettertemplates",
            templates::router(TemplateKind::CoverLetter),
        )
        .nest("/bulkemails", bulk_email::router())
}
