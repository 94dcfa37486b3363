use std::sync::Arc;

use crate::{
    application::use_cases::{
        auth::AuthUseCases, bulk_send::BulkSendUseCases, contacts::ContactUseCases,
        gmail_grant::GmailGrantUseCases, templates::TemplateUseCases,
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub contact_use_cases: Arc<ContactUseCases>,
    pub template_use_cases: Arc<TemplateUseCases>,
    pub gmail_grants: Arc<GmailGrantUseCases>,
    pub bulk_send: Arc<BulkSendUseCases>,
}
