use crate::{
    adapters::http::app_state::AppState,
    adapters::persistence::PostgresPersistence,
    infra::{
        attachments::FsAttachmentStore,
        config::AppConfig,
        db::init_db,
        gmail_smtp::XoauthGmailMailer,
        google_oauth::{HttpGoogleOAuthClient, UnconfiguredGoogleOAuth},
    },
    use_cases::{
        auth::{AuthUseCases, UserRepo},
        bulk_send::{AttachmentStore, BulkSendUseCases, GmailMailer},
        contacts::{ContactRepo, ContactUseCases},
        gmail_grant::{GmailGrantUseCases, GoogleOAuthClient},
        templates::{TemplateRepo, TemplateUseCases},
    },
};
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let pool = init_db(&config.database_url).await?;
    let postgres_arc = Arc::new(PostgresPersistence::new(pool));

    let user_repo_arc = postgres_arc.clone() as Arc<dyn UserRepo>;
    let contact_repo_arc = postgres_arc.clone() as Arc<dyn ContactRepo>;
    let template_repo_arc = postgres_arc.clone() as Arc<dyn TemplateRepo>;

    let oauth: Arc<dyn GoogleOAuthClient> = match &config.google {
        Some(google) => Arc::new(HttpGoogleOAuthClient::new(google)),
        None => Arc::new(UnconfiguredGoogleOAuth),
    };

    let mailer = Arc::new(XoauthGmailMailer::new()) as Arc<dyn GmailMailer>;
    let attachments = Arc::new(FsAttachmentStore::new()) as Arc<dyn AttachmentStore>;

    let gmail_grants = GmailGrantUseCases::new(user_repo_arc.clone(), oauth);

    let auth_use_cases = AuthUseCases::new(
        user_repo_arc.clone(),
        gmail_grants.clone(),
        mailer.clone(),
        config.jwt_secret.clone(),
        config.session_ttl,
        config.reset_token_ttl_minutes,
    );

    let contact_use_cases = ContactUseCases::new(contact_repo_arc);
    let template_use_cases = TemplateUseCases::new(template_repo_arc.clone());

    let bulk_send = BulkSendUseCases::new(
        template_repo_arc,
        gmail_grants.clone(),
        mailer,
        attachments,
        Duration::from_millis(config.send_pacing_ms),
    );

    Ok(AppState {
        config: Arc::new(config),
        auth_use_cases: Arc::new(auth_use_cases),
        contact_use_cases: Arc::new(contact_use_cases),
        template_use_cases: Arc::new(template_use_cases),
        gmail_grants: Arc::new(gmail_grants),
        bulk_send: Arc::new(bulk_send),
    })
}

/// Two sinks: a pretty console layer for development and a JSON file the
/// log shipper can tail. Safe to call more than once; later calls no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "outreach_api=debug,tower_http=debug".into());

    let console_layer = fmt::layer()
        .with_target(false) // module paths are noise at this crate's size
        .with_level(true)
        .pretty();

    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        // Request spans carry the request id; keep them on every line.
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
