use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::use_cases::auth::UserRepo;
use crate::domain::entities::user::GmailGrant;

// ============================================================================
// OAuth Client Trait
// ============================================================================

/// Token payload returned by the authorization-code exchange. Google only
/// includes a refresh token when the consent screen was actually shown.
#[derive(Debug, Clone)]
pub struct GoogleTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix epoch milliseconds.
    pub expiry_date: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct RefreshedAccess {
    pub access_token: String,
    /// Unix epoch milliseconds.
    pub expiry_date: i64,
}

#[async_trait]
pub trait GoogleOAuthClient: Send + Sync {
    fn authorization_url(&self, state: &str) -> AppResult<String>;
    async fn exchange_code(&self, code: &str) -> AppResult<GoogleTokens>;
    async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<RefreshedAccess>;
    async fn fetch_gmail_address(&self, access_token: &str) -> AppResult<String>;
}

// ============================================================================
// Use Cases
// ============================================================================

/// Everything the SMTP layer needs to submit mail as the linked account.
#[derive(Debug, Clone)]
pub struct SendContext {
    pub address: String,
    pub access_token: String,
}

#[derive(Clone)]
pub struct GmailGrantUseCases {
    users: Arc<dyn UserRepo>,
    oauth: Arc<dyn GoogleOAuthClient>,
}

impl GmailGrantUseCases {
    pub fn new(users: Arc<dyn UserRepo>, oauth: Arc<dyn GoogleOAuthClient>) -> Self {
        Self { users, oauth }
    }

    /// Builds the Google consent URL for the given user. The user id rides
    /// along as the opaque `state` parameter and comes back on the callback.
    pub fn authorization_url(&self, user_id: Uuid) -> AppResult<String> {
        self.oauth.authorization_url(&user_id.to_string())
    }

    /// Finishes the consent flow: exchanges the authorization code, resolves
    /// the Gmail address and persists the grant. Returns the linked address.
    #[instrument(skip(self, code))]
    pub async fn complete_authorization(&self, user_id: Uuid, code: &str) -> AppResult<String> {
        let tokens = self.oauth.exchange_code(code).await?;
        let Some(refresh_token) = tokens.refresh_token else {
            // Without a refresh token the grant would die with the first
            // access token. Nothing is persisted in that case.
            return Err(AppError::InvalidInput(
                "Google returned no refresh token; remove the app's access and try again"
                    .to_string(),
            ));
        };

        let address = self.oauth.fetch_gmail_address(&tokens.access_token).await?;
        let grant = GmailGrant {
            access_token: Some(tokens.access_token),
            refresh_token,
            expiry_date: tokens.expiry_date,
            address: Some(address.clone()),
        };
        self.users.save_gmail_grant(user_id, &grant).await?;

        info!(user_id = %user_id, address = %address, "Gmail account linked");
        Ok(address)
    }

    /// Resolves a ready-to-use send context for the user, refreshing the
    /// access token first when it is stale. A still-valid token is returned
    /// as stored, without touching Google.
    #[instrument(skip(self))]
    pub async fn resolve_transport(&self, user_id: Uuid) -> AppResult<SendContext> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let Some(grant) = user.gmail else {
            return Err(AppError::Unauthenticated);
        };
        let Some(address) = grant.address.clone() else {
            return Err(AppError::Unauthenticated);
        };

        let now_ms = Utc::now().timestamp_millis();
        let access_token = match grant.usable_access_token(now_ms) {
            Some(token) => token.to_string(),
            None => {
                debug!(user_id = %user_id, "Access token stale, refreshing");
                let refreshed = self.oauth.refresh_access_token(&grant.refresh_token).await?;
                self.users
                    .update_gmail_access_token(
                        user_id,
                        &refreshed.access_token,
                        refreshed.expiry_date,
                    )
                    .await?;
                refreshed.access_token
            }
        };

        Ok(SendContext {
            address,
            access_token,
        })
    }
}
