use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use secrecy::SecretString;
use time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::jwt;
use crate::application::use_cases::bulk_send::{GmailMailer, OutgoingEmail};
use crate::application::use_cases::gmail_grant::GmailGrantUseCases;
use crate::application::validators::is_valid_email;
use crate::domain::entities::user::{GmailGrant, User};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> AppResult<User>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires: NaiveDateTime,
    ) -> AppResult<()>;
    /// Stores the new password hash and clears any pending reset token.
    async fn reset_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()>;
    async fn save_gmail_grant(&self, user_id: Uuid, grant: &GmailGrant) -> AppResult<()>;
    async fn update_gmail_access_token(
        &self,
        user_id: Uuid,
        access_token: &str,
        expiry_date: i64,
    ) -> AppResult<()>;
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct AuthUseCases {
    users: Arc<dyn UserRepo>,
    grants: GmailGrantUseCases,
    mailer: Arc<dyn GmailMailer>,
    jwt_secret: SecretString,
    session_ttl: Duration,
    reset_token_ttl_minutes: i64,
}

impl AuthUseCases {
    pub fn new(
        users: Arc<dyn UserRepo>,
        grants: GmailGrantUseCases,
        mailer: Arc<dyn GmailMailer>,
        jwt_secret: SecretString,
        session_ttl: Duration,
        reset_token_ttl_minutes: i64,
    ) -> Self {
        Self {
            users,
            grants,
            mailer,
            jwt_secret,
            session_ttl,
            reset_token_ttl_minutes,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<User> {
        if name.trim().is_empty() || password.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Name and password are required".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(AppError::InvalidInput("Invalid email format".to_string()));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::InvalidInput("Email already in use".to_string()));
        }

        let password_hash = hash_password(password).await?;
        let user = self.users.create(name, email, &password_hash).await?;
        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Verifies the credentials and issues a session token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        if !verify_password(password, user.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = jwt::issue(
            user.id,
            jwt::PURPOSE_SESSION,
            &self.jwt_secret,
            self.session_ttl,
        )?;
        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Issues a short-lived reset token, stores it on the user row and mails
    /// it out through the user's own Gmail grant. Users without a linked
    /// Gmail account cannot receive the mail, so the request fails for them.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)?;

        let token = jwt::issue(
            user.id,
            jwt::PURPOSE_PASSWORD_RESET,
            &self.jwt_secret,
            Duration::minutes(self.reset_token_ttl_minutes),
        )?;
        let expires =
            Utc::now().naive_utc() + chrono::Duration::minutes(self.reset_token_ttl_minutes);
        self.users.set_reset_token(user.id, &token, expires).await?;

        let ctx = self.grants.resolve_transport(user.id).await?;
        let mail = OutgoingEmail {
            to: user.email.clone(),
            subject: "Password Reset".to_string(),
            text: format!("Use this token to reset your password: {token}"),
            attachment: None,
        };
        self.mailer
            .send(&ctx, &mail)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send reset email: {e}")))?;

        info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    /// Accepts the mailed token and the new password. The token must decode
    /// with the reset purpose, match the stored one and still be within its
    /// window.
    #[instrument(skip(self, token, new_password))]
    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> AppResult<()> {
        if new_password.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "New password must not be empty".to_string(),
            ));
        }

        let claims = jwt::verify(token, jwt::PURPOSE_PASSWORD_RESET, &self.jwt_secret)
            .map_err(|_| invalid_reset_token())?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| invalid_reset_token())?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(invalid_reset_token)?;

        let token_matches = user.reset_token.as_deref() == Some(token);
        let still_valid = user
            .reset_token_expires
            .is_some_and(|expires| expires > Utc::now().naive_utc());
        if !token_matches || !still_valid {
            return Err(invalid_reset_token());
        }

        let password_hash = hash_password(new_password).await?;
        self.users.reset_password(user.id, &password_hash).await?;
        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}

fn invalid_reset_token() -> AppError {
    AppError::InvalidInput("Invalid or expired reset token".to_string())
}

// bcrypt is CPU-bound, so both helpers hop onto the blocking pool.
async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

async fn verify_password(password: &str, hash: String) -> AppResult<bool> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))
}
