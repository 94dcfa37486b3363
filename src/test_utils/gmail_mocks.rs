//! Scripted mocks for the Google OAuth client, the SMTP mailer and the
//! attachment store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        bulk_send::{AttachmentStore, EmailAttachment, GmailMailer, MailError, OutgoingEmail},
        gmail_grant::{GoogleOAuthClient, GoogleTokens, RefreshedAccess, SendContext},
    },
};

// ============================================================================
// OAuth
// ============================================================================

/// Scripted OAuth client: responses are set up front, calls are counted.
/// Unscripted exchange and refresh calls fail the way the real client does
/// when Google rejects the request.
#[derive(Default)]
pub struct ScriptedGoogleOAuth {
    exchange: Mutex<Option<GoogleTokens>>,
    refresh: Mutex<Option<RefreshedAccess>>,
    gmail_address: Mutex<Option<String>>,
    pub refresh_calls: AtomicUsize,
}

impl ScriptedGoogleOAuth {
    pub fn set_exchange(&self, tokens: GoogleTokens) {
        *self.exchange.lock().unwrap() = Some(tokens);
    }

    pub fn set_refresh(&self, refreshed: RefreshedAccess) {
        *self.refresh.lock().unwrap() = Some(refreshed);
    }

    pub fn set_gmail_address(&self, address: &str) {
        *self.gmail_address.lock().unwrap() = Some(address.to_string());
    }
}

#[async_trait]
impl GoogleOAuthClient for ScriptedGoogleOAuth {
    fn authorization_url(&self, state: &str) -> AppResult<String> {
        Ok(format!(
            "https://accounts.google.com/o/oauth2/v2/auth?state={state}"
        ))
    }

    async fn exchange_code(&self, _code: &str) -> AppResult<GoogleTokens> {
        self.exchange.lock().unwrap().clone().ok_or_else(|| {
            AppError::InvalidInput("Failed to authenticate with Google".to_string())
        })
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> AppResult<RefreshedAccess> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::Refresh("scripted refresh failure".to_string()))
    }

    async fn fetch_gmail_address(&self, _access_token: &str) -> AppResult<String> {
        Ok(self
            .gmail_address
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "linked@gmail.com".to_string()))
    }
}

// ============================================================================
// Mailer
// ============================================================================

/// One message accepted by the capturing mailer, with the send context it
/// was submitted under.
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub from: String,
    pub access_token: String,
    pub email: OutgoingEmail,
}

/// Mailer that records accepted messages and can be told to bounce
/// specific recipient addresses.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<CapturedEmail>>,
    reject: Mutex<HashSet<String>>,
}

impl CapturingMailer {
    /// Make future sends to this address fail with an SMTP rejection.
    pub fn reject_address(&self, address: &str) {
        self.reject.lock().unwrap().insert(address.to_string());
    }

    /// Get all accepted messages (for test assertions).
    pub fn captured(&self) -> Vec<CapturedEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl GmailMailer for CapturingMailer {
    async fn send(&self, ctx: &SendContext, email: &OutgoingEmail) -> Result<String, MailError> {
        if self.reject.lock().unwrap().contains(&email.to) {
            return Err(MailError::Smtp(format!(
                "550 5.1.1 rejected recipient {}",
                email.to
            )));
        }

        self.sent.lock().unwrap().push(CapturedEmail {
            from: ctx.address.clone(),
            access_token: ctx.access_token.clone(),
            email: email.clone(),
        });
        Ok("250 2.0.0 OK".to_string())
    }
}

// ============================================================================
// Attachments
// ============================================================================

/// Attachment store backed by a path-to-attachment map; anything not
/// inserted resolves to None like a missing file would.
#[derive(Default)]
pub struct StaticAttachmentStore {
    files: Mutex<HashMap<String, EmailAttachment>>,
}

impl StaticAttachmentStore {
    pub fn insert(&self, path: &str, attachment: EmailAttachment) {
        self.files.lock().unwrap().insert(path.to_string(), attachment);
    }
}

#[async_trait]
impl AttachmentStore for StaticAttachmentStore {
    async fn resolve(&self, path: &str) -> Option<EmailAttachment> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SendContext {
        SendContext {
            address: "sender@gmail.com".to_string(),
            access_token: "ya29.token".to_string(),
        }
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Subject".to_string(),
            text: "Body".to_string(),
            attachment: None,
        }
    }

    #[tokio::test]
    async fn test_mailer_captures_accepted_sends() {
        let mailer = CapturingMailer::default();

        let response = mailer.send(&ctx(), &email("a@example.com")).await.unwrap();

        assert_eq!(response, "250 2.0.0 OK");
        let captured = mailer.captured();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].from, "sender@gmail.com");
        assert_eq!(captured[0].email.to, "a@example.com");
    }

    #[tokio::test]
    async fn test_mailer_bounces_rejected_addresses() {
        let mailer = CapturingMailer::default();
        mailer.reject_address("bounce@example.com");

        let err = mailer
            .send(&ctx(), &email("bounce@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, MailError::Smtp(_)));
        assert!(mailer.captured().is_empty());
    }

    #[tokio::test]
    async fn test_unscripted_refresh_fails_and_is_counted() {
        let oauth = ScriptedGoogleOAuth::default();

        let err = oauth.refresh_access_token("1//refresh").await.unwrap_err();

        assert!(matches!(err, AppError::Refresh(_)));
        assert_eq!(oauth.refresh_calls.load(Ordering::SeqCst), 1);
    }
}
