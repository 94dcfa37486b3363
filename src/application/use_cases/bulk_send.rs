use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::render::substitute_markers;
use crate::application::use_cases::gmail_grant::{GmailGrantUseCases, SendContext};
use crate::application::use_cases::templates::TemplateRepo;
use crate::domain::entities::recipient::Recipient;

// ============================================================================
// Mailer and Attachment Traits
// ============================================================================

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("smtp error: {0}")]
    Smtp(String),
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachment: Option<EmailAttachment>,
}

/// Submits one message as the linked Gmail account. Returns the provider's
/// response line, e.g. `250 2.0.0 OK`.
#[async_trait]
pub trait GmailMailer: Send + Sync {
    async fn send(&self, ctx: &SendContext, email: &OutgoingEmail) -> Result<String, MailError>;
}

#[async_trait]
pub trait AttachmentStore: Send + Sync {
    async fn resolve(&self, path: &str) -> Option<EmailAttachment>;
}

// ============================================================================
// Send Outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub email: String,
    pub status: SendStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    fn success(email: &str, response: String) -> Self {
        Self {
            email: email.to_string(),
            status: SendStatus::Success,
            response: Some(response),
            error: None,
        }
    }

    fn failure(email: &str, error: String) -> Self {
        Self {
            email: email.to_string(),
            status: SendStatus::Failed,
            response: None,
            error: Some(error),
        }
    }
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct BulkSendUseCases {
    templates: Arc<dyn TemplateRepo>,
    grants: GmailGrantUseCases,
    mailer: Arc<dyn GmailMailer>,
    attachments: Arc<dyn AttachmentStore>,
    pacing: Duration,
}

impl BulkSendUseCases {
    pub fn new(
        templates: Arc<dyn TemplateRepo>,
        grants: GmailGrantUseCases,
        mailer: Arc<dyn GmailMailer>,
        attachments: Arc<dyn AttachmentStore>,
        pacing: Duration,
    ) -> Self {
        Self {
            templates,
            grants,
            mailer,
            attachments,
            pacing,
        }
    }

    /// Sends the template to every recipient, strictly one at a time with a
    /// pacing delay between consecutive submissions. A delivery failure is
    /// recorded in that recipient's outcome and never stops the run; only
    /// the up-front checks (input shape, template, transport) abort the
    /// whole request.
    #[instrument(skip(self, recipients), fields(count = recipients.len()))]
    pub async fn send_bulk(
        &self,
        user_id: Uuid,
        template_id: Uuid,
        recipients: &[Recipient],
    ) -> AppResult<Vec<SendOutcome>> {
        if recipients.is_empty() {
            return Err(AppError::InvalidInput(
                "Recipient list must not be empty".to_string(),
            ));
        }
        if recipients.iter().any(|r| r.email.trim().is_empty()) {
            return Err(AppError::InvalidInput(
                "Every recipient needs an email address".to_string(),
            ));
        }

        let template = self
            .templates
            .find_by_id(template_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let ctx = self.grants.resolve_transport(user_id).await?;

        let mut outcomes = Vec::with_capacity(recipients.len());
        for (i, recipient) in recipients.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            let subject = substitute_markers(&template.subject, recipient);
            let text = substitute_markers(&template.body, recipient);

            let attachment = match &recipient.resume_path {
                Some(path) => {
                    let resolved = self.attachments.resolve(path).await;
                    if resolved.is_none() {
                        warn!(
                            recipient = %recipient.email,
                            path = %path,
                            "Attachment not found, sending without it"
                        );
                    }
                    resolved
                }
                None => None,
            };

            let email = OutgoingEmail {
                to: recipient.email.clone(),
                subject,
                text,
                attachment,
            };

            match self.mailer.send(&ctx, &email).await {
                Ok(response) => {
                    info!(recipient = %recipient.email, "Email sent");
                    outcomes.push(SendOutcome::success(&recipient.email, response));
                }
                Err(err) => {
                    warn!(recipient = %recipient.email, error = %err, "Delivery failed");
                    outcomes.push(SendOutcome::failure(&recipient.email, err.to_string()));
                }
            }
        }

        Ok(outcomes)
    }
}
