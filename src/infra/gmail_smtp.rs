//! Gmail SMTP submission using XOAUTH2.
//!
//! Authenticates to smtp.gmail.com with the linked account's address and a
//! fresh OAuth2 access token, so no password ever touches this service.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::use_cases::bulk_send::{GmailMailer, MailError, OutgoingEmail};
use crate::use_cases::gmail_grant::SendContext;

const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Default)]
pub struct XoauthGmailMailer;

impl XoauthGmailMailer {
    pub fn new() -> Self {
        Self
    }
}

fn build_transport(ctx: &SendContext) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(GMAIL_SMTP_HOST)
        .map_err(|e| MailError::Smtp(e.to_string()))?
        .authentication(vec![Mechanism::Xoauth2])
        // XOAUTH2 takes the access token in the password slot
        .credentials(Credentials::new(
            ctx.address.clone(),
            ctx.access_token.clone(),
        ))
        .build();
    Ok(transport)
}

fn build_message(ctx: &SendContext, email: &OutgoingEmail) -> Result<Message, MailError> {
    let from: Mailbox = ctx
        .address
        .parse()
        .map_err(|_| MailError::InvalidAddress(ctx.address.clone()))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone());

    let message = match &email.attachment {
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(e.to_string()))?;
            builder
                .multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(email.text.clone()))
                        .singlepart(
                            Attachment::new(attachment.filename.clone())
                                .body(attachment.content.clone(), content_type),
                        ),
                )
                .map_err(|e| MailError::Build(e.to_string()))?
        }
        None => builder
            .body(email.text.clone())
            .map_err(|e| MailError::Build(e.to_string()))?,
    };

    Ok(message)
}

#[async_trait]
impl GmailMailer for XoauthGmailMailer {
    async fn send(&self, ctx: &SendContext, email: &OutgoingEmail) -> Result<String, MailError> {
        let message = build_message(ctx, email)?;
        let transport = build_transport(ctx)?;
        let response = transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<&str>>().join(" ")
        ))
    }
}
