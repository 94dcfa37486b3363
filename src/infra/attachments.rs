//! Filesystem-backed attachment store.
//!
//! Recipients can point at a resume on local disk; a missing or unreadable
//! file is reported as absent and the dispatcher decides what to do about it.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::use_cases::bulk_send::{AttachmentStore, EmailAttachment};

#[derive(Default)]
pub struct FsAttachmentStore;

impl FsAttachmentStore {
    pub fn new() -> Self {
        Self
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn resolve(&self, path: &str) -> Option<EmailAttachment> {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path, error = %e, "Attachment file not readable");
                return None;
            }
        };

        let path = Path::new(path);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "attachment".to_string());

        Some(EmailAttachment {
            filename,
            content,
            content_type: content_type_for(path).to_string(),
        })
    }
}
