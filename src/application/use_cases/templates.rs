use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::template::{Template, TemplateKind};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait TemplateRepo: Send + Sync {
    async fn create(&self, kind: TemplateKind, input: &TemplateInput) -> AppResult<Template>;
    async fn list(&self, kind: TemplateKind) -> AppResult<Vec<Template>>;
    /// Kind-agnostic lookup, used by the bulk sender which accepts any
    /// template id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Template>>;
    async fn find_scoped(&self, kind: TemplateKind, id: Uuid) -> AppResult<Option<Template>>;
    async fn find_global(&self, kind: TemplateKind) -> AppResult<Option<Template>>;
    async fn update(
        &self,
        kind: TemplateKind,
        id: Uuid,
        input: &TemplateInput,
    ) -> AppResult<Option<Template>>;
    async fn delete(&self, kind: TemplateKind, id: Uuid) -> AppResult<bool>;
}

#[derive(Debug, Clone)]
pub struct TemplateInput {
    pub title: String,
    pub subject: String,
    pub body: String,
    pub template_type: String,
    pub placeholders: Vec<String>,
}

/// Marker hints shown to clients when a template is created without any.
pub fn default_placeholders() -> Vec<String> {
    vec![
        "{{name}}".to_string(),
        "{{company}}".to_string(),
        "{{role}}".to_string(),
    ]
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct TemplateUseCases {
    repo: Arc<dyn TemplateRepo>,
}

impl TemplateUseCases {
    pub fn new(repo: Arc<dyn TemplateRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, kind: TemplateKind, input: TemplateInput) -> AppResult<Template> {
        validate_template(&input)?;
        self.repo.create(kind, &input).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, kind: TemplateKind) -> AppResult<Vec<Template>> {
        self.repo.list(kind).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: TemplateKind, id: Uuid) -> AppResult<Template> {
        self.repo
            .find_scoped(kind, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Fetches the collection's designated global template, the one with
    /// template type `global`.
    #[instrument(skip(self))]
    pub async fn global(&self, kind: TemplateKind) -> AppResult<Template> {
        self.repo.find_global(kind).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        kind: TemplateKind,
        id: Uuid,
        input: TemplateInput,
    ) -> AppResult<Template> {
        validate_template(&input)?;
        self.repo
            .update(kind, id, &input)
            .await?
            .ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, kind: TemplateKind, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(kind, id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn validate_template(input: &TemplateInput) -> AppResult<()> {
    if input.title.trim().is_empty()
        || input.subject.trim().is_empty()
        || input.body.trim().is_empty()
        || input.template_type.trim().is_empty()
    {
        return Err(AppError::InvalidInput(
            "Title, subject, body and template type are required".to_string(),
        ));
    }
    Ok(())
}
