use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::is_valid_email;
use crate::domain::entities::contact::Contact;

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn create(&self, input: &ContactInput) -> AppResult<Contact>;
    async fn list(&self) -> AppResult<Vec<Contact>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contact>>;
    async fn update(&self, id: Uuid, input: &ContactInput) -> AppResult<Option<Contact>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Debug, Clone)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct ContactUseCases {
    repo: Arc<dyn ContactRepo>,
}

impl ContactUseCases {
    pub fn new(repo: Arc<dyn ContactRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: ContactInput) -> AppResult<Contact> {
        validate_contact(&input)?;
        self.repo.create(&input).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Contact>> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> AppResult<Contact> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, input: ContactInput) -> AppResult<Contact> {
        validate_contact(&input)?;
        self.repo.update(id, &input).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn validate_contact(input: &ContactInput) -> AppResult<()> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.company.trim().is_empty()
        || input.role.trim().is_empty()
    {
        return Err(AppError::InvalidInput(
            "All fields are required: name, email, company, role".to_string(),
        ));
    }
    if !is_valid_email(&input.email) {
        return Err(AppError::InvalidInput("Invalid email format".to_string()));
    }
    Ok(())
}
