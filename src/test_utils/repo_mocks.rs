//! In-memory mock implementations of the persistence traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        auth::UserRepo,
        contacts::{ContactInput, ContactRepo},
        templates::{TemplateInput, TemplateRepo},
    },
    domain::entities::{
        contact::Contact,
        template::{Template, TemplateKind},
        user::{GmailGrant, User},
    },
};

// ============================================================================
// Users
// ============================================================================

/// In-memory implementation of UserRepo for testing.
#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial users for testing.
    pub fn with_users(users: Vec<User>) -> Self {
        let map: HashMap<Uuid, User> = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Mutex::new(map),
        }
    }

    /// Get a user by id (for test assertions).
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();

        // Mirrors the unique index on users.email
        if users.values().any(|u| u.email == email) {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            reset_token: None,
            reset_token_expires: None,
            gmail: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires: chrono::NaiveDateTime,
    ) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(AppError::NotFound)?;

        user.reset_token = Some(token.to_string());
        user.reset_token_expires = Some(expires);
        user.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(())
    }

    async fn reset_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(AppError::NotFound)?;

        user.password_hash = password_hash.to_string();
        user.reset_token = None;
        user.reset_token_expires = None;
        user.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(())
    }

    async fn save_gmail_grant(&self, user_id: Uuid, grant: &GmailGrant) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(AppError::NotFound)?;

        user.gmail = Some(grant.clone());
        user.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(())
    }

    async fn update_gmail_access_token(
        &self,
        user_id: Uuid,
        access_token: &str,
        expiry_date: i64,
    ) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(AppError::NotFound)?;
        let grant = user.gmail.as_mut().ok_or(AppError::NotFound)?;

        grant.access_token = Some(access_token.to_string());
        grant.expiry_date = Some(expiry_date);
        user.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(())
    }
}

// ============================================================================
// Contacts
// ============================================================================

/// In-memory implementation of ContactRepo for testing.
#[derive(Default)]
pub struct InMemoryContactRepo {
    pub contacts: Mutex<HashMap<Uuid, Contact>>,
}

impl InMemoryContactRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial contacts for testing.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let map: HashMap<Uuid, Contact> = contacts.into_iter().map(|c| (c.id, c)).collect();
        Self {
            contacts: Mutex::new(map),
        }
    }
}

#[async_trait]
impl ContactRepo for InMemoryContactRepo {
    async fn create(&self, input: &ContactInput) -> AppResult<Contact> {
        let mut contacts = self.contacts.lock().unwrap();

        // Mirrors the unique index on contacts.email
        if contacts.values().any(|c| c.email == input.email) {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }

        let contact = Contact {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            company: input.company.clone(),
            role: input.role.clone(),
        };

        contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn list(&self) -> AppResult<Vec<Contact>> {
        let mut all: Vec<Contact> = self.contacts.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contact>> {
        Ok(self.contacts.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, id: Uuid, input: &ContactInput) -> AppResult<Option<Contact>> {
        let mut contacts = self.contacts.lock().unwrap();
        let Some(contact) = contacts.get_mut(&id) else {
            return Ok(None);
        };

        contact.name = input.name.clone();
        contact.email = input.email.clone();
        contact.company = input.company.clone();
        contact.role = input.role.clone();

        Ok(Some(contact.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.contacts.lock().unwrap().remove(&id).is_some())
    }
}

// ============================================================================
// Templates
// ============================================================================

/// In-memory implementation of TemplateRepo for testing.
#[derive(Default)]
pub struct InMemoryTemplateRepo {
    pub templates: Mutex<HashMap<Uuid, Template>>,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial templates for testing.
    pub fn with_templates(templates: Vec<Template>) -> Self {
        let map: HashMap<Uuid, Template> = templates.into_iter().map(|t| (t.id, t)).collect();
        Self {
            templates: Mutex::new(map),
        }
    }
}

#[async_trait]
impl TemplateRepo for InMemoryTemplateRepo {
    async fn create(&self, kind: TemplateKind, input: &TemplateInput) -> AppResult<Template> {
        let now = chrono::Utc::now().naive_utc();
        let template = Template {
            id: Uuid::new_v4(),
            kind,
            title: input.title.clone(),
            subject: input.subject.clone(),
            body: input.body.clone(),
            template_type: input.template_type.clone(),
            placeholders: input.placeholders.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.templates
            .lock()
            .unwrap()
            .insert(template.id, template.clone());
        Ok(template)
    }

    async fn list(&self, kind: TemplateKind) -> AppResult<Vec<Template>> {
        let mut matching: Vec<Template> = self
            .templates
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Template>> {
        Ok(self.templates.lock().unwrap().get(&id).cloned())
    }

    async fn find_scoped(&self, kind: TemplateKind, id: Uuid) -> AppResult<Option<Template>> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .get(&id)
            .filter(|t| t.kind == kind)
            .cloned())
    }

    async fn find_global(&self, kind: TemplateKind) -> AppResult<Option<Template>> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .values()
            .find(|t| t.kind == kind && t.template_type == "global")
            .cloned())
    }

    async fn update(
        &self,
        kind: TemplateKind,
        id: Uuid,
        input: &TemplateInput,
    ) -> AppResult<Option<Template>> {
        let mut templates = self.templates.lock().unwrap();
        let Some(template) = templates.get_mut(&id).filter(|t| t.kind == kind) else {
            return Ok(None);
        };

        template.title = input.title.clone();
        template.subject = input.subject.clone();
        template.body = input.body.clone();
        template.template_type = input.template_type.clone();
        template.placeholders = input.placeholders.clone();
        template.updated_at = Some(chrono::Utc::now().naive_utc());

        Ok(Some(template.clone()))
    }

    async fn delete(&self, kind: TemplateKind, id: Uuid) -> AppResult<bool> {
        let mut templates = self.templates.lock().unwrap();
        let matches = templates.get(&id).is_some_and(|t| t.kind == kind);
        if matches {
            templates.remove(&id);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_template, create_test_user};

    #[tokio::test]
    async fn test_duplicate_user_email_fails() {
        let repo = InMemoryUserRepo::new();

        repo.create("Dana", "dana@example.com", "hash").await.unwrap();
        let result = repo.create("Other", "dana@example.com", "hash").await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_save_and_update_grant() {
        let user = create_test_user(|_| {});
        let user_id = user.id;
        let repo = InMemoryUserRepo::with_users(vec![user]);

        let grant = GmailGrant {
            access_token: Some("old".to_string()),
            refresh_token: "refresh".to_string(),
            expiry_date: Some(1),
            address: Some("a@gmail.com".to_string()),
        };
        repo.save_gmail_grant(user_id, &grant).await.unwrap();
        repo.update_gmail_access_token(user_id, "new", 99).await.unwrap();

        let stored = repo.get(user_id).unwrap().gmail.unwrap();
        assert_eq!(stored.access_token.as_deref(), Some("new"));
        assert_eq!(stored.expiry_date, Some(99));
        assert_eq!(stored.refresh_token, "refresh");
    }

    #[tokio::test]
    async fn test_template_lookups_respect_kind() {
        let template = create_test_template(TemplateKind::Email, |_| {});
        let id = template.id;
        let repo = InMemoryTemplateRepo::with_templates(vec![template]);

        assert!(repo.find_by_id(id).await.unwrap().is_some());
        assert!(
            repo.find_scoped(TemplateKind::Email, id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.find_scoped(TemplateKind::CoverLetter, id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!repo.delete(TemplateKind::CoverLetter, id).await.unwrap());
        assert!(repo.delete(TemplateKind::Email, id).await.unwrap());
    }
}
