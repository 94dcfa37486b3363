use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::{GmailGrant, User},
    use_cases::auth::UserRepo,
};

// User row as stored in the db. The Gmail grant is flattened into nullable
// columns; a row has a grant exactly when the refresh token is present.
#[derive(sqlx::FromRow, Debug)]
pub struct UserDb {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<NaiveDateTime>,
    pub gmail_access_token: Option<String>,
    pub gmail_refresh_token: Option<String>,
    pub gmail_expiry_date: Option<i64>,
    pub gmail_address: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        let UserDb {
            id,
            name,
            email,
            password_hash,
            reset_token,
            reset_token_expires,
            gmail_access_token,
            gmail_refresh_token,
            gmail_expiry_date,
            gmail_address,
            created_at,
            updated_at,
        } = row;
        let gmail = gmail_refresh_token.map(|refresh_token| GmailGrant {
            access_token: gmail_access_token,
            refresh_token,
            expiry_date: gmail_expiry_date,
            address: gmail_address,
        });
        User {
            id,
            name,
            email,
            password_hash,
            reset_token,
            reset_token_expires,
            gmail,
            created_at,
            updated_at,
        }
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> AppResult<User> {
        let rec = sqlx::query_as::<_, UserDb>(
            r#"
                INSERT INTO users (id, name, email, password_hash)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires: NaiveDateTime,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET reset_token = $2, reset_token_expires = $3, updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn reset_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2,
                    reset_token = NULL,
                    reset_token_expires = NULL,
                    updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn save_gmail_grant(&self, user_id: Uuid, grant: &GmailGrant) -> AppResult<()> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET gmail_access_token = $2,
                    gmail_refresh_token = $3,
                    gmail_expiry_date = $4,
                    gmail_address = $5,
                    updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(&grant.access_token)
        .bind(&grant.refresh_token)
        .bind(grant.expiry_date)
        .bind(&grant.address)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn update_gmail_access_token(
        &self,
        user_id: Uuid,
        access_token: &str,
        expiry_date: i64,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET gmail_access_token = $2, gmail_expiry_date = $3, updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(access_token)
        .bind(expiry_date)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
