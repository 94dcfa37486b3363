use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::contact::Contact,
    use_cases::contacts::{ContactInput, ContactRepo},
};

#[derive(sqlx::FromRow, Debug)]
pub struct ContactDb {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
}

impl From<ContactDb> for Contact {
    fn from(row: ContactDb) -> Self {
        Contact {
            id: row.id,
            name: row.name,
            email: row.email,
            company: row.company,
            role: row.role,
        }
    }
}

#[async_trait]
impl ContactRepo for PostgresPersistence {
    async fn create(&self, input: &ContactInput) -> AppResult<Contact> {
        let rec = sqlx::query_as::<_, ContactDb>(
            r#"
                INSERT INTO contacts (id, name, email, company, role)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.company)
        .bind(&input.role)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn list(&self) -> AppResult<Vec<Contact>> {
        let recs = sqlx::query_as::<_, ContactDb>("SELECT * FROM contacts ORDER BY name")
            .fetch_all(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(recs.into_iter().map(Contact::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contact>> {
        let rec = sqlx::query_as::<_, ContactDb>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(rec.map(Contact::from))
    }

    async fn update(&self, id: Uuid, input: &ContactInput) -> AppResult<Option<Contact>> {
        let rec = sqlx::query_as::<_, ContactDb>(
            r#"
                UPDATE contacts
                SET name = $2, email = $3, company = $4, role = $5
                WHERE id = $1
                RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.company)
        .bind(&input.role)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(Contact::from))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
