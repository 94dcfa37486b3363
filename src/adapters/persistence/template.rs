use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::template::{Template, TemplateKind},
    use_cases::templates::{TemplateInput, TemplateRepo},
};

#[derive(sqlx::FromRow, Debug)]
pub struct TemplateDb {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub subject: String,
    pub body: String,
    pub template_type: String,
    pub placeholders: Vec<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<TemplateDb> for Template {
    fn from(row: TemplateDb) -> Self {
        Template {
            id: row.id,
            kind: TemplateKind::from_str(&row.kind),
            title: row.title,
            subject: row.subject,
            body: row.body,
            template_type: row.template_type,
            placeholders: row.placeholders,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TemplateRepo for PostgresPersistence {
    async fn create(&self, kind: TemplateKind, input: &TemplateInput) -> AppResult<Template> {
        let rec = sqlx::query_as::<_, TemplateDb>(
            r#"
                INSERT INTO templates (id, kind, title, subject, body, template_type, placeholders)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(kind.as_str())
        .bind(&input.title)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(&input.template_type)
        .bind(&input.placeholders)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn list(&self, kind: TemplateKind) -> AppResult<Vec<Template>> {
        let recs = sqlx::query_as::<_, TemplateDb>(
            "SELECT * FROM templates WHERE kind = $1 ORDER BY created_at DESC",
        )
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(recs.into_iter().map(Template::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Template>> {
        let rec = sqlx::query_as::<_, TemplateDb>("SELECT * FROM templates WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(rec.map(Template::from))
    }

    async fn find_scoped(&self, kind: TemplateKind, id: Uuid) -> AppResult<Option<Template>> {
        let rec = sqlx::query_as::<_, TemplateDb>(
            "SELECT * FROM templates WHERE id = $1 AND kind = $2",
        )
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(Template::from))
    }

    async fn find_global(&self, kind: TemplateKind) -> AppResult<Option<Template>> {
        let rec = sqlx::query_as::<_, TemplateDb>(
            r#"
                SELECT * FROM templates
                WHERE kind = $1 AND template_type = 'global'
                ORDER BY created_at DESC
                LIMIT 1
            "#,
        )
        .bind(kind.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(Template::from))
    }

    async fn update(
        &self,
        kind: TemplateKind,
        id: Uuid,
        input: &TemplateInput,
    ) -> AppResult<Option<Template>> {
        let rec = sqlx::query_as::<_, TemplateDb>(
            r#"
                UPDATE templates
                SET title = $3,
                    subject = $4,
                    body = $5,
                    template_type = $6,
                    placeholders = $7,
                    updated_at = now()
                WHERE id = $1 AND kind = $2
                RETURNING *
            "#,
        )
        .bind(id)
        .bind(kind.as_str())
        .bind(&input.title)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(&input.template_type)
        .bind(&input.placeholders)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(Template::from))
    }

    async fn delete(&self, kind: TemplateKind, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind.as_str())
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
