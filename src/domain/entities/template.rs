use serde::Serialize;
use uuid::Uuid;

/// The two template collections share one table and one shape; the kind
/// keeps their id spaces separate at the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Email,
    CoverLetter,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Email => "email",
            TemplateKind::CoverLetter => "cover_letter",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "cover_letter" => TemplateKind::CoverLetter,
            _ => TemplateKind::Email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub kind: TemplateKind,
    pub title: String,
    pub subject: String,
    pub body: String,
    pub template_type: String,
    pub placeholders: Vec<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}
