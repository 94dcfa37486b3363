use serde::Deserialize;

/// One row of the recipient list posted to the bulk send endpoint.
/// Everything except the email address is optional; a missing email is
/// deserialized as empty and rejected by validation rather than failing
/// the whole request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipient {
    pub name: Option<String>,
    pub email: String,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub resume_path: Option<String>,
}
