use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<chrono::NaiveDateTime>,
    pub gmail: Option<GmailGrant>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Google credentials captured when the user links their Gmail account.
/// The refresh token is the durable part; access tokens are short-lived
/// and replaced on refresh.
#[derive(Debug, Clone)]
pub struct GmailGrant {
    pub access_token: Option<String>,
    pub refresh_token: String,
    /// Unix epoch milliseconds.
    pub expiry_date: Option<i64>,
    pub address: Option<String>,
}

impl GmailGrant {
    /// Returns the stored access token if it is still usable: present,
    /// non-empty and not past its expiry. An absent expiry counts as
    /// expired, forcing a refresh before the token is trusted.
    pub fn usable_access_token(&self, now_ms: i64) -> Option<&str> {
        let token = self.access_token.as_deref().filter(|t| !t.is_empty())?;
        match self.expiry_date {
            Some(expiry) if now_ms < expiry => Some(token),
            _ => None,
        }
    }
}
