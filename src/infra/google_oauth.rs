//! Google OAuth2 client for the Gmail send scope.
//!
//! Implements the three calls the grant lifecycle needs: building the consent
//! URL, exchanging the authorization code and refreshing a stale access
//! token, plus the userinfo lookup that tells us which address was linked.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::error;

use crate::app_error::{AppError, AppResult};
use crate::infra::config::GoogleOAuthConfig;
use crate::use_cases::gmail_grant::{GoogleOAuthClient, GoogleTokens, RefreshedAccess};

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Sending mail plus reading the account's own address.
const SCOPES: &str =
    "https://www.googleapis.com/auth/gmail.send https://www.googleapis.com/auth/userinfo.email";

/// Fallback access-token lifetime when Google omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3_600;

const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Google's token and userinfo endpoints answer in seconds; anything slower
/// should fail the request rather than hang a send batch.
fn http_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    email: String,
}

pub struct HttpGoogleOAuthClient {
    client: Client,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
}

impl HttpGoogleOAuthClient {
    pub fn new(config: &GoogleOAuthConfig) -> Self {
        Self {
            client: http_client(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }
}

#[async_trait]
impl GoogleOAuthClient for HttpGoogleOAuthClient {
    fn authorization_url(&self, state: &str) -> AppResult<String> {
        let mut auth_url = url::Url::parse(AUTH_ENDPOINT)
            .map_err(|e| AppError::Internal(format!("Invalid OAuth endpoint: {e}")))?;
        auth_url
            .query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            // offline + consent is what makes Google hand out a refresh token
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state);
        Ok(auth_url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> AppResult<GoogleTokens> {
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", &self.client_id),
                ("client_secret", self.client_secret.expose_secret()),
                ("redirect_uri", &self.redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Google token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Google code exchange rejected");
            return Err(AppError::InvalidInput(
                "Failed to authenticate with Google".to_string(),
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse token response: {e}")))?;

        let now_ms = Utc::now().timestamp_millis();
        Ok(GoogleTokens {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expiry_date: token.expires_in.map(|secs| now_ms + secs * 1_000),
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<RefreshedAccess> {
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Refresh(format!("Google token refresh failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Google token refresh rejected");
            // Typically means the user revoked the app's access; they have to
            // re-run the consent flow.
            return Err(AppError::Refresh(format!(
                "Google rejected the refresh token ({status})"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Refresh(format!("Failed to parse refresh response: {e}")))?;

        let expires_in = token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        Ok(RefreshedAccess {
            access_token: token.access_token,
            expiry_date: Utc::now().timestamp_millis() + expires_in * 1_000,
        })
    }

    async fn fetch_gmail_address(&self, access_token: &str) -> AppResult<String> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Google userinfo request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(
                "Failed to fetch the linked Gmail address".to_string(),
            ));
        }

        let info: UserInfoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse userinfo response: {e}")))?;
        Ok(info.email)
    }
}

/// Stand-in used when the Google credentials are absent from the
/// environment. Every call fails with the same configuration error, so the
/// rest of the API keeps working.
pub struct UnconfiguredGoogleOAuth;

impl UnconfiguredGoogleOAuth {
    fn not_configured<T>() -> AppResult<T> {
        Err(AppError::Internal(
            "Google OAuth2 credentials are not configured".to_string(),
        ))
    }
}

#[async_trait]
impl GoogleOAuthClient for UnconfiguredGoogleOAuth {
    fn authorization_url(&self, _state: &str) -> AppResult<String> {
        Self::not_configured()
    }

    async fn exchange_code(&self, _code: &str) -> AppResult<GoogleTokens> {
        Self::not_configured()
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> AppResult<RefreshedAccess> {
        Self::not_configured()
    }

    async fn fetch_gmail_address(&self, _access_token: &str) -> AppResult<String> {
        Self::not_configured()
    }
}
