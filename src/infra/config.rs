use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

/// Google OAuth2 application credentials.
///
/// Optional as a group: without them the API still serves contacts and
/// templates, and the Gmail routes report that linking is not configured.
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
}

pub struct AppConfig {
    pub jwt_secret: SecretString,
    pub session_ttl: Duration,
    pub reset_token_ttl_minutes: i64,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Delay between consecutive bulk sends, to stay under Gmail's rate limits.
    pub send_pacing_ms: u64,
    pub google: Option<GoogleOAuthConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret: SecretString = SecretString::new(get_env::<String>("JWT_SECRET").into());

        let session_ttl_secs: i64 = get_env_default("SESSION_TTL_SECS", 86_400);
        let reset_token_ttl_minutes: i64 = get_env_default("RESET_TOKEN_TTL_MINUTES", 15);
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3002"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:5005".parse().unwrap());
        let database_url: String = get_env("DATABASE_URL");
        let send_pacing_ms: u64 = get_env_default("SEND_PACING_MS", 1_000);

        // All three Google variables must be present for the integration to
        // switch on; GOOGLE_CLIENT_ID acts as the marker.
        let google = std::env::var("GOOGLE_CLIENT_ID")
            .ok()
            .map(|client_id| GoogleOAuthConfig {
                client_id,
                client_secret: SecretString::new(get_env::<String>("GOOGLE_CLIENT_SECRET").into()),
                redirect_uri: get_env("GOOGLE_REDIRECT_URI"),
            });

        Self {
            jwt_secret,
            session_ttl: Duration::seconds(session_ttl_secs),
            reset_token_ttl_minutes,
            cors_origin,
            bind_addr,
            database_url,
            send_pacing_ms,
            google,
        }
    }
}
