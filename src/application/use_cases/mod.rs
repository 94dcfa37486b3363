pub mod auth;
pub mod bulk_send;
pub mod contacts;
pub mod gmail_grant;
pub mod templates;
