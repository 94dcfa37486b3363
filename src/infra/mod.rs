pub mod app;
pub mod attachments;
pub mod config;
pub mod db;
pub mod gmail_smtp;
pub mod google_oauth;
pub mod setup;
