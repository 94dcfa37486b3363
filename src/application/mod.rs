pub mod app_error;
pub mod jwt;
pub mod render;
pub mod use_cases;
pub mod validators;
