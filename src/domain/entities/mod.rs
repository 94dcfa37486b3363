pub mod contact;
pub mod recipient;
pub mod template;
pub mod user;
