//! Bulk-outreach email backend: contact and template CRUD plus
//! Gmail-authenticated bulk sending over a per-user OAuth2 grant.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

// Re-exports for shorter use statements.
pub use application::*;
pub use domain::*;
