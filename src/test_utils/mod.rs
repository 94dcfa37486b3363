//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository implementations for mocking persistence
//! - Scripted mocks for the Google OAuth client and the Gmail mailer
//! - A builder for constructing `AppState` with test dependencies

mod gmail_mocks;
mod repo_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use gmail_mocks::*;
pub use repo_mocks::*;
