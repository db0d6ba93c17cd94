//! Mockcode API Library
//!
//! This crate provides the HTTP handlers, the generation pipeline service and
//! application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
