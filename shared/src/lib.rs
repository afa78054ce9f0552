//! Shared types for the quote engine
//!
//! Data models (catalog, order lines, pricing results, tariff datasets) and
//! the unified error system used by the server and its API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
