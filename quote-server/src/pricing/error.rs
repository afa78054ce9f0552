//! Quote session errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Quote line not found: {0}")]
    LineNotFound(String),

    #[error("Catalog entry not found: {0}")]
    CatalogEntryNotFound(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::LineNotFound(id) => AppError::with_message(
                ErrorCode::QuoteLineNotFound,
                format!("Quote line {} not found", id),
            )
            .with_detail("line_id", id),
            SessionError::CatalogEntryNotFound(code) => AppError::with_message(
                ErrorCode::CatalogEntryNotFound,
                format!("Article {} is not in the catalog", code),
            )
            .with_detail("code", code),
        }
    }
}
