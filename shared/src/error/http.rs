//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::QuoteLineNotFound
            | Self::CatalogEntryNotFound
            | Self::TariffNotFound => StatusCode::NOT_FOUND,

            // 422 Unprocessable: the request is well formed but the
            // tariff tables cannot price it
            Self::RegionNotConfigured | Self::RateNotFound | Self::InsufficientMeasures => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 503 Service Unavailable (datasets not loaded yet)
            Self::DatasetLoadFailed => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
