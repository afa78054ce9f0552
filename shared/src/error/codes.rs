//! Unified error codes for the quote engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Quote errors (order lines, catalog)
//! - 5xxx: Tariff errors (freight lookup)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 4xxx: Quote ====================
    /// Order line not found in the current quote
    QuoteLineNotFound = 4001,
    /// Catalog entry not found
    CatalogEntryNotFound = 4002,
    /// Catalog has no entries
    CatalogEmpty = 4003,

    // ==================== 5xxx: Tariff ====================
    /// No tariff bucket matches the province
    TariffNotFound = 5001,
    /// Region missing from the pallet rate table
    RegionNotConfigured = 5002,
    /// Pallet type has no rate in the region
    RateNotFound = 5003,
    /// Groupage lookup produced no usable candidate
    InsufficientMeasures = 5004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
    /// Tariff dataset could not be loaded
    DatasetLoadFailed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Quote
            ErrorCode::QuoteLineNotFound => "Quote line not found",
            ErrorCode::CatalogEntryNotFound => "Catalog entry not found",
            ErrorCode::CatalogEmpty => "Catalog is empty",

            // Tariff
            ErrorCode::TariffNotFound => "No tariff found for province",
            ErrorCode::RegionNotConfigured => "Region is not configured in the pallet rates",
            ErrorCode::RateNotFound => "No rate for pallet type in region",
            ErrorCode::InsufficientMeasures => "No usable measure for groupage pricing",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::DatasetLoadFailed => "Tariff dataset could not be loaded",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Quote
            4001 => Ok(ErrorCode::QuoteLineNotFound),
            4002 => Ok(ErrorCode::CatalogEntryNotFound),
            4003 => Ok(ErrorCode::CatalogEmpty),

            // Tariff
            5001 => Ok(ErrorCode::TariffNotFound),
            5002 => Ok(ErrorCode::RegionNotConfigured),
            5003 => Ok(ErrorCode::RateNotFound),
            5004 => Ok(ErrorCode::InsufficientMeasures),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::DatasetLoadFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::QuoteLineNotFound.code(), 4001);
        assert_eq!(ErrorCode::TariffNotFound.code(), 5001);
        assert_eq!(ErrorCode::InsufficientMeasures.code(), 5004);
        assert_eq!(ErrorCode::DatasetLoadFailed.code(), 9101);
    }

    #[test]
    fn test_try_from_roundtrips_known_codes() {
        for code in [
            ErrorCode::Success,
            ErrorCode::CatalogEntryNotFound,
            ErrorCode::RegionNotConfigured,
            ErrorCode::RateNotFound,
            ErrorCode::ConfigError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_rejects_unknown() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::RateNotFound).unwrap();
        assert_eq!(json, "5003");
        let code: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(code, ErrorCode::TariffNotFound);
        assert!(serde_json::from_str::<ErrorCode>("7").is_err());
    }
}
