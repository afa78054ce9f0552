//! Tariff errors
//!
//! Calculation failures are recoverable: they reach the caller as a reason,
//! never as a panic. Load failures only happen once, at startup.

use std::path::PathBuf;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TariffError {
    #[error("No tariff found for province {province}")]
    TariffNotFound { province: String },

    #[error("Region {region} is not configured in the pallet rates")]
    RegionNotConfigured { region: String },

    #[error("No {pallet_type} rate for region {region}")]
    RateNotFound { region: String, pallet_type: String },

    #[error("No usable measure for bucket {bucket}")]
    InsufficientMeasures { bucket: String },
}

impl From<TariffError> for AppError {
    fn from(err: TariffError) -> Self {
        let message = err.to_string();
        match err {
            TariffError::TariffNotFound { province } => {
                AppError::with_message(ErrorCode::TariffNotFound, message)
                    .with_detail("province", province)
            }
            TariffError::RegionNotConfigured { region } => {
                AppError::with_message(ErrorCode::RegionNotConfigured, message)
                    .with_detail("region", region)
            }
            TariffError::RateNotFound {
                region,
                pallet_type,
            } => AppError::with_message(ErrorCode::RateNotFound, message)
                .with_detail("region", region)
                .with_detail("pallet_type", pallet_type),
            TariffError::InsufficientMeasures { bucket } => {
                AppError::with_message(ErrorCode::InsufficientMeasures, message)
                    .with_detail("bucket", bucket)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum TariffLoadError {
    #[error("Failed to read dataset {dataset} from {path}: {source}")]
    Io {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset {dataset} is not valid JSON: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TariffLoadError {
    pub fn dataset(&self) -> &'static str {
        match self {
            Self::Io { dataset, .. } | Self::Parse { dataset, .. } => dataset,
        }
    }
}

impl From<TariffLoadError> for AppError {
    fn from(err: TariffLoadError) -> Self {
        AppError::with_message(ErrorCode::DatasetLoadFailed, err.to_string())
            .with_detail("dataset", err.dataset())
    }
}
