//! Transport Tariff Resolver
//!
//! Freight cost from the region/province keyed rate tables:
//! - [`resolve_bucket`]: province code → groupage bucket
//! - [`lookup_range_price`]: band lookup with fallback to the last band
//! - [`calculate_pallet`]: full-pallet rate × count
//! - [`calculate_groupage`]: competing measures under a selection policy
//!
//! [`TariffStore`] bundles the datasets; [`load_tariffs`] builds it.

mod bucket;
mod error;
mod groupage;
mod insurance;
mod loader;
mod pallet;
mod range;
mod store;

pub use bucket::{normalize_province, resolve_bucket};
pub use error::{TariffError, TariffLoadError};
pub use groupage::{GroupageMeasures, calculate_groupage, collect_candidates, select_candidate};
pub use insurance::{Surcharged, apply_insurance};
pub use loader::{
    ARTICLES_FILE, GEOGRAPHY_FILE, GROUPAGE_RATES_FILE, PALLET_RATES_FILE, load_tariffs,
};
pub use pallet::calculate_pallet;
pub use range::lookup_range_price;
pub use store::{DatasetCounts, TariffStore, logistic_fallback};
