//! Tariff dataset loader
//!
//! The four datasets are independent files read concurrently; the store is
//! only built once every one of them has loaded and parsed.

use std::path::Path;

use serde::de::DeserializeOwned;
use shared::models::{Article, Geography, GroupageRates, PalletRates};

use super::error::TariffLoadError;
use super::store::TariffStore;

pub const ARTICLES_FILE: &str = "articles.json";
pub const GEOGRAPHY_FILE: &str = "geo_provinces.json";
pub const PALLET_RATES_FILE: &str = "pallet_rates_by_region.json";
pub const GROUPAGE_RATES_FILE: &str = "groupage_rates.json";

/// Load the four datasets from `dir`
pub async fn load_tariffs(dir: impl AsRef<Path>) -> Result<TariffStore, TariffLoadError> {
    let dir = dir.as_ref();

    let (articles, geography, pallet_rates, groupage_rates) = tokio::try_join!(
        read_dataset::<Vec<Article>>(dir, ARTICLES_FILE),
        read_dataset::<Geography>(dir, GEOGRAPHY_FILE),
        read_dataset::<PalletRates>(dir, PALLET_RATES_FILE),
        read_dataset::<GroupageRates>(dir, GROUPAGE_RATES_FILE),
    )?;

    let store = TariffStore::new(articles, geography, pallet_rates, groupage_rates);
    let counts = store.counts();
    tracing::info!(
        dir = %dir.display(),
        articles = counts.articles,
        regions = counts.regions,
        pallet_regions = counts.pallet_regions,
        groupage_buckets = counts.groupage_buckets,
        "Tariff datasets loaded"
    );
    Ok(store)
}

async fn read_dataset<T: DeserializeOwned>(
    dir: &Path,
    dataset: &'static str,
) -> Result<T, TariffLoadError> {
    let path = dir.join(dataset);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| TariffLoadError::Io {
            dataset,
            path: path.clone(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| TariffLoadError::Parse { dataset, source })
}
