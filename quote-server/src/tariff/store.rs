//! Tariff Store
//!
//! Read-only view over the four freight datasets. Built once by the loader
//! and shared behind an `Arc`; every method takes `&self`.

use serde::Serialize;
use shared::models::{
    Article, Geography, GroupageRates, PalletRates, TariffBucket, TariffQuote,
};

use super::bucket::{normalize_province, resolve_bucket};
use super::error::TariffError;
use super::groupage::{GroupageMeasures, calculate_groupage};
use super::pallet::calculate_pallet;

/// Article codes whose logistics follow another article.
///
/// Matched as a substring of the code + description search text.
const LOGISTIC_FALLBACKS: &[(&str, &str)] = &[("822", "820")];

/// Fallback article code for a search text, if any
pub fn logistic_fallback(query: &str) -> Option<&'static str> {
    let upper = query.to_uppercase();
    LOGISTIC_FALLBACKS
        .iter()
        .find(|(needle, _)| upper.contains(needle))
        .map(|(_, fallback)| *fallback)
}

/// Dataset sizes, reported by the health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub articles: usize,
    pub regions: usize,
    pub pallet_regions: usize,
    pub groupage_buckets: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TariffStore {
    articles: Vec<Article>,
    geography: Geography,
    pallet_rates: PalletRates,
    groupage_rates: GroupageRates,
}

impl TariffStore {
    pub fn new(
        articles: Vec<Article>,
        geography: Geography,
        pallet_rates: PalletRates,
        groupage_rates: GroupageRates,
    ) -> Self {
        Self {
            articles,
            geography,
            pallet_rates,
            groupage_rates,
        }
    }

    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            articles: self.articles.len(),
            regions: self.geography.len(),
            pallet_regions: self.pallet_rates.rates.len(),
            groupage_buckets: self.groupage_rates.provinces.len(),
        }
    }

    /// Region containing the province (case-insensitive)
    pub fn region_of(&self, province: &str) -> Option<&str> {
        let code = normalize_province(province);
        if code.is_empty() {
            return None;
        }
        self.geography
            .iter()
            .find(|(_, provinces)| provinces.iter().any(|p| p.trim().eq_ignore_ascii_case(&code)))
            .map(|(region, _)| region.as_str())
    }

    pub fn resolve_bucket(&self, province: &str) -> Result<&TariffBucket, TariffError> {
        resolve_bucket(&self.groupage_rates.provinces, province)
    }

    /// Article by code, then by the fallback code
    pub fn find_article(&self, code: &str, fallback: Option<&str>) -> Option<&Article> {
        let by_code = |wanted: &str| {
            let wanted = wanted.trim();
            if wanted.is_empty() {
                return None;
            }
            self.articles.iter().find(|a| a.code.trim() == wanted)
        };
        by_code(code).or_else(|| fallback.and_then(by_code))
    }

    pub fn pallet_quote(
        &self,
        region: &str,
        pallet_type: &str,
        pallet_count: f64,
        insured: bool,
    ) -> Result<TariffQuote, TariffError> {
        calculate_pallet(&self.pallet_rates, region, pallet_type, pallet_count, insured)
            .inspect_err(|e| tracing::warn!(error = %e, "Pallet tariff unavailable"))
    }

    /// Pallet quote with the region resolved from the province
    pub fn pallet_quote_for_province(
        &self,
        province: &str,
        pallet_type: &str,
        pallet_count: f64,
        insured: bool,
    ) -> Result<TariffQuote, TariffError> {
        let region = self.region_of(province).ok_or_else(|| {
            let err = TariffError::TariffNotFound {
                province: normalize_province(province),
            };
            tracing::warn!(error = %err, "Province has no region");
            err
        })?;
        self.pallet_quote(region, pallet_type, pallet_count, insured)
    }

    pub fn groupage_quote(
        &self,
        province: &str,
        measures: &GroupageMeasures,
        insured: bool,
    ) -> Result<TariffQuote, TariffError> {
        calculate_groupage(&self.groupage_rates, province, measures, insured)
            .inspect_err(|e| tracing::warn!(error = %e, "Groupage tariff unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ArticleId, PackInfo};

    fn store() -> TariffStore {
        let articles = vec![
            Article {
                id: Some(ArticleId::Number(1)),
                code: "820".to_string(),
                name: "Caldaia 820".to_string(),
                brand: "Acme".to_string(),
                pack: Some(PackInfo {
                    pallet_type: Some("EUR".to_string()),
                    dims_cm: Some([80.0, 120.0, 160.0]),
                    weight_kg: Some(110.0),
                }),
            },
            Article {
                id: None,
                code: "900".to_string(),
                name: String::new(),
                brand: String::new(),
                pack: None,
            },
        ];
        let mut geography = Geography::new();
        geography.insert("Nord".to_string(), vec!["MI".to_string(), "TO".to_string()]);
        geography.insert("Sud".to_string(), vec!["NA".to_string()]);

        let pallet_rates: PalletRates = serde_json::from_str(
            r#"{"meta": {"insurance_pct": 3}, "rates": {"Nord": {"EUR": 45.0}}}"#,
        )
        .unwrap();

        TariffStore::new(articles, geography, pallet_rates, GroupageRates::default())
    }

    #[test]
    fn test_region_of() {
        let store = store();
        assert_eq!(store.region_of("mi"), Some("Nord"));
        assert_eq!(store.region_of(" NA "), Some("Sud"));
        assert_eq!(store.region_of("PA"), None);
        assert_eq!(store.region_of(""), None);
    }

    #[test]
    fn test_find_article_with_fallback() {
        let store = store();
        assert_eq!(store.find_article("900", None).unwrap().code, "900");
        assert_eq!(store.find_article("822", Some("820")).unwrap().code, "820");
        assert!(store.find_article("822", None).is_none());
        assert!(store.find_article("", Some("")).is_none());
    }

    #[test]
    fn test_logistic_fallback() {
        assert_eq!(logistic_fallback("822 Caldaia murale"), Some("820"));
        assert_eq!(logistic_fallback("X-822B"), Some("820"));
        assert_eq!(logistic_fallback("900 Boiler"), None);
    }

    #[test]
    fn test_pallet_quote_for_province() {
        let store = store();
        let quote = store.pallet_quote_for_province("to", "EUR", 3.0, false).unwrap();
        assert_eq!(quote.cost, 135.0);

        // region known to geography but missing from the rates
        assert_eq!(
            store.pallet_quote_for_province("NA", "EUR", 1.0, false),
            Err(TariffError::RegionNotConfigured {
                region: "Sud".to_string()
            })
        );
        assert!(matches!(
            store.pallet_quote_for_province("PA", "EUR", 1.0, false),
            Err(TariffError::TariffNotFound { .. })
        ));
    }

    #[test]
    fn test_counts() {
        let counts = store().counts();
        assert_eq!(counts.articles, 2);
        assert_eq!(counts.regions, 2);
        assert_eq!(counts.pallet_regions, 1);
        assert_eq!(counts.groupage_buckets, 0);
    }
}
