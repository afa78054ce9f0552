//! Province Bucket Resolver

use shared::models::TariffBucket;

use super::error::TariffError;

/// Canonical form of a province code: trimmed, uppercase
pub fn normalize_province(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// First bucket whose alias list contains the province
pub fn resolve_bucket<'a>(
    buckets: &'a [TariffBucket],
    province: &str,
) -> Result<&'a TariffBucket, TariffError> {
    let code = normalize_province(province);
    if code.is_empty() {
        return Err(TariffError::TariffNotFound { province: code });
    }
    buckets
        .iter()
        .find(|bucket| bucket.matches(&code))
        .ok_or(TariffError::TariffNotFound { province: code })
}
