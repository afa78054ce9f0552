//! Tariff dataset models
//!
//! Wire shapes of the four freight datasets (articles, geography, pallet
//! rates, groupage rates) and the result of a tariff calculation.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Articles
// ============================================================================

/// Article identifier: datasets mix numeric and textual ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

/// Packaging metadata of an article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackInfo {
    #[serde(default)]
    pub pallet_type: Option<String>,
    /// Length, width, height in centimetres
    #[serde(default)]
    pub dims_cm: Option<[f64; 3]>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<ArticleId>,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub pack: Option<PackInfo>,
}

// ============================================================================
// Geography
// ============================================================================

/// Region name → province codes
pub type Geography = BTreeMap<String, Vec<String>>;

// ============================================================================
// Pallet rates
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PalletMeta {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default, rename = "palletTypes")]
    pub pallet_types: Vec<String>,
    /// Surcharge percentage (3 = 3 %)
    #[serde(default)]
    pub insurance_pct: f64,
}

/// Region → pallet type → flat per-pallet rate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PalletRates {
    #[serde(default)]
    pub meta: PalletMeta,
    #[serde(default)]
    pub rates: BTreeMap<String, BTreeMap<String, f64>>,
}

// ============================================================================
// Groupage rates
// ============================================================================

/// How competing groupage candidates are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum SelectionPolicy {
    /// Highest candidate
    #[default]
    Max,
    /// Lowest candidate
    Min,
    /// First present in linear meters, quintals, pallets order
    First,
}

impl SelectionPolicy {
    /// Lenient parse: anything unrecognised reads as `Max`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "min" => Self::Min,
            "first" => Self::First,
            _ => Self::Max,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
            Self::First => "first",
        }
    }
}

impl From<Option<String>> for SelectionPolicy {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One price band; `max` absent means open-ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBand {
    #[serde(default)]
    pub min: f64,
    #[serde(default = "open_max")]
    pub max: f64,
    pub price: f64,
}

fn open_max() -> f64 {
    f64::MAX
}

impl RangeBand {
    pub fn contains(&self, quantity: f64) -> bool {
        self.min <= quantity && quantity <= self.max
    }
}

/// Groupage rates of one alias group of provinces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffBucket {
    /// Whitespace-separated province aliases, e.g. "MI BG BS"
    pub key: String,
    pub linear_meters: Vec<RangeBand>,
    pub quintals: Vec<RangeBand>,
    pub pallets: Vec<RangeBand>,
}

impl TariffBucket {
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.key.split_whitespace()
    }

    /// `code` must already be trimmed and uppercased
    pub fn matches(&self, code: &str) -> bool {
        self.aliases().any(|alias| alias.eq_ignore_ascii_case(code))
    }
}

#[derive(Default, Serialize, Deserialize)]
struct BucketBands {
    #[serde(default, rename = "linearMeters")]
    linear_meters: Vec<RangeBand>,
    #[serde(default)]
    quintali: Vec<RangeBand>,
    #[serde(default)]
    pallets: Vec<RangeBand>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupageMeta {
    #[serde(default)]
    pub selection_mode: SelectionPolicy,
    /// Surcharge percentage (3 = 3 %)
    #[serde(default)]
    pub insurance_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupageRates {
    #[serde(default)]
    pub meta: GroupageMeta,
    /// Buckets in document order; resolution returns the first match
    #[serde(
        default,
        deserialize_with = "deserialize_buckets",
        serialize_with = "serialize_buckets"
    )]
    pub provinces: Vec<TariffBucket>,
}

fn deserialize_buckets<'de, D>(deserializer: D) -> Result<Vec<TariffBucket>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BucketVisitor;

    impl<'de> Visitor<'de> for BucketVisitor {
        type Value = Vec<TariffBucket>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of province alias lists to band tables")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut buckets = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, bands)) = map.next_entry::<String, BucketBands>()? {
                buckets.push(TariffBucket {
                    key,
                    linear_meters: bands.linear_meters,
                    quintals: bands.quintali,
                    pallets: bands.pallets,
                });
            }
            Ok(buckets)
        }
    }

    deserializer.deserialize_map(BucketVisitor)
}

fn serialize_buckets<S>(buckets: &[TariffBucket], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(buckets.len()))?;
    for bucket in buckets {
        let bands = BucketBands {
            linear_meters: bucket.linear_meters.clone(),
            quintali: bucket.quintals.clone(),
            pallets: bucket.pallets.clone(),
        };
        map.serialize_entry(&bucket.key, &bands)?;
    }
    map.end()
}

// ============================================================================
// Results
// ============================================================================

/// Groupage measure a candidate price was looked up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    LinearMeters,
    Quintals,
    Pallets,
}

impl Measure {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LinearMeters => "linear meters",
            Self::Quintals => "quintals",
            Self::Pallets => "pallets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TariffCandidate {
    pub measure: Measure,
    pub quantity: f64,
    pub price: f64,
}

/// Outcome of a successful tariff calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffQuote {
    /// Final cost, insurance included
    pub cost: f64,
    pub insured: bool,
    pub insurance_amount: f64,
    /// Human-readable summary of the rate(s) used
    pub explanation: String,
    /// Groupage candidates that had a price (empty for pallet quotes)
    #[serde(default)]
    pub candidates: Vec<TariffCandidate>,
}
