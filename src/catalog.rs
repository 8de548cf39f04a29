//! Bike Catalog
//!
//! In-memory index over the known bikes, loaded once at startup from the
//! catalog JSON file and read-only afterwards.
//!
//! Records are bucketed by normalized brand. A lookup picks the brand bucket
//! and scans it in catalog order for the first model containing the query,
//! so the result is the same as a linear scan over the whole catalog.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::CatalogError;

/// Front wheel axle type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxleType {
    /// Quick-release skewer (the only type the kit dropouts accept)
    QuickRelease,
    /// Thru-axle fork
    ThruAxle,
    /// Any other value found in the catalog, kept verbatim
    Other(String),
}

impl AxleType {
    pub fn display_text(&self) -> &str {
        match self {
            AxleType::QuickRelease => "QR",
            AxleType::ThruAxle => "ThruAxle",
            AxleType::Other(raw) => raw,
        }
    }
}

impl From<String> for AxleType {
    fn from(raw: String) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(*c, '-' | '_') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "qr" | "quickrelease" => AxleType::QuickRelease,
            "thruaxle" => AxleType::ThruAxle,
            _ => AxleType::Other(raw),
        }
    }
}

impl From<AxleType> for String {
    fn from(axle: AxleType) -> Self {
        axle.display_text().to_string()
    }
}

/// One bike as described in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeRecord {
    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub wheel_axle_front: Option<AxleType>,

    /// Front dropout spacing (mm)
    #[serde(default, deserialize_with = "lenient_mm")]
    pub fork_spacing_mm: Option<u32>,

    #[serde(default, deserialize_with = "lenient_mm")]
    pub down_tube_length_mm: Option<u32>,

    #[serde(default, deserialize_with = "lenient_mm")]
    pub seat_tube_length_mm: Option<u32>,

    /// Informational only; values other than true/false read as absent
    #[serde(default, deserialize_with = "lenient_flag")]
    pub has_bottle_mount: Option<bool>,

    #[serde(default)]
    pub brake_type: Option<String>,
}

/// Whole millimetres, written either as `100` or `100.0`
fn lenient_mm<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(mm) if mm.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&mm) => {
            Ok(Some(mm as u32))
        }
        Some(mm) => Err(D::Error::custom(format!("not a whole millimetre length: {}", mm))),
    }
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// On-disk catalog layout. Anything besides `bikes` is ignored.
///
/// Entries stay untyped here so one bad record is skipped on its own.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    bikes: Vec<serde_json::Value>,
}

/// Lower-case and trim, as applied to both catalog entries and queries
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Read-only bike catalog with a brand index
#[derive(Debug, Clone, Default)]
pub struct BikeCatalog {
    /// All records in catalog order
    records: Vec<BikeRecord>,
    /// Normalized model per record (same indices as `records`)
    models: Vec<String>,
    /// Normalized brand -> record indices, in catalog order
    by_brand: FxHashMap<String, Vec<usize>>,
}

impl BikeCatalog {
    /// Build the index from an ordered list of records
    pub fn new(records: Vec<BikeRecord>) -> Self {
        let mut by_brand: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut models = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            by_brand
                .entry(normalize_identity(&record.brand))
                .or_default()
                .push(idx);
            models.push(normalize_identity(&record.model));
        }

        Self {
            records,
            models,
            by_brand,
        }
    }

    /// Parse a catalog from its JSON text
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let records = file
            .bikes
            .into_iter()
            .enumerate()
            .filter_map(|(idx, entry)| match serde_json::from_value::<BikeRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping catalog entry {}: {}", idx, e);
                    None
                }
            })
            .collect();

        Ok(Self::new(records))
    }

    /// Load the catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load the catalog file, falling back to an empty catalog if it is
    /// missing or malformed
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!("Loaded {} bikes from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                tracing::warn!("Catalog unavailable, using empty catalog: {}", e);
                Self::default()
            }
        }
    }

    /// Find the first bike of `brand` whose model contains `model`.
    /// Both sides are compared trimmed and case-insensitively.
    pub fn lookup(&self, brand: &str, model: &str) -> Option<&BikeRecord> {
        let brand_key = normalize_identity(brand);
        let model_query = normalize_identity(model);

        self.by_brand
            .get(&brand_key)?
            .iter()
            .find(|&&idx| self.models[idx].contains(&model_query))
            .map(|&idx| &self.records[idx])
    }

    /// Case-folded set of every brand in the catalog
    pub fn known_brands(&self) -> FxHashSet<&str> {
        self.by_brand.keys().map(|b| b.as_str()).collect()
    }

    pub fn is_known_brand(&self, brand: &str) -> bool {
        self.by_brand.contains_key(&normalize_identity(brand))
    }

    /// Distinct brands as written in the catalog, sorted
    pub fn all_brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = self
            .records
            .iter()
            .filter(|r| !r.brand.is_empty())
            .map(|r| r.brand.clone())
            .collect();
        brands.sort();
        brands.dedup();
        brands
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
