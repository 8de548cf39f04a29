//! Verdict Composition
//!
//! Turns a catalog lookup plus engine result into the verdict returned to
//! the storefront. The JSON shape (`status`, `kits`, `recommendation_url`,
//! `notes`) is consumed as-is by the storefront widget.
//!
//! | Lookup    | Engine           | status       | kits | recommendation_url |
//! |-----------|------------------|--------------|------|--------------------|
//! | not found | -                | unknown      | []   | null               |
//! | found     | InsufficientData | unknown      | []   | null               |
//! | found     | Blocked          | incompatible | []   | null               |
//! | found     | Gated(kits)      | compatible   | kits | /products/kit-...  |

pub mod notes;

use serde::{Deserialize, Serialize};

use crate::catalog::BikeRecord;
use crate::engine::EngineResult;
use crate::kits::{Kit, KitTier};

/// Verdict status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Compatible,
    Incompatible,
    Unknown,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Compatible => "compatible",
            VerdictStatus::Incompatible => "incompatible",
            VerdictStatus::Unknown => "unknown",
        }
    }
}

/// Verdict returned for one bike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    pub status: VerdictStatus,
    pub kits: Vec<Kit>,
    /// Only set when `status` is compatible
    pub recommendation_url: Option<String>,
    pub notes: String,
}

impl CompatibilityVerdict {
    fn without_kits(status: VerdictStatus, notes: String) -> Self {
        Self {
            status,
            kits: Vec::new(),
            recommendation_url: None,
            notes,
        }
    }
}

/// Everything known about a requested bike before composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment<'a> {
    /// Brand absent from the catalog
    UnknownBrand,
    /// Brand present, no model matched
    UnknownModel,
    /// Catalog match and its engine result
    Evaluated {
        record: &'a BikeRecord,
        result: EngineResult,
    },
}

/// Build the verdict. `brand`/`model` are the identity as the caller gave it.
pub fn compose(assessment: &Assessment<'_>, brand: &str, model: &str) -> CompatibilityVerdict {
    match assessment {
        Assessment::UnknownBrand => {
            CompatibilityVerdict::without_kits(VerdictStatus::Unknown, notes::unknown_brand(brand, model))
        }
        Assessment::UnknownModel => {
            CompatibilityVerdict::without_kits(VerdictStatus::Unknown, notes::unknown_model(brand, model))
        }
        Assessment::Evaluated { record, result } => match result {
            EngineResult::InsufficientData(_) => {
                CompatibilityVerdict::without_kits(VerdictStatus::Unknown, notes::missing_data())
            }
            EngineResult::Blocked(reasons) => CompatibilityVerdict::without_kits(
                VerdictStatus::Incompatible,
                notes::incompatible(brand, model, reasons),
            ),
            EngineResult::Gated(kits) => {
                let tier = result.tier().unwrap_or(KitTier::Basic);

                let mut parts = vec![notes::compatible(tier)];
                if let Some(brake) = record.brake_type.as_deref().filter(|b| !b.trim().is_empty()) {
                    parts.push(notes::brake_type(brake.trim()));
                }

                CompatibilityVerdict {
                    status: VerdictStatus::Compatible,
                    kits: kits.to_vec(),
                    recommendation_url: kits.first().map(Kit::product_url),
                    notes: parts.join(" "),
                }
            }
        },
    }
}
