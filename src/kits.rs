//! Kit Definitions
//!
//! The product line and its two shared gates. Every kit needs the basic
//! gate (quick-release front axle, 100 mm fork spacing). The advanced tier
//! additionally needs one frame tube long enough to carry the battery pack.
//! Urban and Explorer sit in the same tier and are always offered together.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::AxleType;

/// Front axle type the kit mounting hardware accepts
pub const REQUIRED_AXLE: AxleType = AxleType::QuickRelease;

/// Fork dropout spacing the kit mounting hardware accepts (mm)
pub const REQUIRED_FORK_SPACING_MM: u32 = 100;

/// Minimum down tube or seat tube length for the advanced tier (mm, inclusive)
pub const MIN_BATTERY_TUBE_LENGTH_MM: u32 = 300;

/// Kits in a verdict, in product-line order
pub type KitSet = SmallVec<[Kit; 3]>;

/// Kit tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KitTier {
    /// Basic gate only
    Basic,
    /// Basic gate plus the battery tube length
    Advanced,
}

/// Kit in the product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kit {
    Cosmopolit,
    Urban,
    Explorer,
}

impl Kit {
    /// All kits in product-line order
    pub const ALL: [Kit; 3] = [Kit::Cosmopolit, Kit::Urban, Kit::Explorer];

    pub fn name(&self) -> &'static str {
        match self {
            Kit::Cosmopolit => "Cosmopolit",
            Kit::Urban => "Urban",
            Kit::Explorer => "Explorer",
        }
    }

    pub fn tier(&self) -> KitTier {
        match self {
            Kit::Cosmopolit => KitTier::Basic,
            Kit::Urban | Kit::Explorer => KitTier::Advanced,
        }
    }

    /// Storefront product URL, e.g. `/products/kit-cosmopolit`
    pub fn product_url(&self) -> String {
        format!("/products/kit-{}", url_slug(self.name()))
    }

    /// Kits available up to and including `tier`, in product-line order
    pub fn up_to_tier(tier: KitTier) -> KitSet {
        Kit::ALL.into_iter().filter(|kit| kit.tier() <= tier).collect()
    }
}

/// Lower-case with whitespace runs collapsed to single hyphens
pub fn url_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
