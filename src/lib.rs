//! Bike Kit Compatibility
//!
//! Decides which add-on kits (Cosmopolit, Urban, Explorer) fit a bike,
//! from its front axle, fork spacing and frame tube lengths.
//!
//! - `catalog`: bike records and the brand-indexed lookup
//! - `kits`: product line and gate thresholds
//! - `engine`: data check, basic gate, advanced gate
//! - `verdict`: storefront verdict and its explanatory notes
//! - `analyzer`: lookup -> evaluate -> compose pipeline
//! - `api_server` (feature `api`): Axum HTTP API

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod kits;
pub mod verdict;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use analyzer::Analyzer;
pub use catalog::{AxleType, BikeCatalog, BikeRecord};
pub use config::ServerConfig;
pub use engine::{BlockReason, CompatibilityEngine, EngineResult, MissingField};
pub use error::{CatalogError, InputError};
pub use input::BikeQuery;
pub use kits::{Kit, KitTier};
pub use verdict::{compose, Assessment, CompatibilityVerdict, VerdictStatus};

#[cfg(feature = "api")]
pub use api_server::{bind_listener, create_router, AppState};
