//! Compatibility Analyzer
//!
//! Runs the full pipeline for a bike identity:
//! catalog lookup -> engine evaluation -> verdict composition.

use rayon::prelude::*;

use crate::catalog::BikeCatalog;
use crate::engine::{CompatibilityEngine, EngineResult, MissingField};
use crate::input::BikeQuery;
use crate::verdict::{compose, Assessment, CompatibilityVerdict};

/// Catalog plus engine; shareable across request handlers behind an `Arc`
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    catalog: BikeCatalog,
    engine: CompatibilityEngine,
}

impl Analyzer {
    pub fn new(catalog: BikeCatalog) -> Self {
        Self {
            catalog,
            engine: CompatibilityEngine::new(),
        }
    }

    pub fn catalog(&self) -> &BikeCatalog {
        &self.catalog
    }

    /// Resolve and evaluate without rendering
    pub fn assess(&self, brand: &str, model: &str) -> Assessment<'_> {
        match self.catalog.lookup(brand, model) {
            Some(record) => Assessment::Evaluated {
                record,
                result: self.engine.evaluate(record),
            },
            None if self.catalog.is_known_brand(brand) => Assessment::UnknownModel,
            None => Assessment::UnknownBrand,
        }
    }

    /// Verdict for one bike
    pub fn analyze(&self, brand: &str, model: &str) -> CompatibilityVerdict {
        let assessment = self.assess(brand, model);

        if let Assessment::Evaluated {
            result: EngineResult::InsufficientData(missing),
            ..
        } = &assessment
        {
            let fields: Vec<&str> = missing.iter().map(MissingField::field_name).collect();
            tracing::debug!("Missing data for {} {}: {}", brand, model, fields.join(", "));
        }

        compose(&assessment, brand, model)
    }

    /// Verdicts for many bikes, computed in parallel, in input order
    pub fn analyze_batch(&self, queries: &[BikeQuery]) -> Vec<CompatibilityVerdict> {
        queries
            .par_iter()
            .map(|q| self.analyze(&q.brand, &q.model))
            .collect()
    }
}
