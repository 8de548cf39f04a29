//! Compatibility Engine
//!
//! Evaluates a bike's frame/fork measurements against the kit gates:
//!
//! 1. Data check: axle type, fork spacing and at least one tube length must
//!    be present, otherwise the bike cannot be assessed.
//! 2. Basic gate: QR front axle and 100 mm spacing. Failing it blocks every
//!    kit before any tube length is looked at.
//! 3. Advanced gate: down tube OR seat tube at least 300 mm unlocks the
//!    advanced tier (Urban + Explorer) on top of Cosmopolit.
//!
//! The engine holds no state; evaluations can run in parallel freely.

use rayon::prelude::*;
use smallvec::SmallVec;

use crate::catalog::{AxleType, BikeRecord};
use crate::kits::{
    Kit, KitSet, KitTier, MIN_BATTERY_TUBE_LENGTH_MM, REQUIRED_AXLE, REQUIRED_FORK_SPACING_MM,
};

/// Measurement the engine could not find on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    WheelAxleFront,
    ForkSpacing,
    /// Neither down tube nor seat tube length
    TubeLength,
}

impl MissingField {
    pub fn field_name(&self) -> &'static str {
        match self {
            MissingField::WheelAxleFront => "wheel_axle_front",
            MissingField::ForkSpacing => "fork_spacing_mm",
            MissingField::TubeLength => "down_tube_length_mm/seat_tube_length_mm",
        }
    }
}

/// Why the basic gate failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// Front axle is not a quick release
    Axle(AxleType),
    /// Fork spacing differs from the required width (mm)
    ForkSpacing(u32),
}

/// Engine outcome for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineResult {
    /// Required measurements are absent
    InsufficientData(SmallVec<[MissingField; 3]>),
    /// Basic gate failed; no kit fits
    Blocked(SmallVec<[BlockReason; 2]>),
    /// Basic gate passed; eligible kits in product-line order
    Gated(KitSet),
}

impl EngineResult {
    /// Highest tier reached, if any kit fits
    pub fn tier(&self) -> Option<KitTier> {
        match self {
            EngineResult::Gated(kits) => kits.iter().map(Kit::tier).max(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityEngine;

impl CompatibilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Classify one bike
    pub fn evaluate(&self, record: &BikeRecord) -> EngineResult {
        let missing = missing_fields(record);
        if !missing.is_empty() {
            return EngineResult::InsufficientData(missing);
        }

        let blockers = basic_gate_blockers(record);
        if !blockers.is_empty() {
            return EngineResult::Blocked(blockers);
        }

        let tier = if passes_advanced_gate(record) {
            KitTier::Advanced
        } else {
            KitTier::Basic
        };

        EngineResult::Gated(Kit::up_to_tier(tier))
    }

    /// Classify many bikes in parallel; output order follows input order
    pub fn evaluate_batch(&self, records: &[&BikeRecord]) -> Vec<EngineResult> {
        records.par_iter().map(|record| self.evaluate(record)).collect()
    }
}

fn missing_fields(record: &BikeRecord) -> SmallVec<[MissingField; 3]> {
    let mut missing = SmallVec::new();

    if record.wheel_axle_front.is_none() {
        missing.push(MissingField::WheelAxleFront);
    }
    if record.fork_spacing_mm.is_none() {
        missing.push(MissingField::ForkSpacing);
    }
    if record.down_tube_length_mm.is_none() && record.seat_tube_length_mm.is_none() {
        missing.push(MissingField::TubeLength);
    }

    missing
}

fn basic_gate_blockers(record: &BikeRecord) -> SmallVec<[BlockReason; 2]> {
    let mut blockers = SmallVec::new();

    if let Some(axle) = &record.wheel_axle_front {
        if *axle != REQUIRED_AXLE {
            blockers.push(BlockReason::Axle(axle.clone()));
        }
    }
    if let Some(spacing) = record.fork_spacing_mm {
        if spacing != REQUIRED_FORK_SPACING_MM {
            blockers.push(BlockReason::ForkSpacing(spacing));
        }
    }

    blockers
}

/// One tube long enough for the battery is sufficient
fn passes_advanced_gate(record: &BikeRecord) -> bool {
    [record.down_tube_length_mm, record.seat_tube_length_mm]
        .into_iter()
        .flatten()
        .any(|length| length >= MIN_BATTERY_TUBE_LENGTH_MM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(
        axle: Option<AxleType>,
        spacing: Option<u32>,
        down_tube: Option<u32>,
        seat_tube: Option<u32>,
    ) -> BikeRecord {
        BikeRecord {
            brand: "TestBrand".to_string(),
            model: "TestModel".to_string(),
            wheel_axle_front: axle,
            fork_spacing_mm: spacing,
            down_tube_length_mm: down_tube,
            seat_tube_length_mm: seat_tube,
            ..Default::default()
        }
    }

    fn qr() -> Option<AxleType> {
        Some(AxleType::QuickRelease)
    }

    fn gated(result: EngineResult) -> KitSet {
        match result {
            EngineResult::Gated(kits) => kits,
            other => panic!("expected Gated, got {:?}", other),
        }
    }

    #[test]
    fn test_long_down_tube_unlocks_all_kits() {
        let engine = CompatibilityEngine::new();
        let kits = gated(engine.evaluate(&specs(qr(), Some(100), Some(360), None)));
        assert_eq!(kits.as_slice(), &Kit::ALL);
    }

    #[test]
    fn test_seat_tube_alone_satisfies_advanced_gate() {
        let engine = CompatibilityEngine::new();
        let kits = gated(engine.evaluate(&specs(qr(), Some(100), None, Some(320))));
        assert_eq!(kits.as_slice(), &Kit::ALL);

        // Short down tube does not cancel a long seat tube
        let kits = gated(engine.evaluate(&specs(qr(), Some(100), Some(250), Some(320))));
        assert_eq!(kits.as_slice(), &Kit::ALL);
    }

    #[test]
    fn test_short_tubes_give_basic_kit_only() {
        let engine = CompatibilityEngine::new();
        let result = engine.evaluate(&specs(qr(), Some(100), Some(250), Some(280)));
        assert_eq!(result.tier(), Some(KitTier::Basic));
        assert_eq!(gated(result).as_slice(), &[Kit::Cosmopolit]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let engine = CompatibilityEngine::new();
        let at = engine.evaluate(&specs(qr(), Some(100), Some(300), None));
        let below = engine.evaluate(&specs(qr(), Some(100), Some(299), Some(299)));
        assert_eq!(at.tier(), Some(KitTier::Advanced));
        assert_eq!(below.tier(), Some(KitTier::Basic));
    }

    #[test]
    fn test_thru_axle_is_blocked_regardless_of_tubes() {
        let engine = CompatibilityEngine::new();
        let result = engine.evaluate(&specs(Some(AxleType::ThruAxle), Some(100), Some(350), Some(380)));
        assert_eq!(
            result,
            EngineResult::Blocked(SmallVec::from_vec(vec![BlockReason::Axle(AxleType::ThruAxle)]))
        );
        assert_eq!(result.tier(), None);
    }

    #[test]
    fn test_wrong_spacing_is_blocked() {
        let engine = CompatibilityEngine::new();
        let result = engine.evaluate(&specs(qr(), Some(130), Some(350), None));
        assert_eq!(
            result,
            EngineResult::Blocked(SmallVec::from_vec(vec![BlockReason::ForkSpacing(130)]))
        );
    }

    #[test]
    fn test_both_blockers_reported() {
        let engine = CompatibilityEngine::new();
        let bolt_on = AxleType::Other("Bolt-on".to_string());
        match engine.evaluate(&specs(Some(bolt_on.clone()), Some(110), Some(350), None)) {
            EngineResult::Blocked(reasons) => {
                assert_eq!(
                    reasons.as_slice(),
                    &[BlockReason::Axle(bolt_on), BlockReason::ForkSpacing(110)]
                );
            }
            other => panic!("expected Blocked, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_axle_or_spacing_is_insufficient() {
        let engine = CompatibilityEngine::new();

        match engine.evaluate(&specs(None, Some(100), Some(350), None)) {
            EngineResult::InsufficientData(missing) => {
                assert_eq!(missing.as_slice(), &[MissingField::WheelAxleFront]);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }

        match engine.evaluate(&specs(qr(), None, Some(350), None)) {
            EngineResult::InsufficientData(missing) => {
                assert_eq!(missing.as_slice(), &[MissingField::ForkSpacing]);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tube_data_is_checked_before_basic_gate() {
        let engine = CompatibilityEngine::new();

        let result = engine.evaluate(&specs(qr(), Some(100), None, None));
        assert!(matches!(result, EngineResult::InsufficientData(_)));

        // A thru-axle bike with no tube data is still a data problem
        let result = engine.evaluate(&specs(Some(AxleType::ThruAxle), Some(100), None, None));
        match result {
            EngineResult::InsufficientData(missing) => {
                assert_eq!(missing.as_slice(), &[MissingField::TubeLength]);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_matches_single_evaluation() {
        let engine = CompatibilityEngine::new();
        let records = vec![
            specs(qr(), Some(100), Some(360), None),
            specs(Some(AxleType::ThruAxle), Some(100), Some(350), None),
            specs(qr(), Some(100), None, None),
            specs(qr(), Some(100), Some(200), Some(200)),
        ];
        let refs: Vec<&BikeRecord> = records.iter().collect();

        let batch = engine.evaluate_batch(&refs);
        let single: Vec<EngineResult> = records.iter().map(|r| engine.evaluate(r)).collect();
        assert_eq!(batch, single);
    }
}
