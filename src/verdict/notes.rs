//! Verdict note fragments
//!
//! Customer-facing explanation text, in French to match the storefront.
//! Each function returns one fragment; `compose` joins them with spaces.

use crate::catalog::AxleType;
use crate::engine::BlockReason;
use crate::kits::{KitTier, REQUIRED_FORK_SPACING_MM};

pub fn unknown_brand(brand: &str, model: &str) -> String {
    format!(
        "Marque {} ou modèle {} non reconnu dans notre base de données. \
         Contactez notre équipe pour une analyse personnalisée.",
        brand, model
    )
}

pub fn unknown_model(brand: &str, model: &str) -> String {
    format!(
        "Nous connaissons la marque {} mais pas ce modèle spécifique ({}). \
         Notre équipe peut vous aider à déterminer la compatibilité.",
        brand, model
    )
}

pub fn missing_data() -> String {
    "Certaines données sont manquantes, contactez notre équipe.".to_string()
}

/// Incompatibility note naming every blocking reason
pub fn incompatible(brand: &str, model: &str, reasons: &[BlockReason]) -> String {
    let details: Vec<String> = reasons.iter().map(block_reason).collect();

    if details.is_empty() {
        return format!(
            "Le {} {} n'est pas compatible avec nos kits actuels.",
            brand, model
        );
    }

    format!(
        "Le {} {} n'est pas compatible avec nos kits actuels : {}.",
        brand,
        model,
        details.join(" et ")
    )
}

fn block_reason(reason: &BlockReason) -> String {
    match reason {
        BlockReason::Axle(AxleType::ThruAxle) => {
            "la roue avant est montée sur axe traversant (blocage rapide requis)".to_string()
        }
        BlockReason::Axle(AxleType::QuickRelease) => {
            // Never produced by the engine; a QR axle passes the gate
            "type d'axe de roue avant non pris en charge".to_string()
        }
        BlockReason::Axle(AxleType::Other(raw)) => format!(
            "type d'axe de roue avant « {} » non pris en charge (blocage rapide requis)",
            raw
        ),
        BlockReason::ForkSpacing(mm) => format!(
            "l'entraxe de fourche est de {} mm ({} mm requis)",
            mm, REQUIRED_FORK_SPACING_MM
        ),
    }
}

/// Headline for a compatible bike, by highest tier reached
pub fn compatible(tier: KitTier) -> String {
    match tier {
        KitTier::Advanced => {
            "Excellente compatibilité ! Votre vélo est compatible avec tous nos kits.".to_string()
        }
        KitTier::Basic => "Compatibilité confirmée avec notre kit de base.".to_string(),
    }
}

pub fn brake_type(brake: &str) -> String {
    format!("Type de freins : {}.", brake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_lists_each_reason() {
        let note = incompatible(
            "Trek",
            "Madone",
            &[BlockReason::Axle(AxleType::ThruAxle), BlockReason::ForkSpacing(110)],
        );
        assert!(note.starts_with("Le Trek Madone n'est pas compatible"));
        assert!(note.contains("axe traversant"));
        assert!(note.contains(" et "));
        assert!(note.contains("110 mm (100 mm requis)"));
        assert!(note.ends_with('.'));
    }

    #[test]
    fn test_compatible_headline_by_tier() {
        assert!(compatible(KitTier::Advanced).contains("tous nos kits"));
        assert!(compatible(KitTier::Basic).contains("kit de base"));
    }
}
