//! Request identity validation
//!
//! The engine never sees an empty identity: callers validate brand/model
//! here first and answer 400 on failure.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

pub const MAX_BRAND_LEN: usize = 50;
pub const MAX_MODEL_LEN: usize = 100;

/// Bike identity as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeQuery {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
}

impl BikeQuery {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
        }
    }

    /// Trimmed copy of the query, or the reason it is rejected
    pub fn validated(&self) -> Result<BikeQuery, InputError> {
        let brand = self.brand.trim();
        let model = self.model.trim();

        if brand.is_empty() || model.is_empty() {
            return Err(InputError::Missing);
        }

        check_field("Brand", brand, MAX_BRAND_LEN)?;
        check_field("Model", model, MAX_MODEL_LEN)?;

        Ok(BikeQuery::new(brand, model))
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), InputError> {
    if value.chars().count() > max {
        return Err(InputError::TooLong { field, max });
    }

    // Letters (accents included), digits, whitespace, hyphens and dots
    let valid = value
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '.');
    if !valid {
        return Err(InputError::InvalidCharacters { field });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_query_is_trimmed() {
        let query = BikeQuery::new("  Trek ", " Domane SL 2023 ").validated().unwrap();
        assert_eq!(query, BikeQuery::new("Trek", "Domane SL 2023"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(BikeQuery::new("", "Domane").validated(), Err(InputError::Missing));
        assert_eq!(BikeQuery::new("Trek", "   ").validated(), Err(InputError::Missing));
    }

    #[test]
    fn test_length_limits() {
        let long_brand = "a".repeat(MAX_BRAND_LEN + 1);
        assert_eq!(
            BikeQuery::new(long_brand, "Domane").validated(),
            Err(InputError::TooLong { field: "Brand", max: MAX_BRAND_LEN })
        );

        let model = "b".repeat(MAX_MODEL_LEN);
        assert!(BikeQuery::new("Trek", model).validated().is_ok());
    }

    #[test]
    fn test_character_set() {
        assert!(BikeQuery::new("Lapierre", "Pulsium 5.0 Déore").validated().is_ok());
        assert!(BikeQuery::new("B-Twin", "Triban RC-520").validated().is_ok());
        assert_eq!(
            BikeQuery::new("Trek", "<script>").validated(),
            Err(InputError::InvalidCharacters { field: "Model" })
        );
    }
}
