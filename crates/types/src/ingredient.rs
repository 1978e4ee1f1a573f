use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Nutrients;

/// An ingredient as served by the backend. Nutrient fields are densities
/// normalized to a 100 g reference quantity; any of them may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub calories_per_100g: Option<f64>,
    #[serde(default)]
    pub protein_per_100g: Option<f64>,
    #[serde(default)]
    pub carbs_per_100g: Option<f64>,
    #[serde(default)]
    pub fat_per_100g: Option<f64>,
    #[serde(default)]
    pub fiber_per_100g: Option<f64>,
    #[serde(default)]
    pub sugar_per_100g: Option<f64>,
    #[serde(default)]
    pub sodium_per_100g: Option<f64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Ingredient {
    /// Nutrient densities with missing values treated as zero.
    pub fn per_100g(&self) -> Nutrients {
        Nutrients {
            calories: self.calories_per_100g.unwrap_or_default(),
            protein: self.protein_per_100g.unwrap_or_default(),
            carbs: self.carbs_per_100g.unwrap_or_default(),
            fat: self.fat_per_100g.unwrap_or_default(),
            fiber: self.fiber_per_100g.unwrap_or_default(),
            sugar: self.sugar_per_100g.unwrap_or_default(),
            sodium: self.sodium_per_100g.unwrap_or_default(),
        }
    }

    /// Absolute nutrients for `quantity` grams: per-100g value x quantity / 100.
    pub fn nutrients_for(&self, quantity: f64) -> Nutrients {
        self.per_100g() * (quantity / 100.0)
    }
}

/// Create/update body for `/ingredients/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct IngredientPayload {
    #[validate(length(min = 1, message = "Ingredient name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub calories_per_100g: Option<f64>,
    #[serde(default)]
    pub protein_per_100g: Option<f64>,
    #[serde(default)]
    pub carbs_per_100g: Option<f64>,
    #[serde(default)]
    pub fat_per_100g: Option<f64>,
    #[serde(default)]
    pub fiber_per_100g: Option<f64>,
    #[serde(default)]
    pub sugar_per_100g: Option<f64>,
    #[serde(default)]
    pub sodium_per_100g: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicken() -> Ingredient {
        Ingredient {
            id: 1,
            name: "Chicken breast".to_owned(),
            category: Some("Meat".to_owned()),
            calories_per_100g: Some(165.0),
            protein_per_100g: Some(31.0),
            carbs_per_100g: None,
            fat_per_100g: Some(3.6),
            fiber_per_100g: None,
            sugar_per_100g: None,
            sodium_per_100g: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn scaling_is_linear_in_quantity() {
        let scaled = chicken().nutrients_for(150.0);
        assert_eq!(scaled.calories, 247.5);
        assert_eq!(scaled.protein, 46.5);
        assert_eq!(scaled.carbs, 0.0);
    }

    #[test]
    fn deserializes_sparse_backend_payload() {
        let ingredient: Ingredient =
            serde_json::from_str(r#"{"id": 7, "name": "Salt"}"#).unwrap();
        assert_eq!(ingredient.id, 7);
        assert!(ingredient.category.is_none());
        assert!(ingredient.per_100g().is_empty());
    }

    #[test]
    fn payload_rejects_empty_name() {
        let payload = IngredientPayload::default();
        assert!(validator::Validate::validate(&payload).is_err());

        let payload = IngredientPayload {
            name: "Salt".to_owned(),
            ..Default::default()
        };
        assert!(validator::Validate::validate(&payload).is_ok());
    }
}
