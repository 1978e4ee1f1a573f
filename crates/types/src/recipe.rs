use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Ingredient, Nutrients};

/// One ingredient association inside a recipe: which ingredient, how much of
/// it (grams or milliliters, the unit is informational) and the embedded
/// ingredient record for nutrition lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: String,
    pub ingredient: Ingredient,
}

impl RecipeIngredient {
    pub fn nutrients(&self) -> Nutrients {
        self.ingredient.nutrients_for(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub ingredient_associations: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Total nutrients of the recipe, each association scaled by its quantity.
    pub fn nutrients(&self) -> Nutrients {
        self.ingredient_associations
            .iter()
            .map(RecipeIngredient::nutrients)
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientPayload {
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: String,
}

/// Create/update body for `/recipes/`. A recipe submission without a name or
/// without any ingredients is rejected locally, before any network call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipePayload {
    #[validate(length(min = 1, message = "Recipe name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[validate(length(min = 1, message = "A recipe needs at least one ingredient"))]
    pub ingredients: Vec<RecipeIngredientPayload>,
}
