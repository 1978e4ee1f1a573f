use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{DayOfWeek, MealType, Recipe};

/// One persisted cell of a saved plan: a recipe bound to a (day, meal type)
/// slot. The backend embeds the full recipe for nutrition display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanItem {
    pub id: i64,
    pub meal_plan_id: i64,
    pub recipe_id: i64,
    pub day_of_week: DayOfWeek,
    pub meal_type: MealType,
    pub recipe: Recipe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMealPlan {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub meal_plan_items: Vec<MealPlanItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanItemPayload {
    pub recipe_id: i64,
    pub day_of_week: DayOfWeek,
    pub meal_type: MealType,
}

/// Create/update body for `/meal-plans/`. Only filled slots are submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealPlanPayload {
    #[validate(length(min = 1, message = "Please enter a meal plan name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please add at least one recipe to your meal plan"))]
    pub meal_plan_items: Vec<MealPlanItemPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_round_trips_backend_json() {
        let json = r#"{
            "id": 3,
            "meal_plan_id": 1,
            "recipe_id": 9,
            "day_of_week": "Tuesday",
            "meal_type": "lunch",
            "recipe": {"id": 9, "name": "Soup", "user_id": 1}
        }"#;
        let item: MealPlanItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.day_of_week, DayOfWeek::Tuesday);
        assert_eq!(item.meal_type, MealType::Lunch);
        assert!(item.recipe.ingredient_associations.is_empty());

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["day_of_week"], "Tuesday");
        assert_eq!(back["meal_type"], "lunch");
    }
}
