use serde::Serialize;
use serde::de::DeserializeOwned;

use mealboard_types::{
    AssignmentPayload, Ingredient, IngredientPayload, MealPlanPayload, Recipe, RecipePayload,
    SavedMealPlan, WeeklyAssignment,
};

/// One REST collection the backend exposes. Item paths are
/// `{COLLECTION}{id}`, collections keep their trailing slash.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// Create/update request body.
    type Payload: Serialize + Send + Sync;

    fn id(&self) -> i64;

    /// Path for POSTs. Some collections require the owning user as a query
    /// parameter on creation.
    fn create_path(_user_id: i64) -> String {
        Self::COLLECTION.to_owned()
    }

    /// Path for list GETs. Some collections are only listed through the
    /// owning user's scope.
    fn list_path(_user_id: i64) -> String {
        Self::COLLECTION.to_owned()
    }
}

pub fn item_path<T: Resource>(id: i64) -> String {
    format!("{}{id}", T::COLLECTION)
}

impl Resource for Ingredient {
    const COLLECTION: &'static str = "/ingredients/";
    type Payload = IngredientPayload;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Recipe {
    const COLLECTION: &'static str = "/recipes/";
    type Payload = RecipePayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn create_path(user_id: i64) -> String {
        format!("{}?user_id={user_id}", Self::COLLECTION)
    }
}

impl Resource for SavedMealPlan {
    const COLLECTION: &'static str = "/meal-plans/";
    type Payload = MealPlanPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn create_path(user_id: i64) -> String {
        format!("{}?user_id={user_id}", Self::COLLECTION)
    }

    // The backend only lists plans per user; the global collection is
    // create-only.
    fn list_path(user_id: i64) -> String {
        format!("/users/{user_id}/meal-plans/")
    }
}

impl Resource for WeeklyAssignment {
    const COLLECTION: &'static str = "/weekly-assignments/";
    type Payload = AssignmentPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn list_path(user_id: i64) -> String {
        format!("/users/{user_id}/weekly-assignments/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_follow_the_backend_layout() {
        assert_eq!(item_path::<Ingredient>(4), "/ingredients/4");
        assert_eq!(item_path::<SavedMealPlan>(12), "/meal-plans/12");
        assert_eq!(Recipe::create_path(1), "/recipes/?user_id=1");
        assert_eq!(Ingredient::create_path(1), "/ingredients/");
    }

    #[test]
    fn per_user_collections_list_through_the_user_scope() {
        assert_eq!(SavedMealPlan::list_path(1), "/users/1/meal-plans/");
        assert_eq!(WeeklyAssignment::list_path(1), "/users/1/weekly-assignments/");
        assert_eq!(Ingredient::list_path(1), "/ingredients/");
        assert_eq!(Recipe::list_path(1), "/recipes/");
    }
}
