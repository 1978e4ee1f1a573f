use strum::VariantArray;

use mealboard_types::{
    DayOfWeek, MealPlanItem, MealPlanItemPayload, MealType, Nutrients, Recipe,
};

/// 7 days x 3 meal types.
pub const SLOTS_PER_WEEK: usize = 21;

/// One cell of the weekly grid. `(day, meal)` is the natural key; the recipe
/// is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct MealSlot {
    pub day: DayOfWeek,
    pub meal: MealType,
    pub recipe: Option<Recipe>,
}

/// The full week matrix. All 21 slots always exist; assigning and clearing
/// replace the slot's recipe in place. Nothing stops the same recipe being
/// assigned to several slots.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    slots: Vec<MealSlot>,
}

impl Default for WeekGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekGrid {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(SLOTS_PER_WEEK);
        for day in DayOfWeek::VARIANTS {
            for meal in MealType::VARIANTS {
                slots.push(MealSlot {
                    day: *day,
                    meal: *meal,
                    recipe: None,
                });
            }
        }

        Self { slots }
    }

    fn index(day: DayOfWeek, meal: MealType) -> usize {
        day.index() * MealType::VARIANTS.len() + meal.index()
    }

    pub fn slots(&self) -> &[MealSlot] {
        &self.slots
    }

    /// Replace the slot's recipe; `None` clears it.
    pub fn assign(&mut self, day: DayOfWeek, meal: MealType, recipe: Option<Recipe>) {
        self.slots[Self::index(day, meal)].recipe = recipe;
    }

    pub fn recipe_for(&self, day: DayOfWeek, meal: MealType) -> Option<&Recipe> {
        self.slots[Self::index(day, meal)].recipe.as_ref()
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.recipe = None;
        }
    }

    pub fn filled_slots(&self) -> impl Iterator<Item = &MealSlot> {
        self.slots.iter().filter(|slot| slot.recipe.is_some())
    }

    pub fn filled_count(&self) -> usize {
        self.filled_slots().count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// The three slots of one day, in meal-type order. Handy for rendering
    /// day columns.
    pub fn day_slots(&self, day: DayOfWeek) -> &[MealSlot] {
        let start = Self::index(day, MealType::Breakfast);
        &self.slots[start..start + MealType::VARIANTS.len()]
    }

    /// Sum of the recipe nutrition of the day's non-empty slots, each
    /// ingredient scaled by its quantity / 100.
    pub fn day_nutrients(&self, day: DayOfWeek) -> Nutrients {
        self.day_slots(day)
            .iter()
            .filter_map(|slot| slot.recipe.as_ref())
            .map(Recipe::nutrients)
            .sum()
    }

    pub fn week_nutrients(&self) -> Nutrients {
        DayOfWeek::VARIANTS
            .iter()
            .map(|day| self.day_nutrients(*day))
            .sum()
    }

    /// Filled slots as the create/update wire items.
    pub fn to_payload_items(&self) -> Vec<MealPlanItemPayload> {
        self.filled_slots()
            .map(|slot| MealPlanItemPayload {
                recipe_id: slot.recipe.as_ref().map(|r| r.id).unwrap_or_default(),
                day_of_week: slot.day,
                meal_type: slot.meal,
            })
            .collect()
    }

    /// Reset the grid, then populate exactly the slots present in `items`.
    pub fn load_items(&mut self, items: &[MealPlanItem]) {
        self.clear();
        for item in items {
            self.assign(item.day_of_week, item.meal_type, Some(item.recipe.clone()));
        }
    }
}
