use thiserror::Error;

use mealboard_types::{DayOfWeek, MealPlanPayload, MealType, Recipe, SavedMealPlan};

use crate::WeekGrid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanState {
    #[default]
    Idle,
    Editing,
    Saving,
    Saved,
}

/// Local failures of the save workflow. None of these reach the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Please enter a meal plan name")]
    EmptyName,

    #[error("Please add at least one recipe to your meal plan")]
    NoRecipes,

    #[error("A save is already in progress")]
    SaveInProgress,
}

/// Whether the save becomes a PUT of the loaded plan or a POST of a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update(i64),
}

/// A validated save, ready for the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub mode: SaveMode,
    pub payload: MealPlanPayload,
}

/// Save/load state machine around the weekly grid. Holds the currently
/// loaded plan, if any; saving over it updates in place unless the caller
/// asks for "save as new".
#[derive(Debug, Default)]
pub struct PlanWorkflow {
    grid: WeekGrid,
    state: PlanState,
    current: Option<SavedMealPlan>,
}

impl PlanWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    pub fn current(&self) -> Option<&SavedMealPlan> {
        self.current.as_ref()
    }

    /// Edit one slot. Any edit moves an idle or saved plan back to editing.
    pub fn assign(&mut self, day: DayOfWeek, meal: MealType, recipe: Option<Recipe>) {
        self.grid.assign(day, meal, recipe);
        if self.state != PlanState::Saving {
            self.state = PlanState::Editing;
        }
    }

    /// Empty the grid and drop the loaded plan.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.current = None;
        self.state = PlanState::Idle;
    }

    /// Validate locally and produce the save request. Rejected saves leave
    /// the state machine untouched.
    pub fn begin_save(&mut self, name: &str, save_as_new: bool) -> Result<SaveRequest, WorkflowError> {
        if self.state == PlanState::Saving {
            return Err(WorkflowError::SaveInProgress);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(WorkflowError::EmptyName);
        }

        let meal_plan_items = self.grid.to_payload_items();
        if meal_plan_items.is_empty() {
            return Err(WorkflowError::NoRecipes);
        }

        let mode = match (&self.current, save_as_new) {
            (Some(plan), false) => SaveMode::Update(plan.id),
            _ => SaveMode::Create,
        };

        self.state = PlanState::Saving;
        tracing::debug!(?mode, slots = meal_plan_items.len(), "meal plan save started");

        Ok(SaveRequest {
            mode,
            payload: MealPlanPayload {
                name: name.to_owned(),
                meal_plan_items,
            },
        })
    }

    /// The backend accepted the save; the returned plan becomes the loaded
    /// one.
    pub fn complete_save(&mut self, plan: SavedMealPlan) {
        tracing::debug!(plan = plan.id, "meal plan saved");
        self.current = Some(plan);
        self.state = PlanState::Saved;
    }

    /// The save failed remotely; the grid content is untouched, back to
    /// editing.
    pub fn fail_save(&mut self) {
        self.state = PlanState::Editing;
    }

    /// Reset the grid and repopulate it from the plan's persisted items.
    pub fn load(&mut self, plan: SavedMealPlan) {
        self.grid.load_items(&plan.meal_plan_items);
        self.current = Some(plan);
        self.state = PlanState::Saved;
    }
}
