use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use strum::VariantArray;

use mealboard_mealplan::{PlanState, SaveMode};
use mealboard_store::{Resource, StoreError, item_path};
use mealboard_types::{DayOfWeek, MealType, Nutrients, Recipe, SavedMealPlan};

use super::AppState;
use crate::error::AppError;
use crate::template::filters;

struct SlotView {
    day: DayOfWeek,
    meal: MealType,
    recipe_id: Option<i64>,
    recipe_name: Option<String>,
}

struct DayView {
    day: DayOfWeek,
    slots: Vec<SlotView>,
    nutrients: Nutrients,
}

#[derive(Template)]
#[template(path = "pages/mealplan.html")]
struct MealPlanTemplate {
    days: Vec<DayView>,
    week: Nutrients,
    filled: usize,
    saving: bool,
    current: Option<SavedMealPlan>,
    plans: Vec<SavedMealPlan>,
    recipes: Vec<Recipe>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotForm {
    day: DayOfWeek,
    meal: MealType,
    /// Empty string clears the slot.
    #[serde(default)]
    recipe_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    name: String,
    /// Checkbox: present means "save as a new plan" even when one is loaded.
    #[serde(default)]
    save_as_new: Option<String>,
}

/// GET /mealplan - the weekly builder: grid, nutrition totals, saved plans.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (plans, plans_error) = {
        let mut plans = state.plans.lock().await;
        plans.fetch_all().await;
        (plans.items().to_vec(), plans.error().map(str::to_owned))
    };
    let recipes = {
        let mut recipes = state.recipes.lock().await;
        recipes.fetch_all().await;
        recipes.items().to_vec()
    };

    let builder = state.builder.lock().await;
    let grid = builder.workflow.grid();

    let days = DayOfWeek::VARIANTS
        .iter()
        .map(|day| DayView {
            day: *day,
            slots: grid
                .day_slots(*day)
                .iter()
                .map(|slot| SlotView {
                    day: slot.day,
                    meal: slot.meal,
                    recipe_id: slot.recipe.as_ref().map(|r| r.id),
                    recipe_name: slot.recipe.as_ref().map(|r| r.name.clone()),
                })
                .collect(),
            nutrients: grid.day_nutrients(*day),
        })
        .collect();

    let error = builder.notice.clone().or(plans_error);

    let template = MealPlanTemplate {
        days,
        week: grid.week_nutrients(),
        filled: grid.filled_count(),
        saving: builder.workflow.state() == PlanState::Saving,
        current: builder.workflow.current().cloned(),
        plans,
        recipes,
        error,
    };

    Ok(Html(template.render()?))
}

/// POST /mealplan/slot - assign or clear one grid cell. Failures stay in the
/// builder banner, like every other builder mutation.
pub async fn assign_slot(State(state): State<AppState>, Form(form): Form<SlotForm>) -> Redirect {
    let recipe_id = form.recipe_id.trim();
    let recipe = if recipe_id.is_empty() {
        None
    } else {
        let looked_up = match recipe_id.parse::<i64>() {
            Ok(id) => lookup_recipe(&state, id).await,
            Err(_) => Err(StoreError::Validation("Unknown recipe".to_owned())),
        };
        match looked_up {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                state.builder.lock().await.notice = Some(err.to_string());
                return Redirect::to("/mealplan");
            }
        }
    };

    let mut builder = state.builder.lock().await;
    builder.workflow.assign(form.day, form.meal, recipe);

    Redirect::to("/mealplan")
}

/// The recipes list usually has the record already; fall back to a detail
/// fetch when it does not.
async fn lookup_recipe(state: &AppState, id: i64) -> Result<Recipe, StoreError> {
    let cached = state
        .recipes
        .lock()
        .await
        .items()
        .iter()
        .find(|r| r.id == id)
        .cloned();

    match cached {
        Some(recipe) => Ok(recipe),
        None => state.api.get_json::<Recipe>(&item_path::<Recipe>(id)).await,
    }
}

/// POST /mealplan/clear - empty the grid and drop the loaded plan.
pub async fn clear(State(state): State<AppState>) -> Redirect {
    state.builder.lock().await.workflow.clear();
    Redirect::to("/mealplan")
}

/// POST /mealplan/save - validate locally, then create or update remotely.
pub async fn save(State(state): State<AppState>, Form(form): Form<SaveForm>) -> Redirect {
    let mut builder = state.builder.lock().await;

    let request = match builder
        .workflow
        .begin_save(&form.name, form.save_as_new.is_some())
    {
        Ok(request) => request,
        Err(err) => {
            builder.notice = Some(err.to_string());
            return Redirect::to("/mealplan");
        }
    };

    let result = match request.mode {
        SaveMode::Create => {
            state
                .api
                .post_json::<SavedMealPlan, _>(
                    &SavedMealPlan::create_path(state.config.api.user_id),
                    &request.payload,
                )
                .await
        }
        SaveMode::Update(id) => {
            state
                .api
                .put_json::<SavedMealPlan, _>(&item_path::<SavedMealPlan>(id), &request.payload)
                .await
        }
    };

    match result {
        Ok(plan) => {
            builder.workflow.complete_save(plan);
            builder.notice = None;
            drop(builder);
            state.plans.lock().await.fetch_all().await;
        }
        Err(err) => {
            builder.workflow.fail_save();
            builder.notice = Some(err.to_string());
        }
    }

    Redirect::to("/mealplan")
}

/// POST /mealplan/load/{id} - replace the grid with a saved plan.
pub async fn load(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    match state
        .api
        .get_json::<SavedMealPlan>(&item_path::<SavedMealPlan>(id))
        .await
    {
        Ok(plan) => {
            let mut builder = state.builder.lock().await;
            builder.workflow.load(plan);
            builder.notice = None;
        }
        Err(err) => {
            state.builder.lock().await.notice = Some(err.to_string());
        }
    }

    Redirect::to("/mealplan")
}

pub async fn delete_plan(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.plans.lock().await.delete(id).await;
    Redirect::to("/mealplan")
}

pub async fn dismiss_error(State(state): State<AppState>) -> Redirect {
    state.builder.lock().await.notice = None;
    state.plans.lock().await.clear_error();
    Redirect::to("/mealplan")
}
