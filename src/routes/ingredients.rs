use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use validator::Validate;

use mealboard_types::{Ingredient, IngredientPayload};

use super::AppState;
use crate::error::AppError;
use crate::template::filters;

#[derive(Template)]
#[template(path = "pages/ingredients.html")]
struct IngredientsTemplate {
    items: Vec<Ingredient>,
    selected: Option<Ingredient>,
    error: Option<String>,
    loading: bool,
}

/// Raw form fields; numbers arrive as text so an empty input can mean "not
/// provided" instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct IngredientForm {
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    calories_per_100g: String,
    #[serde(default)]
    protein_per_100g: String,
    #[serde(default)]
    carbs_per_100g: String,
    #[serde(default)]
    fat_per_100g: String,
    #[serde(default)]
    fiber_per_100g: String,
    #[serde(default)]
    sugar_per_100g: String,
    #[serde(default)]
    sodium_per_100g: String,
}

impl IngredientForm {
    fn into_payload(self) -> Result<IngredientPayload, String> {
        let payload = IngredientPayload {
            name: self.name.trim().to_owned(),
            category: optional_text(self.category),
            calories_per_100g: optional_number("Calories", &self.calories_per_100g)?,
            protein_per_100g: optional_number("Protein", &self.protein_per_100g)?,
            carbs_per_100g: optional_number("Carbs", &self.carbs_per_100g)?,
            fat_per_100g: optional_number("Fat", &self.fat_per_100g)?,
            fiber_per_100g: optional_number("Fiber", &self.fiber_per_100g)?,
            sugar_per_100g: optional_number("Sugar", &self.sugar_per_100g)?,
            sodium_per_100g: optional_number("Sodium", &self.sodium_per_100g)?,
        };

        payload.validate().map_err(crate::routes::first_message)?;
        Ok(payload)
    }
}

fn optional_text(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

fn optional_number(label: &str, raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(value) if value >= 0.0 => Ok(Some(value)),
        _ => Err(format!("{label} must be a non-negative number")),
    }
}

/// GET /ingredients - refresh the list and render it with the current
/// selection and error banner.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut store = state.ingredients.lock().await;
    store.fetch_all().await;

    let template = IngredientsTemplate {
        items: store.items().to_vec(),
        selected: store.selected().cloned(),
        error: store.error().map(str::to_owned),
        loading: store.loading(),
    };

    Ok(Html(template.render()?))
}

/// POST /ingredients - create from the form, then back to the list.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<IngredientForm>,
) -> Redirect {
    let mut store = state.ingredients.lock().await;
    match form.into_payload() {
        Ok(payload) => store.create(&payload).await,
        Err(message) => store.reject(message),
    }

    Redirect::to("/ingredients")
}

/// GET /ingredients/{id} - fetch the detail record into the selection.
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let mut store = state.ingredients.lock().await;
    store.fetch_by_id(id).await;

    let template = IngredientsTemplate {
        items: store.items().to_vec(),
        selected: store.selected().cloned(),
        error: store.error().map(str::to_owned),
        loading: store.loading(),
    };

    Ok(Html(template.render()?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<IngredientForm>,
) -> Redirect {
    let mut store = state.ingredients.lock().await;
    match form.into_payload() {
        Ok(payload) => store.update(id, &payload).await,
        Err(message) => store.reject(message),
    }

    Redirect::to("/ingredients")
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.ingredients.lock().await.delete(id).await;
    Redirect::to("/ingredients")
}

pub async fn clear_selection(State(state): State<AppState>) -> Redirect {
    state.ingredients.lock().await.clear_selection();
    Redirect::to("/ingredients")
}

pub async fn dismiss_error(State(state): State<AppState>) -> Redirect {
    state.ingredients.lock().await.clear_error();
    Redirect::to("/ingredients")
}
