use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use validator::Validate;

use mealboard_types::{Ingredient, Recipe, RecipeIngredientPayload, RecipePayload};

use super::AppState;
use crate::error::AppError;
use crate::template::filters;

#[derive(Template)]
#[template(path = "pages/recipes.html")]
struct RecipesTemplate {
    items: Vec<Recipe>,
    selected: Option<Recipe>,
    ingredients: Vec<Ingredient>,
    error: Option<String>,
    loading: bool,
}

/// Recipe form with parallel ingredient rows: `ingredient_id`, `quantity`
/// and `unit` repeat once per row. Rows left blank in the fixed-size form
/// are skipped.
#[derive(Debug, Deserialize)]
pub struct RecipeForm {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    instructions: String,
    #[serde(default)]
    ingredient_id: Vec<String>,
    #[serde(default)]
    quantity: Vec<String>,
    #[serde(default)]
    unit: Vec<String>,
}

impl RecipeForm {
    fn into_payload(self) -> Result<RecipePayload, String> {
        if self.ingredient_id.len() != self.quantity.len()
            || self.ingredient_id.len() != self.unit.len()
        {
            return Err("Every ingredient row needs an ingredient, a quantity and a unit".to_owned());
        }

        let mut ingredients = Vec::new();
        for ((id, quantity), unit) in self
            .ingredient_id
            .iter()
            .zip(&self.quantity)
            .zip(&self.unit)
        {
            if id.trim().is_empty() {
                continue;
            }

            let ingredient_id = id
                .trim()
                .parse::<i64>()
                .map_err(|_| "Unknown ingredient".to_owned())?;
            let quantity = quantity
                .trim()
                .parse::<f64>()
                .map_err(|_| "Quantities must be numbers".to_owned())?;

            ingredients.push(RecipeIngredientPayload {
                ingredient_id,
                quantity,
                unit: unit.trim().to_owned(),
            });
        }

        let payload = RecipePayload {
            name: self.name.trim().to_owned(),
            description: optional_text(self.description),
            instructions: optional_text(self.instructions),
            ingredients,
        };

        payload.validate().map_err(crate::routes::first_message)?;

        if payload.ingredients.iter().any(|i| i.quantity <= 0.0) {
            return Err("Ingredient quantities must be greater than zero".to_owned());
        }

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

/// GET /recipes - the list plus the ingredient catalog for the row picker.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut store = state.recipes.lock().await;
    store.fetch_all().await;

    let ingredients = {
        let mut ingredients = state.ingredients.lock().await;
        ingredients.fetch_all().await;
        ingredients.items().to_vec()
    };

    let template = RecipesTemplate {
        items: store.items().to_vec(),
        selected: store.selected().cloned(),
        ingredients,
        error: store.error().map(str::to_owned),
        loading: store.loading(),
    };

    Ok(Html(template.render()?))
}

pub async fn create(State(state): State<AppState>, Form(form): Form<RecipeForm>) -> Redirect {
    let mut store = state.recipes.lock().await;
    match form.into_payload() {
        Ok(payload) => store.create(&payload).await,
        Err(message) => store.reject(message),
    }

    Redirect::to("/recipes")
}

pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let mut store = state.recipes.lock().await;
    store.fetch_by_id(id).await;

    let ingredients = state.ingredients.lock().await.items().to_vec();

    let template = RecipesTemplate {
        items: store.items().to_vec(),
        selected: store.selected().cloned(),
        ingredients,
        error: store.error().map(str::to_owned),
        loading: store.loading(),
    };

    Ok(Html(template.render()?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<RecipeForm>,
) -> Redirect {
    let mut store = state.recipes.lock().await;
    match form.into_payload() {
        Ok(payload) => store.update(id, &payload).await,
        Err(message) => store.reject(message),
    }

    Redirect::to("/recipes")
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.recipes.lock().await.delete(id).await;
    Redirect::to("/recipes")
}

pub async fn clear_selection(State(state): State<AppState>) -> Redirect {
    state.recipes.lock().await.clear_selection();
    Redirect::to("/recipes")
}

pub async fn dismiss_error(State(state): State<AppState>) -> Redirect {
    state.recipes.lock().await.clear_error();
    Redirect::to("/recipes")
}
