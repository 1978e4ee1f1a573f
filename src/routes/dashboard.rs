use askama::Template;
use axum::{
    extract::State,
    response::{Html, Redirect},
};

use mealboard_store::Resource;
use mealboard_types::{Ingredient, Recipe, SavedMealPlan};

use super::AppState;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
struct DashboardTemplate {
    backend_up: Option<bool>,
    api_base_url: String,
    ingredient_count: Option<usize>,
    recipe_count: Option<usize>,
    plan_count: Option<usize>,
}

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /dashboard - backend health indicator plus collection counts.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let backend_up = {
        let mut cached = state.backend_up.lock().await;
        match *cached {
            Some(up) => Some(up),
            None => {
                let up = state.api.health().await;
                *cached = Some(up);
                Some(up)
            }
        }
    };

    // Counts are decoration; a failing backend shows dashes, not a 500.
    let ingredient_count = state
        .api
        .get_json::<Vec<Ingredient>>("/ingredients/")
        .await
        .map(|items| items.len())
        .ok();
    let recipe_count = state
        .api
        .get_json::<Vec<Recipe>>("/recipes/")
        .await
        .map(|items| items.len())
        .ok();
    let plan_count = state
        .api
        .get_json::<Vec<SavedMealPlan>>(&SavedMealPlan::list_path(state.config.api.user_id))
        .await
        .map(|items| items.len())
        .ok();

    let template = DashboardTemplate {
        backend_up,
        api_base_url: state.api.base_url().to_owned(),
        ingredient_count,
        recipe_count,
        plan_count,
    };

    Ok(Html(template.render()?))
}

/// POST /dashboard/health/retry - re-probe the backend on demand.
pub async fn retry_health(State(state): State<AppState>) -> Redirect {
    let up = state.api.health().await;
    *state.backend_up.lock().await = Some(up);
    tracing::info!(up, "backend health re-checked");

    Redirect::to("/dashboard")
}
