use std::sync::Arc;
use std::time::Duration;

use askama::Template as _;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tokio::sync::Mutex;

use mealboard_mealplan::PlanWorkflow;
use mealboard_store::{ApiClient, ResourceStore, StoreError};
use mealboard_types::{Ingredient, Recipe, SavedMealPlan, WeeklyAssignment};

use crate::error::AppError;
use crate::template::NotFoundTemplate;

mod assets;
mod dashboard;
mod health;
mod ingredients;
mod mealplan;
mod planner;
mod recipes;

/// Session state of the meal plan builder page. One session per process,
/// same as the single-user backend it talks to.
#[derive(Debug, Default)]
pub struct BuilderSession {
    pub workflow: PlanWorkflow,
    /// Dismissable banner for builder-level failures.
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub api: ApiClient,
    pub ingredients: Arc<Mutex<ResourceStore<Ingredient>>>,
    pub recipes: Arc<Mutex<ResourceStore<Recipe>>>,
    pub plans: Arc<Mutex<ResourceStore<SavedMealPlan>>>,
    pub assignments: Arc<Mutex<ResourceStore<WeeklyAssignment>>>,
    pub builder: Arc<Mutex<BuilderSession>>,
    /// Last backend reachability probe; `None` until the first one runs.
    pub backend_up: Arc<Mutex<Option<bool>>>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Result<Self, StoreError> {
        let api = ApiClient::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )?;
        let user_id = config.api.user_id;

        Ok(Self {
            config,
            api: api.clone(),
            ingredients: Arc::new(Mutex::new(ResourceStore::new(api.clone(), user_id))),
            recipes: Arc::new(Mutex::new(ResourceStore::new(api.clone(), user_id))),
            plans: Arc::new(Mutex::new(ResourceStore::new(api.clone(), user_id))),
            assignments: Arc::new(Mutex::new(ResourceStore::new(api, user_id))),
            builder: Arc::new(Mutex::new(BuilderSession::default())),
            backend_up: Arc::new(Mutex::new(None)),
        })
    }
}

/// First human-readable message out of a validator error set.
pub(crate) fn first_message(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_owned())
}

pub async fn fallback() -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::NOT_FOUND, Html(NotFoundTemplate.render()?)))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(dashboard::index))
        .route("/dashboard", get(dashboard::page))
        .route("/dashboard/health/retry", post(dashboard::retry_health))
        .route("/ingredients", get(ingredients::page).post(ingredients::create))
        .route("/ingredients/{id}", get(ingredients::select))
        .route("/ingredients/{id}/update", post(ingredients::update))
        .route("/ingredients/{id}/delete", post(ingredients::delete))
        .route("/ingredients/clear-selection", post(ingredients::clear_selection))
        .route("/ingredients/dismiss-error", post(ingredients::dismiss_error))
        .route("/recipes", get(recipes::page).post(recipes::create))
        .route("/recipes/{id}", get(recipes::select))
        .route("/recipes/{id}/update", post(recipes::update))
        .route("/recipes/{id}/delete", post(recipes::delete))
        .route("/recipes/clear-selection", post(recipes::clear_selection))
        .route("/recipes/dismiss-error", post(recipes::dismiss_error))
        .route("/mealplan", get(mealplan::page))
        .route("/mealplan/slot", post(mealplan::assign_slot))
        .route("/mealplan/clear", post(mealplan::clear))
        .route("/mealplan/save", post(mealplan::save))
        .route("/mealplan/load/{id}", post(mealplan::load))
        .route("/mealplan/plans/{id}/delete", post(mealplan::delete_plan))
        .route("/mealplan/dismiss-error", post(mealplan::dismiss_error))
        .route("/planner", get(planner::page))
        .route("/planner/assign", post(planner::assign))
        .route("/planner/assignments/{id}/delete", post(planner::remove))
        .route("/planner/dismiss-error", post(planner::dismiss_error))
        .fallback(fallback)
        .nest_service("/static", assets::AssetsService::new())
        .with_state(app_state)
}
