use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use mealboard_mealplan::{CalendarWeek, MonthStats, month_stats, month_weeks, monday_of};
use mealboard_types::{AssignmentPayload, SavedMealPlan};

use super::AppState;
use crate::error::AppError;
use crate::template::filters;

#[derive(Template)]
#[template(path = "pages/planner.html")]
struct PlannerTemplate {
    year: i32,
    month: u32,
    month_label: String,
    prev_year: i32,
    prev_month: u32,
    next_year: i32,
    next_month: u32,
    weeks: Vec<CalendarWeek>,
    stats: MonthStats,
    plans: Vec<SavedMealPlan>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    year: Option<i32>,
    month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AssignForm {
    week_start_date: NaiveDate,
    meal_plan_id: i64,
    year: i32,
    month: u32,
}

#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    year: i32,
    month: u32,
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default()
}

/// GET /planner - Monday-aligned weeks of the month with their assignments.
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let today = Utc::now().date_naive();
    // Out-of-range query values fall back to today; an unbounded year would
    // overflow the prev/next arithmetic.
    let year = query
        .year
        .filter(|y| (1970..=9999).contains(y))
        .unwrap_or_else(|| today.year());
    let month = query.month.filter(|m| (1..=12).contains(m)).unwrap_or_else(|| today.month());

    let (assignments, error) = {
        let mut store = state.assignments.lock().await;
        store.fetch_all().await;
        (store.items().to_vec(), store.error().map(str::to_owned))
    };
    let plans = {
        let mut plans = state.plans.lock().await;
        plans.fetch_all().await;
        plans.items().to_vec()
    };

    let weeks = month_weeks(year, month, &assignments);
    let stats = month_stats(&weeks);

    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let template = PlannerTemplate {
        year,
        month,
        month_label: month_label(year, month),
        prev_year,
        prev_month,
        next_year,
        next_month,
        weeks,
        stats,
        plans,
        error,
    };

    Ok(Html(template.render()?))
}

/// POST /planner/assign - attach a saved plan to a week. The submitted date
/// is snapped to its Monday before it goes out.
pub async fn assign(State(state): State<AppState>, Form(form): Form<AssignForm>) -> Redirect {
    let payload = AssignmentPayload {
        week_start_date: monday_of(form.week_start_date),
        meal_plan_id: form.meal_plan_id,
        user_id: state.config.api.user_id,
    };

    state.assignments.lock().await.create(&payload).await;

    Redirect::to(&format!("/planner?year={}&month={}", form.year, form.month))
}

/// POST /planner/assignments/{id}/delete - unassign the week.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<RemoveForm>,
) -> Redirect {
    state.assignments.lock().await.delete(id).await;

    Redirect::to(&format!("/planner?year={}&month={}", form.year, form.month))
}

pub async fn dismiss_error(State(state): State<AppState>) -> Redirect {
    state.assignments.lock().await.clear_error();
    Redirect::to("/planner")
}
