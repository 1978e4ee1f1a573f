use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::SavedMealPlan;

/// Binds a saved meal plan to one calendar week for one user. The week is
/// identified by its Monday; `week_start_date` is always a Monday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAssignment {
    pub id: i64,
    pub week_start_date: NaiveDate,
    pub meal_plan_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    pub meal_plan: SavedMealPlan,
}

impl WeeklyAssignment {
    pub fn starts_on_monday(&self) -> bool {
        self.week_start_date.weekday() == Weekday::Mon
    }
}

/// Create body for `/weekly-assignments/`. The backend replaces `user_id`
/// with the authenticated user's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPayload {
    pub week_start_date: NaiveDate,
    pub meal_plan_id: i64,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_serializes_as_iso_date() {
        let payload = AssignmentPayload {
            week_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            meal_plan_id: 2,
            user_id: 1,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["week_start_date"], "2024-01-01");
    }
}
