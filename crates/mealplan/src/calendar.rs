use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use mealboard_types::{Nutrients, WeeklyAssignment};

/// The Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// One Monday-aligned week of the monthly planner, with the assignment whose
/// week-start date matches, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarWeek {
    /// 1-based position within the month view.
    pub week_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub assignment: Option<WeeklyAssignment>,
}

impl CalendarWeek {
    /// "5-11" within one month, "Jan 29 - Feb 4" across a boundary.
    pub fn date_range_label(&self) -> String {
        if self.start.month() == self.end.month() {
            format!("{}-{}", self.start.day(), self.end.day())
        } else {
            format!(
                "{} - {}",
                self.start.format("%b %-d"),
                self.end.format("%b %-d")
            )
        }
    }
}

/// Monday-aligned weeks overlapping the given month: from the week
/// containing the 1st through the week containing the last day. Boundary
/// weeks extending into adjacent months are included in full.
pub fn month_weeks(
    year: i32,
    month: u32,
    assignments: &[WeeklyAssignment],
) -> Vec<CalendarWeek> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = last_day_of_month(first);

    let mut weeks = Vec::new();
    let mut start = monday_of(first);
    let mut week_number = 1;
    while start <= last {
        let end = start + Duration::days(6);
        let assignment = assignments
            .iter()
            .find(|a| a.week_start_date == start)
            .cloned();

        weeks.push(CalendarWeek {
            week_number,
            start,
            end,
            assignment,
        });

        start += Duration::days(7);
        week_number += 1;
    }

    weeks
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };

    // The first of a month always exists, so the fallback never fires.
    next_month
        .map(|d| d - Duration::days(1))
        .unwrap_or(first)
}

/// Aggregates shown on the monthly planner header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthStats {
    pub nutrients: Nutrients,
    pub unique_recipes: usize,
    pub assigned_weeks: usize,
    pub total_weeks: usize,
}

/// Nutrition and coverage over the month's assigned weeks, scaling each meal
/// plan item's recipe linearly by ingredient quantity.
pub fn month_stats(weeks: &[CalendarWeek]) -> MonthStats {
    let mut nutrients = Nutrients::default();
    let mut recipe_ids = BTreeSet::new();
    let mut assigned_weeks = 0;

    for week in weeks {
        let Some(assignment) = &week.assignment else {
            continue;
        };
        assigned_weeks += 1;

        for item in &assignment.meal_plan.meal_plan_items {
            recipe_ids.insert(item.recipe_id);
            nutrients += item.recipe.nutrients();
        }
    }

    MonthStats {
        nutrients,
        unique_recipes: recipe_ids.len(),
        assigned_weeks,
        total_weeks: weeks.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monday_of_is_identity_on_mondays() {
        // 2024-01-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(monday_of(monday), monday);

        let thursday = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert_eq!(monday_of(thursday), monday);

        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(monday_of(sunday), monday);
    }

    #[test]
    fn last_day_handles_year_end_and_leap_february() {
        let dec = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(last_day_of_month(dec), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(last_day_of_month(feb), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn range_label_spans_months() {
        let week = CalendarWeek {
            week_number: 1,
            start: NaiveDate::from_ymd_opt(2024, 1, 29).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 4).unwrap(),
            assignment: None,
        };
        assert_eq!(week.date_range_label(), "Jan 29 - Feb 4");

        let week = CalendarWeek {
            week_number: 2,
            start: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 11).unwrap(),
            assignment: None,
        };
        assert_eq!(week.date_range_label(), "5-11");
    }
}
