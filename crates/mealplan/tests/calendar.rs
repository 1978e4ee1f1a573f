use chrono::{NaiveDate, NaiveDateTime};

use mealboard_mealplan::{month_stats, month_weeks, monday_of};
use mealboard_types::{
    DayOfWeek, Ingredient, MealPlanItem, MealType, Recipe, RecipeIngredient, SavedMealPlan,
    WeeklyAssignment,
};

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn chicken() -> Ingredient {
    Ingredient {
        id: 1,
        name: "Chicken breast".to_owned(),
        category: Some("Meat".to_owned()),
        calories_per_100g: Some(165.0),
        protein_per_100g: Some(31.0),
        carbs_per_100g: None,
        fat_per_100g: None,
        fiber_per_100g: None,
        sugar_per_100g: None,
        sodium_per_100g: None,
        created_at: None,
        updated_at: None,
    }
}

fn chicken_recipe() -> Recipe {
    Recipe {
        id: 10,
        name: "Grilled chicken".to_owned(),
        description: None,
        instructions: None,
        user_id: 1,
        ingredient_associations: vec![RecipeIngredient {
            ingredient_id: 1,
            quantity: 150.0,
            unit: "g".to_owned(),
            ingredient: chicken(),
        }],
    }
}

fn item(id: i64, day: DayOfWeek, meal: MealType) -> MealPlanItem {
    MealPlanItem {
        id,
        meal_plan_id: 1,
        recipe_id: 10,
        day_of_week: day,
        meal_type: meal,
        recipe: chicken_recipe(),
    }
}

fn plan(items: Vec<MealPlanItem>) -> SavedMealPlan {
    SavedMealPlan {
        id: 1,
        name: "Protein week".to_owned(),
        user_id: 1,
        created_at: timestamp(),
        updated_at: timestamp(),
        meal_plan_items: items,
    }
}

fn assignment(week_start: NaiveDate, items: Vec<MealPlanItem>) -> WeeklyAssignment {
    WeeklyAssignment {
        id: 1,
        week_start_date: week_start,
        meal_plan_id: 1,
        user_id: 1,
        created_at: None,
        updated_at: None,
        meal_plan: plan(items),
    }
}

#[test]
fn january_2024_starts_on_its_own_monday() {
    // 2024-01-01 is a Monday, so the first week starts exactly on the 1st.
    let weeks = month_weeks(2024, 1, &[]);
    assert_eq!(weeks[0].start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(weeks[0].end, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0].week_number, 1);

    // the last week runs into February in full
    let last = weeks.last().unwrap();
    assert_eq!(last.start, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
    assert_eq!(last.end, NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
}

#[test]
fn boundary_weeks_extend_into_adjacent_months() {
    let weeks = month_weeks(2024, 2, &[]);

    // week containing Feb 1st starts in January
    assert_eq!(weeks[0].start, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
    // leap February: last week contains the 29th
    let last = weeks.last().unwrap();
    assert_eq!(last.start, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
    assert_eq!(last.end, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    assert_eq!(weeks.len(), 5);
}

#[test]
fn weeks_pick_up_assignments_by_monday() {
    let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    let assignments = vec![assignment(
        monday,
        vec![item(1, DayOfWeek::Monday, MealType::Dinner)],
    )];

    let weeks = month_weeks(2024, 1, &assignments);
    assert!(weeks[0].assignment.is_none());
    let assigned = weeks.iter().find(|w| w.start == monday).unwrap();
    assert_eq!(assigned.assignment.as_ref().unwrap().meal_plan.name, "Protein week");
    assert_eq!(weeks.iter().filter(|w| w.assignment.is_some()).count(), 1);
}

#[test]
fn assignment_mondays_align_with_the_calendar() {
    let wednesday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let assignments = vec![assignment(monday_of(wednesday), Vec::new())];
    assert!(assignments[0].starts_on_monday());

    let weeks = month_weeks(2024, 1, &assignments);
    let assigned: Vec<_> = weeks.iter().filter(|w| w.assignment.is_some()).collect();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].start, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
}

#[test]
fn month_stats_scale_and_deduplicate() {
    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let assignments = vec![assignment(
        monday,
        vec![
            item(1, DayOfWeek::Monday, MealType::Lunch),
            item(2, DayOfWeek::Tuesday, MealType::Dinner),
        ],
    )];

    let weeks = month_weeks(2024, 1, &assignments);
    let stats = month_stats(&weeks);

    // two items, one distinct recipe, 150 g of chicken each
    assert_eq!(stats.unique_recipes, 1);
    assert_eq!(stats.assigned_weeks, 1);
    assert_eq!(stats.total_weeks, 5);
    assert_eq!(stats.nutrients.calories, 495.0);
    assert_eq!(stats.nutrients.protein, 93.0);
}

#[test]
fn empty_month_has_empty_stats() {
    let weeks = month_weeks(2024, 6, &[]);
    let stats = month_stats(&weeks);
    assert_eq!(stats.assigned_weeks, 0);
    assert_eq!(stats.unique_recipes, 0);
    assert!(stats.nutrients.is_empty());
    assert_eq!(stats.total_weeks, weeks.len());
}
