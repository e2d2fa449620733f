use crate::error::Result;
use crate::models::{ActivityLevel, Goal, Meal, MealPlan, MealSlot, UserProfile};
use crate::planner::constants::*;
use crate::planner::metrics::compute_metrics;

/// Daily calorie target: `round(bmr × activity × goal)`.
///
/// Missing activity level or goal use the default multipliers.
pub fn target_calories(bmr: f64, activity: Option<ActivityLevel>, goal: Option<Goal>) -> i64 {
    (bmr * activity_multiplier(activity) * goal_multiplier(goal)).round() as i64
}

/// Split a daily target into per-slot shares, in serving order.
///
/// Each share is rounded independently, so the sum can differ from the
/// target by a kcal or so.
pub fn distribute_calories(target: i64) -> [(MealSlot, i64); 4] {
    MealSlot::ALL.map(|slot| (slot, (target as f64 * slot_share(slot)).round() as i64))
}

/// Build the daily plan for a profile.
///
/// Foods and costs come from the fixed table of the profile's budget tier;
/// calories come from the BMR and multipliers. Fails when the tier is
/// missing or unrecognized.
pub fn synthesize_meal_plan(profile: &UserProfile) -> Result<MealPlan> {
    let tier = profile.budget_tier()?;
    let table = meal_table(tier);

    let bmr = compute_metrics(profile).bmr;
    let target = target_calories(bmr, profile.activity_level, profile.goal);

    let meals: Vec<Meal> = table
        .iter()
        .zip(distribute_calories(target))
        .map(|(entry, (slot, calories))| Meal {
            name: slot.label().to_string(),
            foods: entry.foods.iter().map(|f| f.to_string()).collect(),
            calories,
            cost: entry.cost,
            macros: slot_macros(slot),
        })
        .collect();

    let total_cost = table.iter().map(|e| e.cost).sum();

    Ok(MealPlan {
        target_calories: target,
        meals,
        total_cost,
        budget_tier: tier,
    })
}
