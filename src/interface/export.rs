use std::path::Path;

use crate::error::Result;
use crate::models::MealPlan;

/// Write a daily plan as CSV, one row per meal.
pub fn write_plan_csv(plan: &MealPlan, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "meal", "foods", "calories", "cost", "protein_g", "carbs_g", "fat_g", "budget",
    ])?;

    for meal in &plan.meals {
        wtr.write_record([
            meal.name.clone(),
            meal.foods.join("; "),
            meal.calories.to_string(),
            format!("{:.2}", meal.cost),
            format!("{:.0}", meal.macros.protein),
            format!("{:.0}", meal.macros.carbs),
            format!("{:.0}", meal.macros.fat),
            plan.budget_tier.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
