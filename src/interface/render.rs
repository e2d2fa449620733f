use chrono::{DateTime, Utc};

use crate::advisor::{ReminderSet, ShoppingList, SubstitutionReport, WeeklyPlan};
use crate::models::{MealPlan, MetabolicMetrics, ProgressEntry, UserProfile};
use crate::state::{Account, Feature};

/// Display BMI, its band, and BMR.
pub fn display_metrics(profile: &UserProfile, metrics: &MetabolicMetrics) {
    println!();
    println!("=== Body Metrics{} ===", name_suffix(profile));
    println!();

    match metrics.band() {
        Some(band) => println!("BMI: {:.1} ({})", metrics.bmi, band.label()),
        None => println!("BMI: not enough data (need weight and height)"),
    }

    if metrics.bmr > 0.0 {
        println!("BMR: {:.0} kcal/day", metrics.bmr);
    } else {
        println!("BMR: not enough data (need weight, height, age and gender)");
    }
    println!();
}

fn name_suffix(profile: &UserProfile) -> String {
    let name = profile.name.trim();
    if name.is_empty() {
        String::new()
    } else {
        format!(" for {}", name)
    }
}

/// Display a daily meal plan as a table.
pub fn display_meal_plan(plan: &MealPlan) {
    println!();
    println!(
        "=== Daily Meal Plan ({}) ===",
        plan.budget_tier.description()
    );
    println!(
        "{} kcal/day | {:.2}/day",
        plan.target_calories, plan.total_cost
    );
    println!();

    let max_name_len = plan.meals.iter().map(|m| m.name.len()).max().unwrap_or(10);

    for meal in &plan.meals {
        println!(
            "{:<width$}  {:>5} kcal  {:>6.2}  P:{:.0}g C:{:.0}g F:{:.0}g",
            meal.name,
            meal.calories,
            meal.cost,
            meal.macros.protein,
            meal.macros.carbs,
            meal.macros.fat,
            width = max_name_len
        );
        println!("{:<width$}  {}", "", meal.foods.join(", "), width = max_name_len);
    }

    let macros = plan.total_macros();
    println!();
    println!("--- Summary ---");
    println!("Allocated calories: {}", plan.allocated_calories());
    println!(
        "Macros: P:{:.0}g C:{:.0}g F:{:.0}g",
        macros.protein, macros.carbs, macros.fat
    );
    println!("Total cost: {:.2}", plan.total_cost);
    println!();
}

pub fn display_weekly_plan(plan: &WeeklyPlan) {
    if plan.weekly_plan.is_empty() {
        println!("The advisor returned an empty weekly plan.");
        return;
    }

    println!();
    println!("=== Weekly Meal Plan ===");

    for day in &plan.weekly_plan {
        println!();
        println!(
            "{} - {:.0} kcal, {:.2}",
            day.day, day.total_day_calories, day.total_day_cost
        );
        for meal in &day.meals {
            let foods: Vec<String> = meal
                .foods
                .iter()
                .map(|f| {
                    if f.quantity.is_empty() {
                        f.name.clone()
                    } else {
                        format!("{} ({})", f.name, f.quantity)
                    }
                })
                .collect();
            println!(
                "  {:<10} {:>5.0} kcal  {:>6.2}  {}",
                meal.name,
                meal.total_calories,
                meal.cost,
                foods.join(", ")
            );
        }
    }

    println!();
    println!("Total week cost: {:.2}", plan.total_week_cost);
    if !plan.nutritional_summary.is_empty() {
        println!("{}", plan.nutritional_summary);
    }
    println!();
}

pub fn display_shopping_list(list: &ShoppingList) {
    println!();
    println!("=== Shopping List ===");

    for category in &list.categories {
        println!();
        println!("{} ({:.2})", category.name, category.category_total);
        for item in &category.items {
            let place = if item.where_to_buy.is_empty() {
                String::new()
            } else {
                format!("  [{}]", item.where_to_buy)
            };
            println!(
                "  - {} {} @ {:.2} = {:.2}{}",
                item.product, item.quantity, item.unit_price, item.total_price, place
            );
        }
    }

    println!();
    println!("Total: {:.2}", list.total_cost);

    if !list.saving_tips.is_empty() {
        println!();
        println!("Saving tips:");
        for tip in &list.saving_tips {
            println!("  * {}", tip);
        }
    }

    if !list.alternatives.is_empty() {
        println!();
        println!("Cheaper alternatives:");
        for alt in &list.alternatives {
            println!("  {} -> {} ({})", alt.original, alt.cheaper, alt.savings);
        }
    }
    println!();
}

pub fn display_reminders(set: &ReminderSet) {
    println!();
    println!("=== Reminders ===");
    println!();

    for reminder in &set.reminders {
        let days = if reminder.days_of_week.len() == 7 {
            "every day".to_string()
        } else {
            reminder.days_of_week.join(", ")
        };
        println!(
            "{:>5}  {} {} ({}, {})",
            reminder.time, reminder.icon, reminder.title, reminder.kind, days
        );
        println!("       {}", reminder.message);
    }

    if !set.motivational_tips.is_empty() {
        println!();
        for tip in &set.motivational_tips {
            println!("  * {}", tip);
        }
    }
    println!();
}

pub fn display_substitutions(report: &SubstitutionReport) {
    println!();
    println!("=== Substitutions for {} ===", report.original.name);
    if !report.original.benefits.is_empty() {
        println!("Benefits: {}", report.original.benefits.join(", "));
    }
    println!();

    for alt in &report.alternatives {
        if alt.calories > 0.0 || alt.cost > 0.0 {
            println!(
                "- {}: {:.0} kcal, {:.0}g protein, {:.2} ({})",
                alt.name, alt.calories, alt.protein, alt.cost, alt.savings
            );
        } else {
            println!("- {} ({})", alt.name, alt.savings);
        }
        for detail in [
            &alt.nutritional_comparison,
            &alt.how_to_prepare,
            &alt.availability,
        ] {
            if !detail.is_empty() {
                println!("    {}", detail);
            }
        }
    }

    if !report.recommendation.is_empty() {
        println!();
        println!("Recommendation: {}", report.recommendation);
    }
    println!();
}

pub fn display_chat_reply(reply: &str) {
    println!();
    println!("NutriMatch: {}", reply);
    println!();
}

pub fn display_progress(entries: &[ProgressEntry], change: Option<f64>) {
    if entries.is_empty() {
        println!("No progress entries yet. Use 'progress log <weight>'.");
        return;
    }

    println!();
    println!("=== Progress ===");
    println!();
    for entry in entries {
        let bmi = if entry.bmi > 0.0 {
            format!("BMI {:.1}", entry.bmi)
        } else {
            "BMI n/a".to_string()
        };
        let note = entry
            .note
            .as_deref()
            .map(|n| format!("  {}", n))
            .unwrap_or_default();
        println!("{}  {:>6.1} kg  {}{}", entry.date, entry.weight_kg, bmi, note);
    }

    if let Some(delta) = change {
        let sign = if delta > 0.0 { "+" } else { "" };
        println!();
        println!("Change since first entry: {}{:.1} kg", sign, delta);
    }
    println!();
}

/// Display the account tier and what is left this month.
pub fn display_usage(account: &Account, now: DateTime<Utc>) {
    if account.is_premium() {
        println!("Premium account: unlimited plans and AI consultations.");
        return;
    }
    for feature in [Feature::MealPlan, Feature::AiConsultation] {
        let left = account.remaining(feature, now).unwrap_or(0);
        println!(
            "Free plan: {}/{} {} left this month",
            left,
            feature.free_limit(),
            feature.label()
        );
    }
}
