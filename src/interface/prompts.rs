use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};

use crate::error::{NutriError, Result};
use crate::models::{ActivityLevel, BudgetTier, Gender, Goal, UserProfile};

/// Prompt for a positive number, offering the current value as default.
fn prompt_positive<T>(prompt: &str, current: Option<T>) -> Result<T>
where
    T: FromStr + PartialOrd + Default + ToString,
{
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(value) = current {
        input = input.default(value.to_string());
    }
    let text = input.interact_text()?;

    let value: T = text
        .trim()
        .parse()
        .map_err(|_| NutriError::InvalidInput(format!("'{}' is not a number", text.trim())))?;
    if value <= T::default() {
        return Err(NutriError::InvalidInput(format!(
            "{} must be greater than zero",
            prompt
        )));
    }
    Ok(value)
}

/// Select one of `options`, preselecting `current` when present.
fn select_one<T: Copy + PartialEq>(
    prompt: &str,
    options: &[T],
    labels: &[&str],
    current: Option<T>,
) -> Result<T> {
    let default = current
        .and_then(|c| options.iter().position(|o| *o == c))
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt(prompt)
        .items(labels)
        .default(default)
        .interact()?;
    Ok(options[selection])
}

/// Walk the user through every profile field.
///
/// Existing values are offered as defaults.
pub fn collect_profile(existing: Option<&UserProfile>) -> Result<UserProfile> {
    let current = existing.cloned().unwrap_or_default();

    let mut name_input = Input::<String>::new().with_prompt("Your name");
    if !current.name.is_empty() {
        name_input = name_input.default(current.name.clone());
    }
    let name = name_input.interact_text()?.trim().to_string();

    let age: u32 = prompt_positive("Age (years)", current.age)?;
    let weight_kg: f64 = prompt_positive("Weight (kg)", current.weight_kg)?;
    let height_cm: f64 = prompt_positive("Height (cm)", current.height_cm)?;

    let gender = select_one(
        "Gender",
        &[Gender::Male, Gender::Female],
        &["Male", "Female"],
        current.gender,
    )?;

    let activity_labels: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.description()).collect();
    let activity_level = select_one(
        "Activity level",
        &ActivityLevel::ALL,
        &activity_labels,
        current.activity_level,
    )?;

    let goal_labels: Vec<&str> = Goal::ALL.iter().map(|g| g.description()).collect();
    let goal = select_one("Goal", &Goal::ALL, &goal_labels, current.goal)?;

    let budget_labels: Vec<&str> = BudgetTier::ALL.iter().map(|b| b.description()).collect();
    let budget = select_one("Budget", &BudgetTier::ALL, &budget_labels, current.known_budget())?;

    let restrictions: String = Input::new()
        .with_prompt("Dietary restrictions (optional)")
        .default(current.restrictions.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let restrictions = Some(restrictions.trim().to_string()).filter(|r| !r.is_empty());

    Ok(UserProfile {
        name,
        age: Some(age),
        weight_kg: Some(weight_kg),
        height_cm: Some(height_cm),
        gender: Some(gender),
        activity_level: Some(activity_level),
        goal: Some(goal),
        budget: Some(budget.into()),
        restrictions,
    })
}

/// Prompt for a chat message. Empty input means "done".
pub fn prompt_chat_message() -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("You (Enter to finish)")
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
