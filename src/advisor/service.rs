use serde::Serialize;
use tracing::{debug, info};

use crate::advisor::client::CompletionClient;
use crate::advisor::responses::{
    ReminderSet, ShoppingList, SubstitutionReport, WeeklyPlan, parse_payload,
};
use crate::advisor::templates;
use crate::error::{NutriError, Result};
use crate::models::{ChatMessage, UserProfile};

/// Ask the model for a seven-day plan.
pub fn weekly_plan<C: CompletionClient + ?Sized>(
    client: &C,
    profile: &UserProfile,
) -> Result<WeeklyPlan> {
    let content = client.complete(&templates::weekly_plan_request(profile))?;
    let plan: WeeklyPlan = parse_payload(&content)?;
    info!(days = plan.weekly_plan.len(), "Weekly plan generated");
    Ok(plan)
}

/// Ask the model for a shopping list covering `plan`.
pub fn shopping_list<C: CompletionClient + ?Sized, P: Serialize>(
    client: &C,
    plan: &P,
    profile: &UserProfile,
) -> Result<ShoppingList> {
    let content = client.complete(&templates::shopping_list_request(plan, profile)?)?;
    let list: ShoppingList = parse_payload(&content)?;
    info!(categories = list.categories.len(), "Shopping list generated");
    Ok(list)
}

/// Ask the model for reminders built around `plan`.
pub fn reminders<C: CompletionClient + ?Sized, P: Serialize>(
    client: &C,
    profile: &UserProfile,
    plan: &P,
) -> Result<ReminderSet> {
    let content = client.complete(&templates::reminders_request(profile, plan)?)?;
    let set: ReminderSet = parse_payload(&content)?;
    info!(reminders = set.reminders.len(), "Reminders generated");
    Ok(set)
}

/// Ask the model for alternatives to `food`.
pub fn substitutions<C: CompletionClient + ?Sized>(
    client: &C,
    food: &str,
    reason: &str,
    profile: &UserProfile,
) -> Result<SubstitutionReport> {
    if food.trim().is_empty() {
        return Err(NutriError::InvalidInput("food name is empty".to_string()));
    }
    let content = client.complete(&templates::substitutions_request(food, reason, profile))?;
    parse_payload(&content)
}

/// One conversational turn. Returns the assistant's reply text.
pub fn chat<C: CompletionClient + ?Sized>(
    client: &C,
    profile: &UserProfile,
    history: &[ChatMessage],
    message: &str,
) -> Result<String> {
    if message.trim().is_empty() {
        return Err(NutriError::InvalidInput("message is empty".to_string()));
    }
    debug!(history = history.len(), "Sending chat turn");
    let reply = client.complete(&templates::chat_request(profile, history, message))?;
    Ok(reply.trim().to_string())
}
