//! Typed payloads returned by the completion model.
//!
//! Every field defaults so a partial answer still parses. Rendering code
//! skips what is empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};
use crate::models::Macros;

/// Parse model output as JSON.
///
/// Surrounding markdown code fences are stripped. Empty content is an error.
pub fn parse_payload<T: DeserializeOwned>(content: &str) -> Result<T> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(NutriError::Completion("model returned no JSON".to_string()));
    }
    serde_json::from_str(body).map_err(|e| {
        NutriError::Completion(format!("model returned malformed JSON: {}", e))
    })
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // An info string ("json") either fills the first line or precedes the body.
    let body = match rest.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with(['{', '[']) => body,
        _ => rest.trim_start().strip_prefix("json").unwrap_or(rest),
    };
    body.trim()
}

// ─────────────────────────────────────────────────────────────────────────────
// Weekly plan
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyPlan {
    pub weekly_plan: Vec<PlanDay>,
    pub total_week_cost: f64,
    pub nutritional_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanDay {
    pub day: String,
    pub meals: Vec<PlannedMeal>,
    pub total_day_calories: f64,
    pub total_day_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannedMeal {
    pub name: String,
    pub foods: Vec<PortionedFood>,
    pub total_calories: f64,
    pub macros: Macros,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortionedFood {
    pub name: String,
    pub quantity: String,
    pub calories: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shopping list
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingList {
    pub categories: Vec<ShoppingCategory>,
    pub total_cost: f64,
    pub saving_tips: Vec<String>,
    pub alternatives: Vec<CheaperAlternative>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingCategory {
    pub name: String,
    pub items: Vec<ShoppingItem>,
    pub category_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingItem {
    pub product: String,
    pub quantity: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub where_to_buy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheaperAlternative {
    pub original: String,
    pub cheaper: String,
    pub savings: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Reminders
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderSet {
    pub reminders: Vec<Reminder>,
    pub motivational_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reminder {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub time: String,
    pub days_of_week: Vec<String>,
    pub icon: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Substitutions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionReport {
    pub original: FoodProfile,
    pub alternatives: Vec<Substitute>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodProfile {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub cost: f64,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Substitute {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub cost: f64,
    pub savings: String,
    pub nutritional_comparison: String,
    pub how_to_prepare: String,
    pub availability: String,
}
