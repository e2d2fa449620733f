//! Prompt templates for the completion model.
//!
//! Every builder is a pure function of its inputs.

use std::fmt::Display;

use serde::Serialize;

use crate::advisor::client::CompletionRequest;
use crate::error::Result;
use crate::models::{ChatMessage, ChatRole, UserProfile};

const NOT_PROVIDED: &str = "not provided";

pub const WEEKLY_PLAN_TEMPERATURE: f32 = 0.7;
pub const SHOPPING_LIST_TEMPERATURE: f32 = 0.7;
pub const REMINDERS_TEMPERATURE: f32 = 0.8;
pub const SUBSTITUTIONS_TEMPERATURE: f32 = 0.7;
pub const CHAT_TEMPERATURE: f32 = 0.8;
pub const CHAT_MAX_TOKENS: u32 = 500;
/// Most recent user/assistant exchanges replayed to the model on each chat turn.
pub const CHAT_HISTORY_TURNS: usize = 10;

fn or_missing<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}

fn name_or_missing(profile: &UserProfile) -> &str {
    let name = profile.name.trim();
    if name.is_empty() { NOT_PROVIDED } else { name }
}

/// Full profile as a bullet list.
pub fn describe_profile(profile: &UserProfile) -> String {
    format!(
        "- Name: {}\n\
         - Age: {} years\n\
         - Weight: {} kg\n\
         - Height: {} cm\n\
         - Gender: {}\n\
         - Activity level: {}\n\
         - Goal: {}\n\
         - Budget: {}\n\
         - Restrictions: {}",
        name_or_missing(profile),
        or_missing(profile.age),
        or_missing(profile.weight_kg),
        or_missing(profile.height_cm),
        or_missing(profile.gender),
        or_missing(profile.activity_level),
        or_missing(profile.goal),
        or_missing(profile.budget.as_ref()),
        profile.restrictions_text(),
    )
}

fn json_request(system: &str, prompt: String, temperature: f32) -> CompletionRequest {
    CompletionRequest::new(vec![
        ChatMessage::system(format!("{} Always answer with valid JSON.", system)),
        ChatMessage::user(prompt),
    ])
    .with_temperature(temperature)
    .json()
}

/// Seven-day plan, four meals a day.
pub fn weekly_plan_request(profile: &UserProfile) -> CompletionRequest {
    let prompt = format!(
        r#"Create a detailed weekly meal plan for:

Profile:
{profile}

Plan 7 days with 4 meals per day (breakfast, lunch, snack, dinner).
For each meal include:
- Specific foods
- Quantities in grams
- Approximate calories
- Macronutrients (protein, carbs, fat)
- Estimated cost

Return ONLY valid JSON in this format:
{{
  "weeklyPlan": [
    {{
      "day": "Monday",
      "meals": [
        {{
          "name": "Breakfast",
          "foods": [{{"name": "Oats", "quantity": "50g", "calories": 190}}],
          "totalCalories": 350,
          "macros": {{"protein": 15, "carbs": 45, "fat": 8}},
          "cost": 4.50
        }}
      ],
      "totalDayCalories": 2000,
      "totalDayCost": 25.00
    }}
  ],
  "totalWeekCost": 175.00,
  "nutritionalSummary": "Nutritional summary of the week"
}}"#,
        profile = describe_profile(profile)
    );

    json_request(
        "You are a nutritionist who builds personalized, affordable meal plans.",
        prompt,
        WEEKLY_PLAN_TEMPERATURE,
    )
}

/// Shopping list for a plan (weekly or daily), grouped by category.
pub fn shopping_list_request<P: Serialize>(plan: &P, profile: &UserProfile) -> Result<CompletionRequest> {
    let plan_json = serde_json::to_string_pretty(plan)?;
    let prompt = format!(
        r#"Based on this meal plan, create an optimized shopping list:

{plan_json}

Budget: {budget}

Group the ingredients by category (Proteins, Carbohydrates, Vegetables, Fruits, Dairy, Other).
For each item include:
- Product name
- Total quantity needed
- Estimated unit price
- Total price
- Where to buy it cheaper (supermarket, street market, wholesale)

Return ONLY valid JSON in this format:
{{
  "categories": [
    {{
      "name": "Proteins",
      "items": [
        {{
          "product": "Chicken breast",
          "quantity": "2kg",
          "unitPrice": 15.90,
          "totalPrice": 31.80,
          "whereToBuy": "Wholesale or butcher"
        }}
      ],
      "categoryTotal": 80.00
    }}
  ],
  "totalCost": 175.00,
  "savingTips": ["Tip 1", "Tip 2"],
  "alternatives": [
    {{
      "original": "Salmon",
      "cheaper": "Sardines or canned tuna",
      "savings": "Up to 60% cheaper"
    }}
  ]
}}"#,
        budget = or_missing(profile.budget.as_ref()),
    );

    Ok(json_request(
        "You are an expert in smart, economical grocery shopping.",
        prompt,
        SHOPPING_LIST_TEMPERATURE,
    ))
}

/// Meal, hydration, exercise and motivation reminders.
pub fn reminders_request<P: Serialize>(profile: &UserProfile, plan: &P) -> Result<CompletionRequest> {
    let plan_json = serde_json::to_string_pretty(plan)?;
    let prompt = format!(
        r#"Create personalized reminders for this user:

Profile:
- Name: {name}
- Goal: {goal}
- Activity level: {activity}

Meal plan:
{plan_json}

Create reminders for:
1. Meal times (based on the plan)
2. Hydration (based on the activity level)
3. Exercise (if applicable)
4. Motivational tips
5. Meal preparation

Return ONLY valid JSON in this format:
{{
  "reminders": [
    {{
      "type": "meal",
      "title": "Breakfast",
      "message": "Breakfast time! Today: oats with banana",
      "time": "07:00",
      "daysOfWeek": ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
      "icon": "☕"
    }},
    {{
      "type": "hydration",
      "title": "Hydration",
      "message": "Drink a glass of water! Goal: 2L per day",
      "time": "10:00",
      "daysOfWeek": ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
      "icon": "💧"
    }}
  ],
  "motivationalTips": [
    "You are on the right track! Keep going",
    "Every healthy meal is a step toward your goal"
  ]
}}"#,
        name = name_or_missing(profile),
        goal = or_missing(profile.goal),
        activity = or_missing(profile.activity_level),
    );

    Ok(json_request(
        "You are a health coach who writes motivating, personalized reminders.",
        prompt,
        REMINDERS_TEMPERATURE,
    ))
}

/// Three to five alternatives for one food.
pub fn substitutions_request(food: &str, reason: &str, profile: &UserProfile) -> CompletionRequest {
    let prompt = format!(
        r#"Suggest smart substitutions for this food:

Food: {food}
Reason for substitution: {reason}
User profile:
- Goal: {goal}
- Budget: {budget}
- Restrictions: {restrictions}

Give 3-5 alternatives considering:
1. Similar nutritional value
2. Cost (cheaper or similar)
3. Availability
4. Taste and preparation

Return ONLY valid JSON in this format:
{{
  "original": {{
    "name": "Salmon",
    "calories": 200,
    "protein": 25,
    "cost": 45.00,
    "benefits": ["Rich in omega-3", "High protein"]
  }},
  "alternatives": [
    {{
      "name": "Canned sardines",
      "calories": 180,
      "protein": 24,
      "cost": 8.00,
      "savings": "82% cheaper",
      "nutritionalComparison": "Similar omega-3 and protein",
      "howToPrepare": "Eat straight from the can or grilled",
      "availability": "Easy to find in any supermarket"
    }}
  ],
  "recommendation": "Best alternative for cost and benefit"
}}"#,
        food = food.trim(),
        reason = reason.trim(),
        goal = or_missing(profile.goal),
        budget = or_missing(profile.budget.as_ref()),
        restrictions = profile.restrictions_text(),
    );

    json_request(
        "You are a nutritionist specialized in smart food substitutions.",
        prompt,
        SUBSTITUTIONS_TEMPERATURE,
    )
}

/// System prompt for the conversational assistant.
pub fn chat_system_prompt(profile: &UserProfile) -> String {
    format!(
        "You are NutriMatch AI, a virtual nutritionist specialized in:\n\
         - Building personalized meal plans\n\
         - Suggesting food substitutions\n\
         - Calculating calories and macronutrients\n\
         - Saving money on groceries\n\
         - Motivating users to reach their goals\n\
         \n\
         User profile:\n\
         - Name: {}\n\
         - Age: {} years\n\
         - Weight: {} kg\n\
         - Height: {} cm\n\
         - Goal: {}\n\
         - Budget: {}\n\
         - Restrictions: {}\n\
         \n\
         Be friendly and motivating, and always give practical, science-based information.",
        name_or_missing(profile),
        or_missing(profile.age),
        or_missing(profile.weight_kg),
        or_missing(profile.height_cm),
        or_missing(profile.goal),
        or_missing(profile.budget.as_ref()),
        profile.restrictions_text(),
    )
}

/// System prompt, recent turns, then the new message.
///
/// Only the last `CHAT_HISTORY_TURNS` exchanges are replayed. Stored system turns are dropped.
pub fn chat_request(profile: &UserProfile, history: &[ChatMessage], message: &str) -> CompletionRequest {
    let prior: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.role != ChatRole::System)
        .collect();
    let recent = &prior[prior.len().saturating_sub(CHAT_HISTORY_TURNS * 2)..];

    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(ChatMessage::system(chat_system_prompt(profile)));
    messages.extend(
        recent
            .iter()
            .map(|m| ChatMessage::new(m.role, m.content.clone())),
    );
    messages.push(ChatMessage::user(message.trim()));

    CompletionRequest::new(messages)
        .with_temperature(CHAT_TEMPERATURE)
        .with_max_tokens(CHAT_MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, Goal};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ana".to_string(),
            age: Some(28),
            weight_kg: Some(62.5),
            goal: Some(Goal::Lose),
            budget: Some(BudgetTier::Low.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_describe_profile_marks_missing_fields() {
        let text = describe_profile(&profile());
        assert!(text.contains("- Name: Ana"));
        assert!(text.contains("- Weight: 62.5 kg"));
        assert!(text.contains("- Height: not provided cm"));
        assert!(text.contains("- Goal: lose"));
        assert!(text.contains("- Restrictions: None"));
    }

    #[test]
    fn test_weekly_plan_request_shape() {
        let request = weekly_plan_request(&profile());
        assert!(request.json_mode);
        assert_eq!(request.temperature, WEEKLY_PLAN_TEMPERATURE);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert!(request.messages[1].content.contains("\"weeklyPlan\""));
        assert!(request.messages[1].content.contains("- Budget: low"));
    }

    #[test]
    fn test_substitutions_request_includes_food_and_reason() {
        let request = substitutions_request(" Salmon ", "too expensive", &profile());
        let prompt = &request.messages[1].content;
        assert!(prompt.contains("Food: Salmon\n"));
        assert!(prompt.contains("Reason for substitution: too expensive"));
    }

    #[test]
    fn test_chat_request_orders_history() {
        let history = vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello Ana!"),
            ChatMessage::system("stale"),
        ];
        let request = chat_request(&profile(), &history, "  What about dinner? ");

        let roles: Vec<ChatRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::System, ChatRole::User, ChatRole::Assistant, ChatRole::User]
        );
        assert_eq!(request.messages[3].content, "What about dinner?");
        assert_eq!(request.max_tokens, Some(CHAT_MAX_TOKENS));
        assert!(!request.json_mode);
    }

    #[test]
    fn test_chat_request_keeps_recent_turns_only() {
        let history: Vec<ChatMessage> = (0..30)
            .flat_map(|i| {
                [
                    ChatMessage::user(format!("question {}", i)),
                    ChatMessage::assistant(format!("answer {}", i)),
                ]
            })
            .collect();
        let request = chat_request(&profile(), &history, "latest");

        assert_eq!(request.messages.len(), CHAT_HISTORY_TURNS * 2 + 2);
        assert_eq!(request.messages[1].content, "question 20");
        assert_eq!(request.messages[CHAT_HISTORY_TURNS * 2].content, "answer 29");
        assert_eq!(request.messages[CHAT_HISTORY_TURNS * 2 + 1].content, "latest");
    }
}
