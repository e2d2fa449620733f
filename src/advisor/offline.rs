//! Advice available without a completion API key.

use rand::Rng;
use rand::seq::SliceRandom;
use strsim::jaro_winkler;

use crate::advisor::responses::{FoodProfile, Substitute, SubstitutionReport};
use crate::models::{BudgetTier, Goal, UserProfile};
use crate::planner::{compute_metrics, target_calories};

/// Minimum Jaro-Winkler similarity for a food name to match the local table.
pub const FOOD_MATCH_THRESHOLD: f64 = 0.8;

/// Cheaper swaps for foods that appear in the budget tables.
pub static LOCAL_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("Salmon", &["Sardines", "Canned tuna"]),
    ("Quinoa", &["Brown rice"]),
    ("Tricolor quinoa", &["Brown rice"]),
    ("Nuts", &["Peanuts"]),
    ("Premium nut mix", &["Peanuts"]),
    ("Filet mignon", &["Chicken breast", "Lean ground beef"]),
    ("Cod", &["Tilapia", "Sardines"]),
    ("Greek yogurt", &["Plain yogurt"]),
    ("Turkey breast", &["Chicken breast"]),
];

fn goal_focus(goal: Option<Goal>) -> (&'static str, &'static str) {
    match goal {
        Some(Goal::Lose) => (
            "weight loss",
            "a controlled calorie deficit with lean proteins",
        ),
        Some(Goal::Gain) => (
            "muscle gain",
            "a calorie surplus focused on protein and complex carbohydrates",
        ),
        _ => ("maintenance", "nutritional balance"),
    }
}

fn budget_focus(budget: Option<BudgetTier>) -> &'static str {
    match budget {
        Some(BudgetTier::Low) => "budget options like eggs, chicken and seasonal vegetables",
        Some(BudgetTier::Medium) => "quality proteins and complex carbohydrates",
        Some(BudgetTier::High) => "premium and organic foods",
        None => "foods that fit your budget",
    }
}

fn goal_tip(goal: Option<Goal>) -> &'static str {
    match goal {
        Some(Goal::Lose) => "To lose weight, keep a deficit of 300-500 kcal/day",
        Some(Goal::Gain) => "To gain mass, add 300-500 kcal/day",
        _ => "To maintain, balance the calories you eat and burn",
    }
}

/// Every canned reply that applies to this profile.
///
/// The calorie estimate applies the profile's activity multiplier to the BMR
/// rather than a flat 1.5 factor, and ignores the goal.
pub fn canned_replies(profile: &UserProfile) -> Vec<String> {
    let (goal_name, goal_advice) = goal_focus(profile.goal);
    let mut replies = vec![
        format!(
            "Based on your profile ({}), I recommend focusing on {}. \
             I can adjust your plan to your budget preference!",
            goal_name, goal_advice
        ),
        format!(
            "Great question! For your goal, keep a balanced diet with {}. \
             That will help you reach your targets in a healthy way!",
            budget_focus(profile.known_budget())
        ),
        "For cheaper swaps you can trade: Salmon -> Sardines or canned tuna | \
         Quinoa -> Brown rice | Nuts -> Peanuts. All keep good nutritional value!"
            .to_string(),
        format!(
            "Important tip: {}. Hydration matters too, drink at least 2L of water a day!",
            goal_tip(profile.goal)
        ),
    ];

    let bmr = compute_metrics(profile).bmr;
    if bmr > 0.0 {
        let daily = target_calories(bmr, profile.activity_level, None);
        replies.push(format!(
            "With a BMR of {:.0} kcal and your activity level, you need about {} kcal/day. \
             I'll help you spread that across your meals!",
            bmr, daily
        ));
    }

    replies
}

/// Pick one canned reply.
pub fn offline_chat_reply<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> String {
    canned_replies(profile)
        .choose(rng)
        .cloned()
        .unwrap_or_default()
}

/// Best local table match for a food name, with its similarity score.
pub fn match_local_food(food: &str) -> Option<(&'static str, &'static [&'static str], f64)> {
    let needle = food.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    LOCAL_SUBSTITUTIONS
        .iter()
        .map(|(name, alts)| (*name, *alts, jaro_winkler(&name.to_lowercase(), &needle)))
        .filter(|(_, _, score)| *score > FOOD_MATCH_THRESHOLD)
        .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
}

/// Substitutions from the local table, shaped like a model answer.
pub fn offline_substitutions(food: &str) -> Option<SubstitutionReport> {
    let (name, alternatives, _) = match_local_food(food)?;

    Some(SubstitutionReport {
        original: FoodProfile {
            name: name.to_string(),
            ..Default::default()
        },
        alternatives: alternatives
            .iter()
            .map(|alt| Substitute {
                name: alt.to_string(),
                savings: "Cheaper".to_string(),
                nutritional_comparison: "Keeps good nutritional value".to_string(),
                ..Default::default()
            })
            .collect(),
        recommendation: format!("Try {} instead of {}.", alternatives[0], name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bmr_reply_only_with_biometrics() {
        let mut profile = UserProfile::default();
        assert_eq!(canned_replies(&profile).len(), 4);

        profile.weight_kg = Some(70.0);
        profile.height_cm = Some(175.0);
        profile.age = Some(30);
        profile.gender = Some(Gender::Male);
        profile.activity_level = Some(ActivityLevel::Sedentary);
        let replies = canned_replies(&profile);
        assert_eq!(replies.len(), 5);
        // 1695.667 * 1.2
        assert!(replies[4].contains("about 2035 kcal/day"));
    }

    #[test]
    fn test_reply_is_deterministic_for_seed() {
        let profile = UserProfile {
            goal: Some(Goal::Gain),
            ..Default::default()
        };
        let a = offline_chat_reply(&profile, &mut StdRng::seed_from_u64(7));
        let b = offline_chat_reply(&profile, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(canned_replies(&profile).contains(&a));
    }

    #[test]
    fn test_fuzzy_food_match() {
        let (name, alts, _) = match_local_food("salmon").unwrap();
        assert_eq!(name, "Salmon");
        assert_eq!(alts, &["Sardines", "Canned tuna"]);

        let (name, _, _) = match_local_food("Filet minon").unwrap();
        assert_eq!(name, "Filet mignon");

        assert!(match_local_food("chocolate").is_none());
        assert!(match_local_food("  ").is_none());
    }

    #[test]
    fn test_offline_substitutions_report() {
        let report = offline_substitutions("quinoa").unwrap();
        assert_eq!(report.original.name, "Quinoa");
        assert_eq!(report.alternatives.len(), 1);
        assert_eq!(report.alternatives[0].name, "Brown rice");
        assert_eq!(report.recommendation, "Try Brown rice instead of Quinoa.");
    }
}
