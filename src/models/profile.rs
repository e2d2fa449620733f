use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{NutriError, Result};

/// Biological sex used to select the BMR formula.
///
/// Only two formulas exist; any non-"male" input maps to `Female`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NutriError::InvalidInput("gender is empty".to_string()));
        }
        if s.eq_ignore_ascii_case("male") {
            Ok(Gender::Male)
        } else {
            Ok(Gender::Female)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very-active",
        }
    }

    /// Human-readable description for prompts.
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light (exercise 1-3 days/week)",
            ActivityLevel::Moderate => "Moderate (exercise 3-5 days/week)",
            ActivityLevel::Active => "Active (exercise 6-7 days/week)",
            ActivityLevel::VeryActive => "Very active (hard exercise or physical job)",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == key)
            .ok_or_else(|| NutriError::UnknownActivityLevel(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Lose, Goal::Maintain, Goal::Gain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Goal::Lose => "Lose weight",
            Goal::Maintain => "Maintain weight",
            Goal::Gain => "Gain muscle mass",
        }
    }
}

impl FromStr for Goal {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Goal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == key)
            .ok_or_else(|| NutriError::UnknownGoal(s.to_string()))
    }
}

/// Cost band selecting the fixed meal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Low, BudgetTier::Medium, BudgetTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BudgetTier::Low => "Economy",
            BudgetTier::Medium => "Intermediate",
            BudgetTier::High => "Premium",
        }
    }
}

impl FromStr for BudgetTier {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        BudgetTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == key)
            .ok_or_else(|| NutriError::UnknownBudgetTier(s.to_string()))
    }
}

/// Budget as stored in a profile: a known tier, or raw text parsed on use.
///
/// Unrecognized text survives a load/save cycle so only meal planning
/// fails on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetSetting {
    Tier(BudgetTier),
    Unrecognized(String),
}

impl BudgetSetting {
    pub fn as_str(&self) -> &str {
        match self {
            BudgetSetting::Tier(tier) => tier.as_str(),
            BudgetSetting::Unrecognized(raw) => raw,
        }
    }

    pub fn tier(&self) -> Option<BudgetTier> {
        match self {
            BudgetSetting::Tier(tier) => Some(*tier),
            BudgetSetting::Unrecognized(raw) => raw.parse().ok(),
        }
    }
}

impl From<BudgetTier> for BudgetSetting {
    fn from(tier: BudgetTier) -> Self {
        BudgetSetting::Tier(tier)
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Gender, ActivityLevel, Goal, BudgetTier, BudgetSetting);

/// One person's biometric data and dietary preferences.
///
/// Biometric fields are optional: metric calculators return a 0.0 sentinel
/// when the inputs they need are absent. Unrecognized gender, activity level
/// or goal text in a stored profile loads as `None` (gender: `Female`) and the
/// planner falls back to default multipliers. Unrecognized budget text is kept
/// and rejected by `budget_tier`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub height_cm: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<Gender>,

    #[serde(default, deserialize_with = "lenient")]
    pub activity_level: Option<ActivityLevel>,

    #[serde(default, deserialize_with = "lenient")]
    pub goal: Option<Goal>,

    #[serde(default)]
    pub budget: Option<BudgetSetting>,

    #[serde(default)]
    pub restrictions: Option<String>,
}

impl UserProfile {
    /// Names of the biometric fields the BMR formula needs but are absent or non-positive.
    pub fn missing_biometrics(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.weight_kg.is_some_and(|w| w > 0.0) {
            missing.push("weight");
        }
        if !self.height_cm.is_some_and(|h| h > 0.0) {
            missing.push("height");
        }
        if !self.age.is_some_and(|a| a > 0) {
            missing.push("age");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        missing
    }

    /// Ensure the profile can drive a meal plan (biometrics plus a budget tier).
    pub fn require_plan_inputs(&self) -> Result<()> {
        let mut missing = self.missing_biometrics();
        if self.budget.is_none() {
            missing.push("budget");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(NutriError::IncompleteProfile(missing))
        }
    }

    /// The recognized budget tier, if any.
    pub fn known_budget(&self) -> Option<BudgetTier> {
        self.budget.as_ref().and_then(BudgetSetting::tier)
    }

    /// The tier a meal plan is built from.
    pub fn budget_tier(&self) -> Result<BudgetTier> {
        match &self.budget {
            Some(BudgetSetting::Tier(tier)) => Ok(*tier),
            Some(BudgetSetting::Unrecognized(raw)) => raw.parse(),
            None => Err(NutriError::MissingBudgetTier),
        }
    }

    /// Dietary restrictions, or "None" when blank.
    pub fn restrictions_text(&self) -> &str {
        match self.restrictions.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => "None",
        }
    }
}

/// Deserialize optional enum text, mapping unrecognized values to `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_non_male_is_female() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("other".parse::<Gender>().unwrap(), Gender::Female);
        assert!("  ".parse::<Gender>().is_err());
    }

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!(
            "very-active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "Very Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert!(matches!(
            "couch".parse::<ActivityLevel>(),
            Err(NutriError::UnknownActivityLevel(_))
        ));
    }

    #[test]
    fn test_budget_tier_is_strict() {
        assert_eq!("Medium".parse::<BudgetTier>().unwrap(), BudgetTier::Medium);
        assert!(matches!(
            "ultra".parse::<BudgetTier>(),
            Err(NutriError::UnknownBudgetTier(t)) if t == "ultra"
        ));
    }

    #[test]
    fn test_lenient_profile_deserialization() {
        let json = r#"{
            "name": "Ana", "age": 30, "weight_kg": 60, "height_cm": 165,
            "gender": "nonbinary", "activity_level": "couch", "goal": "bulk",
            "budget": "low"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.activity_level, None);
        assert_eq!(profile.goal, None);
        assert_eq!(profile.known_budget(), Some(BudgetTier::Low));
    }

    #[test]
    fn test_unknown_budget_in_profile_is_kept() {
        let json = r#"{"name": "Ana", "budget": "ultra"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile.budget,
            Some(BudgetSetting::Unrecognized("ultra".to_string()))
        );
        assert_eq!(profile.known_budget(), None);
        assert!(matches!(
            profile.budget_tier(),
            Err(NutriError::UnknownBudgetTier(t)) if t == "ultra"
        ));

        let saved = serde_json::to_value(&profile).unwrap();
        assert_eq!(saved["budget"], "ultra");
    }

    #[test]
    fn test_budget_tier_missing() {
        let profile = UserProfile::default();
        assert!(matches!(
            profile.budget_tier(),
            Err(NutriError::MissingBudgetTier)
        ));
    }

    #[test]
    fn test_require_plan_inputs() {
        let profile = UserProfile {
            weight_kg: Some(70.0),
            height_cm: Some(0.0),
            ..Default::default()
        };
        match profile.require_plan_inputs() {
            Err(NutriError::IncompleteProfile(missing)) => {
                assert_eq!(missing, vec!["height", "age", "gender", "budget"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_restrictions_text() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.restrictions_text(), "None");
        profile.restrictions = Some("  lactose  ".to_string());
        assert_eq!(profile.restrictions_text(), "lactose");
    }
}
