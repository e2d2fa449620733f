use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::advisor::WeeklyPlan;
use crate::error::{NutriError, Result};
use crate::models::{ChatMessage, MealPlan, ProgressEntry, UserProfile};
use crate::planner::{calculate_bmi, synthesize_meal_plan};
use crate::state::account::{Account, AccountTier, Feature};

/// A generated plan as kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub created_at: DateTime<Utc>,

    /// Only the most recent plan is active.
    pub active: bool,

    pub plan: MealPlan,
}

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub profile: Option<UserProfile>,

    #[serde(default)]
    pub account: Account,

    #[serde(default)]
    pub plans: Vec<SavedPlan>,

    #[serde(default)]
    pub weekly_plan: Option<WeeklyPlan>,

    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,

    #[serde(default)]
    pub progress: Vec<ProgressEntry>,
}

/// Owns the application state and enforces its rules.
pub struct StateManager {
    state: AppState,
}

impl StateManager {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The stored profile, or `NoProfile`.
    pub fn profile(&self) -> Result<&UserProfile> {
        self.state.profile.as_ref().ok_or(NutriError::NoProfile)
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.state.profile = Some(profile);
    }

    pub fn account(&self) -> &Account {
        &self.state.account
    }

    pub fn set_tier(&mut self, tier: AccountTier) {
        self.state.account.tier = tier;
    }

    /// Fail if the feature's monthly quota is used up.
    pub fn ensure_quota(&self, feature: Feature, now: DateTime<Utc>) -> Result<()> {
        self.state.account.ensure_available(feature, now)
    }

    pub fn record_usage(&mut self, feature: Feature, now: DateTime<Utc>) {
        self.state.account.consume(feature, now);
    }

    /// Generate and store a fresh daily plan.
    ///
    /// Checks the quota and the profile first; usage is recorded only on success.
    pub fn generate_plan(&mut self, now: DateTime<Utc>) -> Result<MealPlan> {
        self.ensure_quota(Feature::MealPlan, now)?;
        let profile = self.profile()?;
        profile.require_plan_inputs()?;

        let plan = synthesize_meal_plan(profile)?;
        self.save_plan(plan.clone(), now);
        self.record_usage(Feature::MealPlan, now);
        Ok(plan)
    }

    /// Store a plan, superseding every earlier one.
    pub fn save_plan(&mut self, plan: MealPlan, now: DateTime<Utc>) {
        for saved in &mut self.state.plans {
            saved.active = false;
        }
        self.state.plans.push(SavedPlan {
            created_at: now,
            active: true,
            plan,
        });
        debug!(history = self.state.plans.len(), "Stored new active plan");
    }

    pub fn active_plan(&self) -> Option<&MealPlan> {
        self.state
            .plans
            .iter()
            .rev()
            .find(|p| p.active)
            .map(|p| &p.plan)
    }

    pub fn weekly_plan(&self) -> Option<&WeeklyPlan> {
        self.state.weekly_plan.as_ref()
    }

    pub fn set_weekly_plan(&mut self, plan: WeeklyPlan) {
        self.state.weekly_plan = Some(plan);
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.state.chat_history
    }

    /// Append a user message and the assistant's reply.
    pub fn push_chat_turn(&mut self, message: &str, reply: &str, now: DateTime<Utc>) {
        self.state
            .chat_history
            .push(ChatMessage::user(message.trim()).at(now));
        self.state
            .chat_history
            .push(ChatMessage::assistant(reply).at(now));
    }

    pub fn progress(&self) -> &[ProgressEntry] {
        &self.state.progress
    }

    /// Record a weigh-in and update the profile weight.
    ///
    /// The BMI uses the profile height and is 0.0 when that is unknown.
    pub fn log_progress(
        &mut self,
        weight_kg: f64,
        note: Option<String>,
        date: NaiveDate,
    ) -> Result<&ProgressEntry> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(NutriError::InvalidInput(format!(
                "weight must be positive, got {}",
                weight_kg
            )));
        }

        let profile = self.state.profile.as_mut().ok_or(NutriError::NoProfile)?;
        let bmi = calculate_bmi(weight_kg, profile.height_cm.unwrap_or(0.0));
        profile.weight_kg = Some(weight_kg);

        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        self.state.progress.push(ProgressEntry {
            date,
            weight_kg,
            bmi,
            note,
        });
        Ok(&self.state.progress[self.state.progress.len() - 1])
    }

    /// Weight change from the first to the latest entry, if there are two or more.
    pub fn weight_change(&self) -> Option<f64> {
        match self.state.progress.as_slice() {
            [first, .., last] => Some(last.weight_kg - first.weight_kg),
            _ => None,
        }
    }

    pub fn reset_plans(&mut self) {
        self.state.plans.clear();
        self.state.weekly_plan = None;
    }

    pub fn reset_chat(&mut self) {
        self.state.chat_history.clear();
    }

    pub fn reset_usage(&mut self) {
        self.state.account.usage = Default::default();
    }

    pub fn reset_progress(&mut self) {
        self.state.progress.clear();
    }
}
