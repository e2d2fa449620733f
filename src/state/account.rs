use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};

/// Meal plans a free account may generate per month.
pub const FREE_PLAN_LIMIT: u32 = 1;

/// AI consultations a free account may use per month.
pub const FREE_CONSULTATION_LIMIT: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTier {
    #[default]
    Free,
    Premium,
}

/// A metered feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    MealPlan,
    AiConsultation,
}

impl Feature {
    pub fn free_limit(&self) -> u32 {
        match self {
            Feature::MealPlan => FREE_PLAN_LIMIT,
            Feature::AiConsultation => FREE_CONSULTATION_LIMIT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::MealPlan => "meal plans",
            Feature::AiConsultation => "AI consultations",
        }
    }
}

/// Usage counters for one calendar month (UTC).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Month these counters belong to, formatted `YYYY-MM`.
    #[serde(default)]
    pub period: String,

    #[serde(default)]
    pub plans_generated: u32,

    #[serde(default)]
    pub ai_consultations: u32,
}

impl Usage {
    fn count(&self, feature: Feature) -> u32 {
        match feature {
            Feature::MealPlan => self.plans_generated,
            Feature::AiConsultation => self.ai_consultations,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub tier: AccountTier,

    #[serde(default)]
    pub usage: Usage,
}

fn period_of(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

impl Account {
    pub fn is_premium(&self) -> bool {
        self.tier == AccountTier::Premium
    }

    /// Reset counters when `now` falls in a different month.
    pub fn roll_period(&mut self, now: DateTime<Utc>) {
        let period = period_of(now);
        if self.usage.period != period {
            self.usage = Usage {
                period,
                ..Usage::default()
            };
        }
    }

    /// Uses left this month, or `None` when unlimited.
    pub fn remaining(&self, feature: Feature, now: DateTime<Utc>) -> Option<u32> {
        if self.is_premium() {
            return None;
        }
        let used = if self.usage.period == period_of(now) {
            self.usage.count(feature)
        } else {
            0
        };
        Some(feature.free_limit().saturating_sub(used))
    }

    /// Fail with `QuotaExceeded` if the feature is exhausted for this month.
    pub fn ensure_available(&self, feature: Feature, now: DateTime<Utc>) -> Result<()> {
        match self.remaining(feature, now) {
            Some(0) => Err(NutriError::QuotaExceeded {
                feature: feature.label(),
                limit: feature.free_limit(),
            }),
            _ => Ok(()),
        }
    }

    /// Record one use. Premium accounts are counted too, but never limited.
    pub fn consume(&mut self, feature: Feature, now: DateTime<Utc>) {
        self.roll_period(now);
        match feature {
            Feature::MealPlan => self.usage.plans_generated += 1,
            Feature::AiConsultation => self.usage.ai_consultations += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_free_plan_limit() {
        let mut account = Account::default();
        let now = at(2026, 3, 1);

        assert_eq!(account.remaining(Feature::MealPlan, now), Some(1));
        account.ensure_available(Feature::MealPlan, now).unwrap();
        account.consume(Feature::MealPlan, now);

        assert_eq!(account.remaining(Feature::MealPlan, now), Some(0));
        assert!(matches!(
            account.ensure_available(Feature::MealPlan, now),
            Err(NutriError::QuotaExceeded { limit: 1, .. })
        ));
        // Consultations are metered separately.
        assert_eq!(account.remaining(Feature::AiConsultation, now), Some(3));
    }

    #[test]
    fn test_new_month_resets_counters() {
        let mut account = Account::default();
        account.consume(Feature::AiConsultation, at(2026, 3, 10));
        account.consume(Feature::AiConsultation, at(2026, 3, 11));
        account.consume(Feature::AiConsultation, at(2026, 3, 12));
        assert!(account
            .ensure_available(Feature::AiConsultation, at(2026, 3, 31))
            .is_err());

        let april = at(2026, 4, 1);
        assert_eq!(account.remaining(Feature::AiConsultation, april), Some(3));
        account.consume(Feature::AiConsultation, april);
        assert_eq!(account.usage.period, "2026-04");
        assert_eq!(account.usage.ai_consultations, 1);
    }

    #[test]
    fn test_premium_is_unlimited() {
        let mut account = Account {
            tier: AccountTier::Premium,
            ..Default::default()
        };
        let now = at(2026, 3, 1);
        for _ in 0..10 {
            account.ensure_available(Feature::MealPlan, now).unwrap();
            account.consume(Feature::MealPlan, now);
        }
        assert_eq!(account.remaining(Feature::MealPlan, now), None);
        assert_eq!(account.usage.plans_generated, 10);
    }
}
