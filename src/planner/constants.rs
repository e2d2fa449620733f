use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{ActivityLevel, BudgetTier, Goal, Macros, MealSlot};

// ─────────────────────────────────────────────────────────────────────────────
// Revised Harris-Benedict coefficients
// ─────────────────────────────────────────────────────────────────────────────

pub const BMR_MALE_BASE: f64 = 88.362;
pub const BMR_MALE_WEIGHT: f64 = 13.397;
pub const BMR_MALE_HEIGHT: f64 = 4.799;
pub const BMR_MALE_AGE: f64 = 5.677;

pub const BMR_FEMALE_BASE: f64 = 447.593;
pub const BMR_FEMALE_WEIGHT: f64 = 9.247;
pub const BMR_FEMALE_HEIGHT: f64 = 3.098;
pub const BMR_FEMALE_AGE: f64 = 4.330;

// ─────────────────────────────────────────────────────────────────────────────
// Energy multipliers
// ─────────────────────────────────────────────────────────────────────────────

/// Used when the activity level is missing or unrecognized.
pub const DEFAULT_ACTIVITY_MULT: f64 = 1.2;

/// Used when the goal is missing or unrecognized.
pub const DEFAULT_GOAL_MULT: f64 = 1.0;

pub static ACTIVITY_MULTIPLIERS: LazyLock<HashMap<ActivityLevel, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(ActivityLevel::Sedentary, 1.2);
    m.insert(ActivityLevel::Light, 1.375);
    m.insert(ActivityLevel::Moderate, 1.55);
    m.insert(ActivityLevel::Active, 1.725);
    m.insert(ActivityLevel::VeryActive, 1.9);
    m
});

pub static GOAL_MULTIPLIERS: LazyLock<HashMap<Goal, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(Goal::Lose, 0.8);
    m.insert(Goal::Maintain, 1.0);
    m.insert(Goal::Gain, 1.2);
    m
});

/// Activity multiplier, falling back to the sedentary default.
pub fn activity_multiplier(level: Option<ActivityLevel>) -> f64 {
    level
        .and_then(|l| ACTIVITY_MULTIPLIERS.get(&l).copied())
        .unwrap_or(DEFAULT_ACTIVITY_MULT)
}

/// Goal multiplier, falling back to maintenance.
pub fn goal_multiplier(goal: Option<Goal>) -> f64 {
    goal.and_then(|g| GOAL_MULTIPLIERS.get(&g).copied())
        .unwrap_or(DEFAULT_GOAL_MULT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-slot distribution
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of the daily target allocated to each slot. Sums to 1.0.
pub static SLOT_SHARES: LazyLock<HashMap<MealSlot, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(MealSlot::Breakfast, 0.25);
    m.insert(MealSlot::Lunch, 0.35);
    m.insert(MealSlot::Snack, 0.15);
    m.insert(MealSlot::Dinner, 0.25);
    m
});

/// Fixed macronutrient grams per slot.
///
/// These do not scale with the calorie target. Revisit with product before
/// changing that.
pub static SLOT_MACROS: LazyLock<HashMap<MealSlot, Macros>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(MealSlot::Breakfast, Macros::new(15.0, 45.0, 20.0));
    m.insert(MealSlot::Lunch, Macros::new(35.0, 40.0, 25.0));
    m.insert(MealSlot::Snack, Macros::new(10.0, 20.0, 15.0));
    m.insert(MealSlot::Dinner, Macros::new(30.0, 25.0, 20.0));
    m
});

pub fn slot_share(slot: MealSlot) -> f64 {
    SLOT_SHARES.get(&slot).copied().unwrap_or(0.0)
}

pub fn slot_macros(slot: MealSlot) -> Macros {
    SLOT_MACROS.get(&slot).copied().unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Budget tier meal tables
// ─────────────────────────────────────────────────────────────────────────────

/// Foods and cost for one meal slot of one budget tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotEntry {
    pub slot: MealSlot,
    pub foods: &'static [&'static str],
    pub cost: f64,
}

const fn entry(slot: MealSlot, foods: &'static [&'static str], cost: f64) -> SlotEntry {
    SlotEntry { slot, foods, cost }
}

const LOW_MEALS: [SlotEntry; 4] = [
    entry(MealSlot::Breakfast, &["Oats", "Banana", "Milk"], 3.50),
    entry(
        MealSlot::Lunch,
        &["Rice", "Beans", "Chicken", "Salad"],
        8.00,
    ),
    entry(MealSlot::Snack, &["Whole-grain bread", "White cheese"], 2.50),
    entry(
        MealSlot::Dinner,
        &["Egg", "Sweet potato", "Broccoli"],
        5.00,
    ),
];

const MEDIUM_MEALS: [SlotEntry; 4] = [
    entry(
        MealSlot::Breakfast,
        &["Granola", "Greek yogurt", "Berries"],
        6.00,
    ),
    entry(
        MealSlot::Lunch,
        &["Quinoa", "Salmon", "Asparagus", "Mixed salad"],
        15.00,
    ),
    entry(MealSlot::Snack, &["Nuts", "Apple"], 4.00),
    entry(
        MealSlot::Dinner,
        &["Turkey breast", "Sweet potato", "Cauliflower"],
        12.00,
    ),
];

const HIGH_MEALS: [SlotEntry; 4] = [
    entry(
        MealSlot::Breakfast,
        &["Organic acai", "Artisanal granola", "Exotic fruits"],
        12.00,
    ),
    entry(
        MealSlot::Lunch,
        &["Filet mignon", "Mushroom risotto", "Arugula"],
        25.00,
    ),
    entry(
        MealSlot::Snack,
        &["Premium nut mix", "Detox smoothie"],
        8.00,
    ),
    entry(
        MealSlot::Dinner,
        &["Cod", "Tricolor quinoa", "Grilled vegetables"],
        22.00,
    ),
];

/// Per-tier meal tables, indexed by `BudgetTier` in declaration order.
pub static BUDGET_MEALS: [[SlotEntry; 4]; BudgetTier::ALL.len()] =
    [LOW_MEALS, MEDIUM_MEALS, HIGH_MEALS];

/// The meal table for a tier: four entries in `MealSlot::ALL` order.
pub fn meal_table(tier: BudgetTier) -> &'static [SlotEntry; 4] {
    &BUDGET_MEALS[tier as usize]
}
