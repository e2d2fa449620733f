use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::BudgetTier;

/// The four fixed meal slots, in serving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Snack => "Snack",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Macronutrient grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub const fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }
}

/// One slot of a daily plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub foods: Vec<String>,
    pub calories: i64,
    pub cost: f64,
    pub macros: Macros,
}

/// A generated daily plan: four meals in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(rename = "calories")]
    pub target_calories: i64,

    pub meals: Vec<Meal>,

    #[serde(rename = "totalCost")]
    pub total_cost: f64,

    #[serde(rename = "budgetType")]
    pub budget_tier: BudgetTier,
}

impl MealPlan {
    /// Sum of the per-meal calorie shares.
    pub fn allocated_calories(&self) -> i64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    /// Sum of per-meal macros.
    pub fn total_macros(&self) -> Macros {
        self.meals.iter().fold(Macros::default(), |acc, m| {
            Macros::new(
                acc.protein + m.macros.protein,
                acc.carbs + m.macros.carbs,
                acc.fat + m.macros.fat,
            )
        })
    }
}
