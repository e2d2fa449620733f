use assert_float_eq::*;

use nutrimatch::NutriError;
use nutrimatch::models::{ActivityLevel, BudgetTier, Gender, Goal, MealSlot, UserProfile};
use nutrimatch::planner::{
    compute_metrics, distribute_calories, synthesize_meal_plan, target_calories,
};

fn profile(tier: BudgetTier) -> UserProfile {
    UserProfile {
        name: "Test".to_string(),
        age: Some(30),
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        gender: Some(Gender::Male),
        activity_level: Some(ActivityLevel::Moderate),
        goal: Some(Goal::Lose),
        budget: Some(tier.into()),
        restrictions: None,
    }
}

#[test]
fn test_target_calories_formula() {
    assert_eq!(
        target_calories(1500.0, Some(ActivityLevel::Moderate), Some(Goal::Lose)),
        1860
    );
    assert_eq!(
        target_calories(2000.0, Some(ActivityLevel::VeryActive), Some(Goal::Gain)),
        4560
    );
}

#[test]
fn test_target_calories_defaults() {
    // Missing activity -> 1.2, missing goal -> 1.0
    assert_eq!(target_calories(1500.0, None, None), 1800);
    assert_eq!(target_calories(1500.0, None, Some(Goal::Lose)), 1440);
    assert_eq!(target_calories(1500.0, Some(ActivityLevel::Light), None), 2063);
}

#[test]
fn test_unrecognized_activity_and_goal_fall_back() {
    let json = r#"{"age": 30, "weight_kg": 70, "height_cm": 175, "gender": "male",
                   "activity_level": "marathoner", "goal": "shred", "budget": "low"}"#;
    let loaded: UserProfile = serde_json::from_str(json).unwrap();
    let plan = synthesize_meal_plan(&loaded).unwrap();

    let bmr = compute_metrics(&loaded).bmr;
    assert_eq!(plan.target_calories, (bmr * 1.2).round() as i64);
}

#[test]
fn test_distribution_of_2000() {
    let shares = distribute_calories(2000);
    assert_eq!(
        shares,
        [
            (MealSlot::Breakfast, 500),
            (MealSlot::Lunch, 700),
            (MealSlot::Snack, 300),
            (MealSlot::Dinner, 500),
        ]
    );
}

#[test]
fn test_distribution_sums_within_rounding() {
    for target in [0, 1, 1399, 1860, 2035, 2501, 3333, 4567] {
        let sum: i64 = distribute_calories(target).iter().map(|(_, c)| c).sum();
        assert!(
            (sum - target).abs() <= 1,
            "target {} distributed to {}",
            target,
            sum
        );
    }
}

#[test]
fn test_plan_calories_and_shares() {
    let plan = synthesize_meal_plan(&profile(BudgetTier::Medium)).unwrap();
    let bmr = compute_metrics(&profile(BudgetTier::Medium)).bmr;

    assert_eq!(plan.target_calories, (bmr * 1.55 * 0.8).round() as i64);
    assert_eq!(plan.meals.len(), 4);
    assert!((plan.allocated_calories() - plan.target_calories).abs() <= 1);
    assert_eq!(plan.budget_tier, BudgetTier::Medium);
}

#[test]
fn test_low_tier_table_is_fixed() {
    let expected: [(&str, &[&str], f64); 4] = [
        ("Breakfast", &["Oats", "Banana", "Milk"], 3.50),
        ("Lunch", &["Rice", "Beans", "Chicken", "Salad"], 8.00),
        ("Snack", &["Whole-grain bread", "White cheese"], 2.50),
        ("Dinner", &["Egg", "Sweet potato", "Broccoli"], 5.00),
    ];

    let small = UserProfile {
        age: Some(70),
        weight_kg: Some(45.0),
        height_cm: Some(150.0),
        gender: Some(Gender::Female),
        activity_level: Some(ActivityLevel::Sedentary),
        goal: Some(Goal::Lose),
        ..profile(BudgetTier::Low)
    };

    for p in [profile(BudgetTier::Low), small] {
        let plan = synthesize_meal_plan(&p).unwrap();
        for (meal, (name, foods, cost)) in plan.meals.iter().zip(expected) {
            assert_eq!(meal.name, name);
            assert_eq!(meal.foods, foods.to_vec());
            assert_float_absolute_eq!(meal.cost, cost, 1e-9);
        }
        assert_float_absolute_eq!(plan.total_cost, 19.0, 1e-9);
    }
}

#[test]
fn test_total_cost_per_tier() {
    for (tier, total) in [
        (BudgetTier::Low, 19.0),
        (BudgetTier::Medium, 37.0),
        (BudgetTier::High, 67.0),
    ] {
        let plan = synthesize_meal_plan(&profile(tier)).unwrap();
        let sum: f64 = plan.meals.iter().map(|m| m.cost).sum();
        assert_float_absolute_eq!(plan.total_cost, total, 1e-9);
        assert_float_absolute_eq!(plan.total_cost, sum, 1e-9);
    }
}

#[test]
fn test_macros_do_not_scale_with_calories() {
    let mut big = profile(BudgetTier::High);
    big.weight_kg = Some(140.0);
    big.activity_level = Some(ActivityLevel::VeryActive);
    big.goal = Some(Goal::Gain);

    let small_plan = synthesize_meal_plan(&profile(BudgetTier::High)).unwrap();
    let big_plan = synthesize_meal_plan(&big).unwrap();

    assert!(big_plan.target_calories > small_plan.target_calories);
    for (a, b) in small_plan.meals.iter().zip(&big_plan.meals) {
        assert_eq!(a.macros, b.macros);
    }
    assert_eq!(small_plan.meals[0].macros.protein, 15.0);
    assert_eq!(small_plan.meals[1].macros.carbs, 40.0);
    assert_eq!(small_plan.meals[3].macros.fat, 20.0);
}

#[test]
fn test_unknown_budget_tier_is_explicit_error() {
    let parsed = "ultra".parse::<BudgetTier>();
    assert!(matches!(parsed, Err(NutriError::UnknownBudgetTier(ref t)) if t == "ultra"));

    let mut p = profile(BudgetTier::Low);
    p.budget = None;
    assert!(matches!(
        synthesize_meal_plan(&p),
        Err(NutriError::MissingBudgetTier)
    ));
}

#[test]
fn test_plan_is_idempotent() {
    let p = profile(BudgetTier::High);
    let first = synthesize_meal_plan(&p).unwrap();
    let second = synthesize_meal_plan(&p).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_plan_json_shape() {
    let plan = synthesize_meal_plan(&profile(BudgetTier::Low)).unwrap();
    let value = serde_json::to_value(&plan).unwrap();

    assert_eq!(value["calories"], plan.target_calories);
    assert_eq!(value["budgetType"], "low");
    assert_eq!(value["totalCost"], 19.0);
    assert_eq!(value["meals"].as_array().unwrap().len(), 4);
    assert_eq!(value["meals"][0]["name"], "Breakfast");
    assert_eq!(value["meals"][0]["foods"][0], "Oats");
    assert_eq!(value["meals"][1]["macros"]["protein"], 35.0);
}
