use crate::models::{Gender, MetabolicMetrics, UserProfile};
use crate::planner::constants::*;

/// Body Mass Index: `weight / (height_m)^2`.
///
/// Returns 0.0 when either input is non-positive or not finite.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Basal Metabolic Rate in kcal/day via the revised Harris-Benedict equations.
///
/// Returns 0.0 when weight, height or age is non-positive, or gender is absent.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Option<Gender>) -> f64 {
    let Some(gender) = gender else {
        return 0.0;
    };
    if !is_positive(weight_kg) || !is_positive(height_cm) || age_years == 0 {
        return 0.0;
    }
    let age = f64::from(age_years);

    match gender {
        Gender::Male => {
            BMR_MALE_BASE + BMR_MALE_WEIGHT * weight_kg + BMR_MALE_HEIGHT * height_cm
                - BMR_MALE_AGE * age
        }
        Gender::Female => {
            BMR_FEMALE_BASE + BMR_FEMALE_WEIGHT * weight_kg + BMR_FEMALE_HEIGHT * height_cm
                - BMR_FEMALE_AGE * age
        }
    }
}

/// BMI and BMR for a profile, with 0.0 sentinels for missing inputs.
pub fn compute_metrics(profile: &UserProfile) -> MetabolicMetrics {
    let weight = profile.weight_kg.unwrap_or(0.0);
    let height = profile.height_cm.unwrap_or(0.0);
    let age = profile.age.unwrap_or(0);

    MetabolicMetrics {
        bmi: calculate_bmi(weight, height),
        bmr: calculate_bmr(weight, height, age, profile.gender),
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
