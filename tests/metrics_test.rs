use assert_float_eq::*;

use nutrimatch::models::{BmiBand, Gender, UserProfile};
use nutrimatch::planner::{calculate_bmi, calculate_bmr, compute_metrics};

#[test]
fn test_bmi_formula() {
    for (weight, height) in [(70.0, 175.0), (55.5, 160.0), (120.0, 190.0), (3.2, 50.0)] {
        let expected = weight / ((height / 100.0) * (height / 100.0));
        assert_float_absolute_eq!(calculate_bmi(weight, height), expected, 1e-12);
    }
    assert_float_absolute_eq!(calculate_bmi(80.0, 200.0), 20.0, 1e-9);
}

#[test]
fn test_bmi_sentinel_for_missing_input() {
    assert_eq!(calculate_bmi(0.0, 175.0), 0.0);
    assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
    assert_eq!(calculate_bmi(0.0, 0.0), 0.0);

    let profile = UserProfile {
        weight_kg: Some(70.0),
        ..Default::default()
    };
    assert_eq!(compute_metrics(&profile).bmi, 0.0);
}

#[test]
fn test_bmr_male() {
    // 88.362 + 13.397*70 + 4.799*175 - 5.677*30
    let bmr = calculate_bmr(70.0, 175.0, 30, Some(Gender::Male));
    assert_float_absolute_eq!(bmr, 1695.667, 0.01);
}

#[test]
fn test_bmr_female() {
    // 447.593 + 9.247*70 + 3.098*175 - 4.330*30
    let bmr = calculate_bmr(70.0, 175.0, 30, Some(Gender::Female));
    assert_float_absolute_eq!(bmr, 1507.133, 0.01);
}

#[test]
fn test_non_male_gender_uses_female_formula() {
    let gender: Gender = "prefer not to say".parse().unwrap();
    assert_eq!(
        calculate_bmr(70.0, 175.0, 30, Some(gender)),
        calculate_bmr(70.0, 175.0, 30, Some(Gender::Female))
    );
}

#[test]
fn test_bmr_sentinel_for_missing_input() {
    assert_eq!(calculate_bmr(70.0, 175.0, 30, None), 0.0);
    assert_eq!(calculate_bmr(0.0, 175.0, 30, Some(Gender::Male)), 0.0);
    assert_eq!(calculate_bmr(70.0, 0.0, 30, Some(Gender::Male)), 0.0);
    assert_eq!(calculate_bmr(70.0, 175.0, 0, Some(Gender::Female)), 0.0);
}

#[test]
fn test_metrics_from_profile() {
    let profile = UserProfile {
        name: "Ana".to_string(),
        age: Some(30),
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        gender: Some(Gender::Male),
        ..Default::default()
    };
    let metrics = compute_metrics(&profile);

    assert!(metrics.is_complete());
    assert_float_absolute_eq!(metrics.bmi, 22.857, 0.001);
    assert_float_absolute_eq!(metrics.bmr, 1695.667, 0.01);
    assert_eq!(metrics.band(), Some(BmiBand::Normal));
}

#[test]
fn test_metrics_are_idempotent() {
    let profile = UserProfile {
        age: Some(52),
        weight_kg: Some(93.4),
        height_cm: Some(171.0),
        gender: Some(Gender::Female),
        ..Default::default()
    };
    let first = compute_metrics(&profile);
    let second = compute_metrics(&profile);
    assert_eq!(first.bmi.to_bits(), second.bmi.to_bits());
    assert_eq!(first.bmr.to_bits(), second.bmr.to_bits());
    assert_eq!(first.band(), Some(BmiBand::Obese));
}
