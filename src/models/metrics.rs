use serde::{Deserialize, Serialize};

/// Body metrics derived from a profile. Never persisted on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetabolicMetrics {
    /// Body Mass Index, 0.0 when weight or height is missing.
    pub bmi: f64,

    /// Basal Metabolic Rate in kcal/day, 0.0 when any BMR input is missing.
    pub bmr: f64,
}

impl MetabolicMetrics {
    /// Whether both values were computed from complete input.
    pub fn is_complete(&self) -> bool {
        self.bmi > 0.0 && self.bmr > 0.0
    }

    /// Display band for the BMI, if one could be computed.
    pub fn band(&self) -> Option<BmiBand> {
        (self.bmi > 0.0).then(|| BmiBand::classify(self.bmi))
    }
}

/// Display classification of a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiBand {
    /// `<18.5` underweight, `<25` normal, `<30` overweight, otherwise obese.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiBand::Underweight
        } else if bmi < 25.0 {
            BmiBand::Normal
        } else if bmi < 30.0 {
            BmiBand::Overweight
        } else {
            BmiBand::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiBand::Underweight => "underweight",
            BmiBand::Normal => "normal",
            BmiBand::Overweight => "overweight",
            BmiBand::Obese => "obese",
        }
    }
}
