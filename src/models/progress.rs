use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated weigh-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub weight_kg: f64,

    /// BMI at this weight, 0.0 when the profile height was unknown.
    pub bmi: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
