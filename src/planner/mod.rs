pub mod constants;
pub mod metrics;
pub mod synthesis;

pub use constants::*;
pub use metrics::{calculate_bmi, calculate_bmr, compute_metrics};
pub use synthesis::{distribute_calories, synthesize_meal_plan, target_calories};
