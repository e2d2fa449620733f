pub mod advisor;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{NutriError, Result};
pub use models::{MealPlan, MetabolicMetrics, UserProfile};
pub use planner::{compute_metrics, synthesize_meal_plan};
