pub mod chat;
pub mod metrics;
pub mod plan;
pub mod profile;
pub mod progress;

pub use chat::{ChatMessage, ChatRole};
pub use metrics::{BmiBand, MetabolicMetrics};
pub use plan::{Macros, Meal, MealPlan, MealSlot};
pub use profile::{ActivityLevel, BudgetSetting, BudgetTier, Gender, Goal, UserProfile};
pub use progress::ProgressEntry;
