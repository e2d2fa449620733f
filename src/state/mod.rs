mod account;
mod manager;
mod persistence;

pub use account::{Account, AccountTier, Feature, Usage, FREE_CONSULTATION_LIMIT, FREE_PLAN_LIMIT};
pub use manager::{AppState, SavedPlan, StateManager};
pub use persistence::{load_state, save_state};
