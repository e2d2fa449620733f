use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("Unknown budget tier: {0} (expected low, medium or high)")]
    UnknownBudgetTier(String),

    #[error("No budget tier set; a meal plan needs one of low, medium or high")]
    MissingBudgetTier,

    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    #[error("Profile is incomplete, missing: {}", .0.join(", "))]
    IncompleteProfile(Vec<&'static str>),

    #[error("No profile found. Run 'onboard' first.")]
    NoProfile,

    #[error("No meal plan found. Run 'plan' first.")]
    NoMealPlan,

    #[error("Free plan limit reached: {limit} {feature} per month. Run 'upgrade' for unlimited use.")]
    QuotaExceeded { feature: &'static str, limit: u32 },

    #[error("No API key configured (set OPENAI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, NutriError>;
