pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_plan_csv;
pub use prompts::{collect_profile, prompt_chat_message, prompt_yes_no};
pub use render::{
    display_chat_reply, display_meal_plan, display_metrics, display_progress, display_reminders,
    display_shopping_list, display_substitutions, display_usage, display_weekly_plan,
};
