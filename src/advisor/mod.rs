pub mod client;
pub mod offline;
pub mod responses;
pub mod service;
pub mod templates;

pub use client::{CompletionClient, CompletionRequest, OpenAiClient};
pub use offline::{offline_chat_reply, offline_substitutions};
pub use responses::{ReminderSet, ShoppingList, SubstitutionReport, WeeklyPlan, parse_payload};
pub use service::{chat, reminders, shopping_list, substitutions, weekly_plan};
