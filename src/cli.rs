use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// NutriMatch: body metrics, budget-aware meal plans, and an AI nutrition advisor.
#[derive(Parser, Debug)]
#[command(name = "nutrimatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the state JSON file.
    #[arg(short, long, env = "NUTRIMATCH_STATE", default_value = "nutrimatch_state.json", global = true)]
    pub file: PathBuf,

    /// API key for the completion service. Without one, the offline advisor is used.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "NUTRIMATCH_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Completion model name.
    #[arg(long, env = "NUTRIMATCH_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Request timeout in seconds.
    #[arg(long, env = "NUTRIMATCH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enter or update your profile.
    Onboard,

    /// Show BMI and BMR for the stored profile.
    Metrics {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate a daily meal plan from the stored profile.
    Plan {
        /// Budget tier to use (low, medium, high). Updates the profile.
        #[arg(long)]
        budget: Option<String>,

        /// Print as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the plan to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Ask the advisor for a seven-day meal plan.
    Weekly,

    /// Ask the advisor for a shopping list for the current plan.
    Shopping,

    /// Ask the advisor for meal, hydration and motivation reminders.
    Reminders,

    /// Find substitutes for a food.
    Substitute {
        /// Food to replace.
        food: String,

        /// Why you want to replace it.
        #[arg(long, default_value = "looking for a cheaper option")]
        reason: String,
    },

    /// Chat with the nutrition advisor. Without a message, starts an interactive session.
    Chat {
        message: Option<String>,
    },

    /// Track weight over time.
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },

    /// Show account tier and remaining monthly usage.
    Status,

    /// Switch to a premium account (unlimited use).
    Upgrade,

    /// Switch back to a free account.
    Downgrade,

    /// Clear stored data.
    Reset {
        /// Remove all generated plans.
        #[arg(long)]
        plans: bool,

        /// Remove the chat history.
        #[arg(long)]
        chat: bool,

        /// Reset this month's usage counters.
        #[arg(long)]
        usage: bool,

        /// Remove all progress entries.
        #[arg(long)]
        progress: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProgressAction {
    /// Record today's weight.
    Log {
        /// Weight in kilograms.
        weight: f64,

        /// Optional note.
        #[arg(long)]
        note: Option<String>,
    },

    /// List recorded weights.
    Show,
}

impl Default for Command {
    fn default() -> Self {
        Command::Metrics { json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_with_budget() {
        let cli = Cli::try_parse_from(["nutrimatch", "plan", "--budget", "ultra", "--json"]).unwrap();
        match cli.command {
            Some(Command::Plan { budget, json, csv }) => {
                assert_eq!(budget.as_deref(), Some("ultra"));
                assert!(json);
                assert!(csv.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_progress_log() {
        let cli = Cli::try_parse_from(["nutrimatch", "-vv", "progress", "log", "71.5", "--note", "gym"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Command::Progress { action: ProgressAction::Log { weight, .. } }) if weight == 71.5
        ));
    }
}
