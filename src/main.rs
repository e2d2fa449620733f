use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{info, warn};

use nutrimatch::advisor::{self, OpenAiClient, offline_chat_reply, offline_substitutions};
use nutrimatch::cli::{Cli, Command, ProgressAction};
use nutrimatch::config::AdvisorConfig;
use nutrimatch::error::{NutriError, Result};
use nutrimatch::interface::{
    collect_profile, display_chat_reply, display_meal_plan, display_metrics, display_progress,
    display_reminders, display_shopping_list, display_substitutions, display_usage,
    display_weekly_plan, prompt_chat_message, prompt_yes_no, write_plan_csv,
};
use nutrimatch::logging::init_logging;
use nutrimatch::models::BudgetTier;
use nutrimatch::planner::compute_metrics;
use nutrimatch::state::{AccountTier, Feature, StateManager, load_state, save_state};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AdvisorConfig::from_cli(&cli);
    let command = cli.command.unwrap_or_default();
    let path = cli.file.as_path();

    let mut manager = StateManager::new(load_state(path)?);
    let now = Utc::now();

    match command {
        Command::Onboard => cmd_onboard(&mut manager, path),
        Command::Metrics { json } => cmd_metrics(&manager, json),
        Command::Plan { budget, json, csv } => {
            cmd_plan(&mut manager, path, now, budget.as_deref(), json, csv.as_deref())
        }
        Command::Weekly => cmd_weekly(&mut manager, path, &config, now),
        Command::Shopping => cmd_shopping(&mut manager, path, &config, now),
        Command::Reminders => cmd_reminders(&mut manager, path, &config, now),
        Command::Substitute { food, reason } => {
            cmd_substitute(&mut manager, path, &config, now, &food, &reason)
        }
        Command::Chat { message } => cmd_chat(&mut manager, path, &config, message),
        Command::Progress { action } => cmd_progress(&mut manager, path, now, action),
        Command::Status => {
            display_usage(manager.account(), now);
            Ok(())
        }
        Command::Upgrade => cmd_set_tier(&mut manager, path, AccountTier::Premium),
        Command::Downgrade => cmd_set_tier(&mut manager, path, AccountTier::Free),
        Command::Reset {
            plans,
            chat,
            usage,
            progress,
        } => cmd_reset(&mut manager, path, plans, chat, usage, progress),
    }
}

fn persist(manager: &StateManager, path: &Path) -> Result<()> {
    save_state(path, manager.state())
}

fn completion_client(config: &AdvisorConfig) -> Result<OpenAiClient> {
    if !config.has_api_key() {
        return Err(NutriError::MissingApiKey);
    }
    OpenAiClient::new(config)
}

/// Collect the profile interactively and show its metrics.
fn cmd_onboard(manager: &mut StateManager, path: &Path) -> Result<()> {
    let existing = manager.state().profile.clone();
    let profile = collect_profile(existing.as_ref())?;

    display_metrics(&profile, &compute_metrics(&profile));

    manager.set_profile(profile);
    persist(manager, path)?;
    println!("Profile saved.");
    Ok(())
}

fn cmd_metrics(manager: &StateManager, json: bool) -> Result<()> {
    let profile = manager.profile()?;
    let metrics = compute_metrics(profile);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        display_metrics(profile, &metrics);
    }
    Ok(())
}

/// Generate, display and store a daily meal plan.
fn cmd_plan(
    manager: &mut StateManager,
    path: &Path,
    now: DateTime<Utc>,
    budget: Option<&str>,
    json: bool,
    csv: Option<&Path>,
) -> Result<()> {
    if let Some(text) = budget {
        let tier: BudgetTier = text.parse()?;
        let mut profile = manager.profile()?.clone();
        profile.budget = Some(tier.into());
        manager.set_profile(profile);
    }

    let plan = manager.generate_plan(now)?;
    persist(manager, path)?;
    info!(
        calories = plan.target_calories,
        tier = %plan.budget_tier,
        "Meal plan generated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_meal_plan(&plan);
        display_usage(manager.account(), now);
    }

    if let Some(csv_path) = csv {
        write_plan_csv(&plan, csv_path)?;
        println!("Plan written to {}", csv_path.display());
    }
    Ok(())
}

fn cmd_weekly(
    manager: &mut StateManager,
    path: &Path,
    config: &AdvisorConfig,
    now: DateTime<Utc>,
) -> Result<()> {
    manager.ensure_quota(Feature::MealPlan, now)?;
    let profile = manager.profile()?.clone();
    let client = completion_client(config)?;

    println!("Asking the advisor for a weekly plan...");
    let plan = advisor::weekly_plan(&client, &profile)?;
    display_weekly_plan(&plan);

    manager.set_weekly_plan(plan);
    manager.record_usage(Feature::MealPlan, now);
    persist(manager, path)
}

fn cmd_shopping(
    manager: &mut StateManager,
    path: &Path,
    config: &AdvisorConfig,
    now: DateTime<Utc>,
) -> Result<()> {
    manager.ensure_quota(Feature::AiConsultation, now)?;
    let profile = manager.profile()?;
    let client = completion_client(config)?;

    let list = if let Some(weekly) = manager.weekly_plan() {
        advisor::shopping_list(&client, weekly, profile)?
    } else if let Some(daily) = manager.active_plan() {
        advisor::shopping_list(&client, daily, profile)?
    } else {
        return Err(NutriError::NoMealPlan);
    };
    display_shopping_list(&list);

    manager.record_usage(Feature::AiConsultation, now);
    persist(manager, path)
}

fn cmd_reminders(
    manager: &mut StateManager,
    path: &Path,
    config: &AdvisorConfig,
    now: DateTime<Utc>,
) -> Result<()> {
    manager.ensure_quota(Feature::AiConsultation, now)?;
    let profile = manager.profile()?;
    let client = completion_client(config)?;

    let set = if let Some(daily) = manager.active_plan() {
        advisor::reminders(&client, profile, daily)?
    } else if let Some(weekly) = manager.weekly_plan() {
        advisor::reminders(&client, profile, weekly)?
    } else {
        return Err(NutriError::NoMealPlan);
    };
    display_reminders(&set);

    manager.record_usage(Feature::AiConsultation, now);
    persist(manager, path)
}

/// AI substitutions when a key is configured, the local table otherwise.
fn cmd_substitute(
    manager: &mut StateManager,
    path: &Path,
    config: &AdvisorConfig,
    now: DateTime<Utc>,
    food: &str,
    reason: &str,
) -> Result<()> {
    if !config.has_api_key() {
        match offline_substitutions(food) {
            Some(report) => display_substitutions(&report),
            None => println!(
                "No local substitutions for '{}'. Configure an API key for AI suggestions.",
                food.trim()
            ),
        }
        return Ok(());
    }

    manager.ensure_quota(Feature::AiConsultation, now)?;
    let profile = manager.profile()?;
    let client = completion_client(config)?;

    let report = advisor::substitutions(&client, food, reason, profile)?;
    display_substitutions(&report);

    manager.record_usage(Feature::AiConsultation, now);
    persist(manager, path)
}

/// One turn, or an interactive session when no message is given.
fn cmd_chat(
    manager: &mut StateManager,
    path: &Path,
    config: &AdvisorConfig,
    message: Option<String>,
) -> Result<()> {
    let profile = manager.profile()?.clone();
    let client = if config.has_api_key() {
        Some(completion_client(config)?)
    } else {
        warn!("No API key configured, using offline advisor");
        None
    };
    let interactive = message.is_none();
    let mut next = message;

    loop {
        let message = match next.take() {
            Some(m) => m,
            None if interactive => match prompt_chat_message()? {
                Some(m) => m,
                None => break,
            },
            None => break,
        };

        let now = Utc::now();
        manager.ensure_quota(Feature::AiConsultation, now)?;

        let reply = match &client {
            Some(client) => advisor::chat(client, &profile, manager.chat_history(), &message)?,
            None => offline_chat_reply(&profile, &mut rand::thread_rng()),
        };
        display_chat_reply(&reply);

        manager.push_chat_turn(&message, &reply, now);
        manager.record_usage(Feature::AiConsultation, now);
        persist(manager, path)?;
    }
    Ok(())
}

fn cmd_progress(
    manager: &mut StateManager,
    path: &Path,
    now: DateTime<Utc>,
    action: ProgressAction,
) -> Result<()> {
    match action {
        ProgressAction::Log { weight, note } => {
            let entry = manager.log_progress(weight, note, now.date_naive())?;
            if entry.bmi > 0.0 {
                println!("Logged {:.1} kg (BMI {:.1}).", entry.weight_kg, entry.bmi);
            } else {
                println!("Logged {:.1} kg.", entry.weight_kg);
            }
            persist(manager, path)
        }
        ProgressAction::Show => {
            display_progress(manager.progress(), manager.weight_change());
            Ok(())
        }
    }
}

fn cmd_set_tier(manager: &mut StateManager, path: &Path, tier: AccountTier) -> Result<()> {
    if manager.account().tier == tier {
        println!("Account is already {:?}.", tier);
        return Ok(());
    }
    if tier == AccountTier::Free && !prompt_yes_no("Downgrade to the free plan?", false)? {
        return Ok(());
    }

    manager.set_tier(tier);
    persist(manager, path)?;
    match tier {
        AccountTier::Premium => println!("You are now Premium: unlimited plans and AI consultations."),
        AccountTier::Free => println!("Switched to the free plan."),
    }
    Ok(())
}

fn cmd_reset(
    manager: &mut StateManager,
    path: &Path,
    plans: bool,
    chat: bool,
    usage: bool,
    progress: bool,
) -> Result<()> {
    if !plans && !chat && !usage && !progress {
        println!("Please specify at least one reset option:");
        println!("  --plans     Remove all generated plans");
        println!("  --chat      Remove the chat history");
        println!("  --usage     Reset this month's usage counters");
        println!("  --progress  Remove all progress entries");
        return Ok(());
    }

    if plans {
        manager.reset_plans();
        println!("Removed all plans.");
    }
    if chat {
        manager.reset_chat();
        println!("Cleared chat history.");
    }
    if usage {
        manager.reset_usage();
        println!("Reset usage counters.");
    }
    if progress {
        manager.reset_progress();
        println!("Removed all progress entries.");
    }

    persist(manager, path)?;
    println!("State saved.");
    Ok(())
}
