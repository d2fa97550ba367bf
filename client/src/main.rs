//! SkinGlow command-line client
//!
//! Drives the persisted client state from a terminal: onboarding profile,
//! photo analysis, the cached result, score history and reminders.

use anyhow::{bail, Context, Result};
use chrono::{Local, Weekday};
use clap::{Parser, Subcommand};
use skinglow_client::{
    api::AnalysisClient,
    config::AppConfig,
    services::AnalyzeService,
    state::AppState,
    storage::FileStore,
};
use skinglow_shared::{
    scoring::reverse_chronological, score_label, Diet, Gender, ProfileForm, Reminder,
    ReminderSchedule,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "skinglow", version, about = "AI skin analysis client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show or edit the user profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Analyze a photo and cache the result
    Analyze {
        /// Path to a face photo
        image: PathBuf,
    },
    /// Inspect or clear the cached analysis
    #[command(subcommand)]
    Analysis(AnalysisCommand),
    /// Score history
    #[command(subcommand)]
    History(HistoryCommand),
    /// Local reminders
    #[command(subcommand)]
    Reminders(ReminderCommand),
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    Set {
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        gender: Option<Gender>,
        /// Height in cm
        #[arg(long)]
        height: Option<u32>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<u32>,
        #[arg(long)]
        diet: Option<Diet>,
        #[arg(long)]
        ethnicity: Option<String>,
    },
}

#[derive(Subcommand)]
enum AnalysisCommand {
    Show,
    Clear,
}

#[derive(Subcommand)]
enum HistoryCommand {
    Show {
        /// Newest first
        #[arg(long)]
        reverse: bool,
    },
    Stats,
    Clear,
}

#[derive(Subcommand)]
enum ReminderCommand {
    List,
    AddDaily {
        title: String,
        #[arg(long)]
        hour: u32,
        #[arg(long, default_value_t = 0)]
        minute: u32,
        #[arg(long)]
        body: Option<String>,
    },
    AddWeekly {
        title: String,
        #[arg(long)]
        weekday: Weekday,
        #[arg(long)]
        hour: u32,
        #[arg(long, default_value_t = 0)]
        minute: u32,
        #[arg(long)]
        body: Option<String>,
    },
    Remove {
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.storage.data_dir.display(),
        "Starting SkinGlow client"
    );

    let storage = Arc::new(FileStore::new(config.storage.data_dir.clone()));
    let state = AppState::init(storage, config).await;

    match cli.command {
        Command::Profile(cmd) => run_profile(&state, cmd).await,
        Command::Analyze { image } => run_analyze(&state, image).await,
        Command::Analysis(cmd) => run_analysis(&state, cmd).await,
        Command::History(cmd) => run_history(&state, cmd).await,
        Command::Reminders(cmd) => run_reminders(&state, cmd).await,
    }
}

async fn run_profile(state: &AppState, cmd: ProfileCommand) -> Result<()> {
    match cmd {
        ProfileCommand::Show => match state.profile().current().await {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("No profile yet. Run `skinglow profile set` to complete onboarding."),
        },
        ProfileCommand::Set {
            age,
            gender,
            height,
            weight,
            diet,
            ethnicity,
        } => {
            // Start from the saved profile so single fields can be edited
            let mut form = state
                .profile()
                .current()
                .await
                .map(|p| ProfileForm::from(&p))
                .unwrap_or_default();
            form.age = age.or(form.age);
            form.gender = gender.or(form.gender);
            form.height_cm = height.or(form.height_cm);
            form.weight_kg = weight.or(form.weight_kg);
            form.diet = diet.or(form.diet);
            form.ethnicity = ethnicity.or(form.ethnicity);

            match form.into_profile() {
                Ok(profile) => {
                    state.profile().save(profile).await;
                    println!("Profile saved.");
                }
                Err(errors) => {
                    for error in &errors {
                        eprintln!("{}", error);
                    }
                    bail!("Profile not saved");
                }
            }
        }
    }
    Ok(())
}

async fn run_analyze(state: &AppState, image: PathBuf) -> Result<()> {
    let client = AnalysisClient::new(&state.config().api)?;
    let result = AnalyzeService::analyze_photo(state, &client, &image)
        .await
        .with_context(|| format!("Analysis of {} failed", image.display()))?;

    match result.score.as_ref().and_then(|s| s.value().map(|v| (v, s.label()))) {
        Some((score, label)) => println!(
            "Score: {} ({})",
            score,
            label.unwrap_or_else(|| score_label(score).to_string())
        ),
        None => println!("Analysis cached (no numeric score)."),
    }
    if let Some(skin_type) = &result.skin_type {
        println!("Skin type: {}", skin_type);
    }
    Ok(())
}

async fn run_analysis(state: &AppState, cmd: AnalysisCommand) -> Result<()> {
    match cmd {
        AnalysisCommand::Show => match state.analysis().current().await {
            Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            None => println!("No analysis cached."),
        },
        AnalysisCommand::Clear => {
            state.analysis().clear().await;
            println!("Cached analysis cleared.");
        }
    }
    Ok(())
}

async fn run_history(state: &AppState, cmd: HistoryCommand) -> Result<()> {
    match cmd {
        HistoryCommand::Show { reverse } => {
            let entries = state.history().entries().await;
            let ordered: Vec<_> = if reverse {
                reverse_chronological(&entries)
            } else {
                entries.iter().collect()
            };
            for entry in ordered {
                println!(
                    "{}  {:>3}  {}",
                    entry.date.format("%Y-%m-%d %H:%M"),
                    entry.score,
                    entry.skin_type.as_deref().unwrap_or("-")
                );
            }
        }
        HistoryCommand::Stats => match state.history().stats().await {
            Some(stats) => {
                println!("Scans:   {}", stats.count);
                println!("Average: {:.1}", stats.average_rounded());
                println!("Best:    {}", stats.best);
                println!("Latest:  {} ({})", stats.latest, score_label(stats.latest));
                println!("Trend:   {:+}", stats.trend);
            }
            None => println!("No history yet."),
        },
        HistoryCommand::Clear => {
            state.history().clear().await;
            println!("Score history cleared.");
        }
    }
    Ok(())
}

async fn run_reminders(state: &AppState, cmd: ReminderCommand) -> Result<()> {
    match cmd {
        ReminderCommand::List => {
            let now = Local::now().naive_local();
            for (at, reminder) in state.reminders().upcoming(now).await {
                println!("{}  {}  {}", reminder.id, at.format("%a %Y-%m-%d %H:%M"), reminder.title);
            }
        }
        ReminderCommand::AddDaily {
            title,
            hour,
            minute,
            body,
        } => {
            let reminder = Reminder::new(title, body, ReminderSchedule::Daily { hour, minute })?;
            println!("{}", reminder.id);
            state.reminders().add(reminder).await;
        }
        ReminderCommand::AddWeekly {
            title,
            weekday,
            hour,
            minute,
            body,
        } => {
            let reminder = Reminder::new(
                title,
                body,
                ReminderSchedule::Weekly {
                    weekday,
                    hour,
                    minute,
                },
            )?;
            println!("{}", reminder.id);
            state.reminders().add(reminder).await;
        }
        ReminderCommand::Remove { id } => {
            if !state.reminders().remove(id).await {
                bail!("No reminder with id {}", id);
            }
            println!("Reminder removed.");
        }
    }
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "skinglow_client=info".into()
        } else {
            "skinglow_client=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
