//! SkillPlan CLI - time-boxed learning plans.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use skillplan_core::{DayStatus, PlanId, SkillPlan};
use skillplan_progress::{
    consistency_window, summarize, DayArtifactService, ForecastMethod, PlanProgressionController,
};
use skillplan_storage::{JsonStorage, PlanStore, StoreConfig};
use tokio::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skillplan")]
#[command(about = "Time-boxed skill learning plans", long_about = None)]
struct Cli {
    /// Directory holding plan data
    #[arg(long, global = true, default_value = ".skillplan")]
    data_dir: std::path::PathBuf,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new plan
    New {
        /// Skill to learn
        skill: String,
        /// Plan length in days
        #[arg(long, default_value = "30")]
        days: u32,
    },
    /// List plans
    List,
    /// Show a plan's days and analytics
    Show {
        /// Plan ID
        id: String,
    },
    /// Complete the current day
    Complete {
        /// Plan ID
        id: String,
        /// Day being completed (must be the current day)
        #[arg(long)]
        day: Option<i64>,
    },
    /// Write or edit the note for a day
    Note {
        /// Plan ID
        id: String,
        /// Day
        day: i64,
        /// Note text
        text: String,
    },
    /// Set the topic for the current day
    Topic {
        /// Plan ID
        id: String,
        /// Day
        day: i64,
        /// Topic title
        title: String,
        /// Longer summary
        #[arg(long, default_value = "")]
        summary: String,
    },
    /// Delete a plan with its notes and topics
    Delete {
        /// Plan ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let storage = JsonStorage::with_config(StoreConfig::new(&cli.data_dir)).await?;
    debug!("Using data directory {}", storage.root().display());
    let shared = Arc::new(Mutex::new(storage));
    let controller = PlanProgressionController::with_shared(Arc::clone(&shared));
    let artifacts = DayArtifactService::with_shared(Arc::clone(&shared));

    match cli.command {
        Commands::New { skill, days } => {
            let plan = controller.create_plan(skill, days).await?;
            println!("Created plan: {} - {} ({} days)", plan.id, plan.skill, plan.duration_in_days);
        }
        Commands::List => {
            let plans = shared.lock().await.list_plans().await?;

            println!("Plans ({})", plans.len());
            for plan in plans {
                println!(
                    "  {} | {} | day {}/{} - {}",
                    plan.id,
                    format_state(&plan),
                    plan.current_day.min(plan.duration_in_days),
                    plan.duration_in_days,
                    plan.skill,
                );
            }
        }
        Commands::Show { id } => {
            let plan = controller.fetch_plan(parse_id(&id)?).await?;
            let summary = summarize(&plan, chrono::Utc::now());
            let window = consistency_window(&plan);

            println!("Plan: {}", plan.id);
            println!("  Skill: {}", plan.skill);
            println!("  Status: {}", format_state(&plan));
            println!("  Progress: {:.0}%", summary.percentage);
            println!("  Streak: {} (longest {})", summary.streaks.current, summary.streaks.longest);
            println!(
                "  Consistency: {}% [{}]",
                summary.consistency,
                window
                    .days
                    .iter()
                    .map(|(_, done)| if *done { '#' } else { '.' })
                    .collect::<String>()
            );
            match summary.forecast.method {
                ForecastMethod::Simple => println!("  Forecast: {}", summary.forecast.date),
                ForecastMethod::Pace { pace } => {
                    println!("  Forecast: {} ({:.1} days per plan day)", summary.forecast.date, pace)
                }
            }
            println!("  Created: {}", plan.created_at);

            let notes = artifacts.notes(plan.id).await?;
            println!("  Days:");
            for (day, status) in summary.statuses {
                let noted = if notes.iter().any(|n| n.day == day) { " *" } else { "" };
                println!("    {:>3} {}{}", day, format_status(status), noted);
            }
        }
        Commands::Complete { id, day } => {
            let plan_id = parse_id(&id)?;
            let plan = match day {
                Some(day) => controller.complete_day(plan_id, day).await?,
                None => controller.complete_current_day(plan_id).await?,
            };
            if plan.is_completed {
                println!("Plan complete: {} ({} days)", plan.skill, plan.duration_in_days);
            } else {
                println!("Completed day {}; now on day {}", plan.current_day - 1, plan.current_day);
            }
        }
        Commands::Note { id, day, text } => {
            let note = artifacts.write_note(parse_id(&id)?, day, text).await?;
            println!("Saved note for day {}", note.day);
        }
        Commands::Topic { id, day, title, summary } => {
            let topic = artifacts.set_topic(parse_id(&id)?, day, title, summary).await?;
            println!("Set topic for day {}: {}", topic.day, topic.title);
        }
        Commands::Delete { id } => {
            let plan_id = parse_id(&id)?;
            controller.delete_plan(plan_id).await?;
            info!("Removed plan data for {}", plan_id);
            println!("Deleted plan {}", plan_id);
        }
    }

    Ok(())
}

fn parse_id(s: &str) -> Result<PlanId> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid plan ID: {}", s))
}

fn format_state(plan: &SkillPlan) -> &'static str {
    if plan.is_completed {
        "DONE"
    } else {
        "ACTIVE"
    }
}

fn format_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Locked => "LOCKED",
        DayStatus::Current => "CURRENT",
        DayStatus::Completed => "COMPLETED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = PlanId::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(parse_id("nope").is_err());
    }

    #[test]
    fn test_cli_parses_complete_with_day() {
        let cli = Cli::try_parse_from(["skillplan", "complete", "01ARZ3NDEKTSV4RRFFQ69G5FAV", "--day", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Complete { day: Some(3), .. }));
        assert_eq!(cli.data_dir, std::path::PathBuf::from(".skillplan"));
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(DayStatus::Locked), "LOCKED");
        assert_eq!(format_status(DayStatus::Current), "CURRENT");
        assert_eq!(format_status(DayStatus::Completed), "COMPLETED");
    }
}
