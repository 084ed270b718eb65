mod commands;
mod display;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kitaplan_core::{Policy, RequestType, SchedulePair, WeeklySchedule};
use kitaplan_store::MemorySubmissions;
use tracing_subscriber::EnvFilter;

use commands::{Edit, PlacementArgs, RequestArgs};

/// Dual kindergarten placement schedules: custody split, validation, and change requests.
///
/// Schedules are written as a positional pattern (`MT--F`), a day list
/// (`mon,tue,fri`), or `all` / `none`.
#[derive(Parser)]
#[command(name = "kitaplan", version, about)]
struct Cli {
    /// JSON policy file, e.g. {"min_reason_len": 10}.
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Reasons and justifications must be longer than this many characters.
    #[arg(long, global = true, env = "KITAPLAN_MIN_REASON_LEN")]
    min_reason_len: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Custody percentage of a single schedule.
    Custody { schedule: WeeklySchedule },

    /// Check that two schedules split the week exactly.
    Validate {
        primary: WeeklySchedule,
        secondary: WeeklySchedule,
        /// Print the split report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Apply single-day edits to a schedule pair, resolving conflicts.
    Resolve {
        #[arg(long, default_value = "none")]
        primary: WeeklySchedule,
        #[arg(long, default_value = "none")]
        secondary: WeeklySchedule,
        /// Edits like `p:mon=1`, `s:fri=0`, or `s:wed` (toggle).
        edits: Vec<Edit>,
    },

    /// Draft and submit a schedule change request for an existing placement.
    Request {
        #[arg(long)]
        placement: String,
        #[arg(long = "type", default_value = "permanent")]
        request_type: RequestType,
        #[arg(long)]
        primary: WeeklySchedule,
        #[arg(long)]
        secondary: WeeklySchedule,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        requested_by: String,
    },

    /// Create and submit a new dual placement.
    Placement {
        #[arg(long)]
        child: String,
        /// Primary kindergarten id from the directory.
        #[arg(long)]
        primary_kindergarten: String,
        /// Secondary kindergarten id from the directory.
        #[arg(long)]
        secondary_kindergarten: String,
        #[arg(long)]
        primary: WeeklySchedule,
        #[arg(long)]
        secondary: WeeklySchedule,
        #[arg(long)]
        justification: String,
        /// Supporting document reference; repeatable.
        #[arg(long = "document")]
        documents: Vec<String>,
        #[arg(long, env = "KITAPLAN_DIRECTORY")]
        directory: PathBuf,
    },

    /// List kindergartens from a directory file.
    Kindergartens {
        #[arg(long, env = "KITAPLAN_DIRECTORY")]
        directory: PathBuf,
        #[arg(long)]
        district: Option<String>,
        /// Only kindergartens with free spots.
        #[arg(long)]
        available: bool,
    },
}

fn load_policy(cli: &Cli) -> anyhow::Result<Policy> {
    let mut policy = match &cli.policy {
        Some(path) => Policy::from_json_file(path)
            .with_context(|| format!("loading policy {}", path.display()))?,
        None => Policy::default(),
    };
    if let Some(min) = cli.min_reason_len {
        policy.min_reason_len = min;
    }
    Ok(policy)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = load_policy(&cli)?;
    tracing::debug!(min_reason_len = policy.min_reason_len, "policy loaded");

    let backend = MemorySubmissions::new();

    let ok = match cli.command {
        Command::Custody { schedule } => commands::custody(&schedule),
        Command::Validate {
            primary,
            secondary,
            json,
        } => commands::validate(&SchedulePair::new(primary, secondary), json)?,
        Command::Resolve {
            primary,
            secondary,
            edits,
        } => commands::resolve(SchedulePair::new(primary, secondary), &edits),
        Command::Request {
            placement,
            request_type,
            primary,
            secondary,
            reason,
            requested_by,
        } => {
            let args = RequestArgs {
                placement,
                request_type,
                pair: SchedulePair::new(primary, secondary),
                reason,
                requested_by,
            };
            commands::request(args, &policy, &backend).await?
        }
        Command::Placement {
            child,
            primary_kindergarten,
            secondary_kindergarten,
            primary,
            secondary,
            justification,
            documents,
            directory,
        } => {
            let args = PlacementArgs {
                child,
                primary_kindergarten,
                secondary_kindergarten,
                pair: SchedulePair::new(primary, secondary),
                justification,
                documents,
            };
            let directory = commands::load_directory(&directory)?;
            commands::placement(args, &directory, &policy, &backend).await?
        }
        Command::Kindergartens {
            directory,
            district,
            available,
        } => {
            let directory = commands::load_directory(&directory)?;
            commands::kindergartens(&directory, district.as_deref(), available).await?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
