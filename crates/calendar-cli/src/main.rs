//! `calq` CLI — expand recurring events and query calendar days from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Everything happening on a day (events JSON on stdin)
//! cat events.json | calq day --date 2024-03-08
//!
//! # Same, in agenda (chronological) order, reading from a file
//! calq day --date 2024-03-08 --agenda -i events.json
//!
//! # Stored events starting on a day / continuing through a day
//! calq starting --date 2024-03-08 -i events.json
//! calq spanning --date 2024-03-08 -i events.json
//!
//! # All occurrences in a visible range, grid order
//! calq range --from 2024-03-01 --to 2024-03-31 -i events.json
//!
//! # Expand a single base event
//! calq expand --id e1 --from 2024-03-01 --to 2024-03-31 -i events.json
//!
//! # Monday-first weeks
//! calq --config calq.toml day --date 2024-03-10 -i events.json
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use calendar_engine::{dates, EngineConfig, Event};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(
    name = "calq",
    version,
    about = "Expand recurring calendar events and query days"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with engine settings (week_starts_on, max_iterations)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Args)]
struct FileArgs {
    /// Events JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Occurrences starting on, ending on, or spanning a day
    Day {
        /// Day to query (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Strict chronological order instead of input order
        #[arg(long)]
        agenda: bool,
        #[command(flatten)]
        files: FileArgs,
    },
    /// Stored events that start on a day (recurrences not expanded)
    Starting {
        #[arg(long)]
        date: String,
        #[command(flatten)]
        files: FileArgs,
    },
    /// Stored multi-day events continuing through a day
    Spanning {
        #[arg(long)]
        date: String,
        #[command(flatten)]
        files: FileArgs,
    },
    /// All occurrences overlapping a date range, multi-day first
    Range {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[command(flatten)]
        files: FileArgs,
    },
    /// Expand one base event over a date range
    Expand {
        /// Id of the base event to expand
        #[arg(long)]
        id: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[command(flatten)]
        files: FileArgs,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Day { date, agenda, files } => {
            let events = read_events(files.input.as_deref())?;
            let day = parse_day(&date)?;
            let result = if agenda {
                calendar_engine::agenda_events_for_day_with(&events, day, &config)
            } else {
                calendar_engine::all_occurrences_for_day_with(&events, day, &config)
            };
            let found = result.with_context(|| format!("Failed to query {}", day))?;
            write_json(files.output.as_deref(), &found)?;
        }
        Commands::Starting { date, files } => {
            let events = read_events(files.input.as_deref())?;
            let found = calendar_engine::events_starting_on_day(&events, parse_day(&date)?);
            write_json(files.output.as_deref(), &found)?;
        }
        Commands::Spanning { date, files } => {
            let events = read_events(files.input.as_deref())?;
            let found = calendar_engine::spanning_events_for_day(&events, parse_day(&date)?);
            write_json(files.output.as_deref(), &found)?;
        }
        Commands::Range { from, to, files } => {
            let events = read_events(files.input.as_deref())?;
            let (start, end) = (parse_day(&from)?, parse_day(&to)?);
            let found = calendar_engine::occurrences_in_range_with(&events, start, end, &config)
                .with_context(|| format!("Failed to query {}..{}", start, end))?;
            write_json(files.output.as_deref(), &found)?;
        }
        Commands::Expand { id, from, to, files } => {
            let events = read_events(files.input.as_deref())?;
            let (start, end) = (parse_day(&from)?, parse_day(&to)?);
            let event = events
                .iter()
                .find(|e| e.id == id)
                .with_context(|| format!("No event with id '{}'", id))?;
            let occurrences = calendar_engine::expand_event_with(event, start, end, &config)
                .with_context(|| format!("Failed to expand event '{}'", id))?;
            write_json(files.output.as_deref(), &occurrences)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber filtered by `RUST_LOG`, so stdout stays pure JSON.
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config = EngineConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file: {}", path))?;
    debug!(?config, "loaded config");
    Ok(config)
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    dates::parse_date(s).with_context(|| format!("Invalid date: '{}'", s))
}

fn read_events(path: Option<&str>) -> Result<Vec<Event>> {
    let json = read_input(path)?;
    let events = calendar_engine::parse_events_json(&json).context("Failed to parse events JSON")?;
    debug!(count = events.len(), "loaded events");
    Ok(events)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: Option<&str>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
