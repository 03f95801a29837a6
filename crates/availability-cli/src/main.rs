//! `availability` CLI — run availability queries against an exported calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Fully open days in the first week of January
//! availability query --calendar calendar.json --intent find_days \
//!     --start 2025-01-01 --end 2025-01-07
//!
//! # Half-day afternoon blocks, at most 3
//! availability query --calendar calendar.json --intent find_slots \
//!     --start 2025-01-06 --end 2025-01-10 --prefer afternoon --duration half-day --count 3
//!
//! # Query read from a wire-form JSON file, calendar from stdin
//! cat calendar.json | availability query --calendar - --query query.json --pretty
//!
//! # Open hours per day
//! availability inspect --calendar calendar.json --start 2025-01-06 --end 2025-01-10
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::io::{self, Read};

use anyhow::{Context, Result};
use availability_engine::{
    AvailabilityQueryEngine, CalendarSnapshot, DateRange, Intent, Query, SlotDuration,
    TimePreference,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Query an instructor's availability calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query and print the result as JSON
    Query {
        /// Calendar export file ("-" reads stdin)
        #[arg(short, long)]
        calendar: String,
        /// Query in wire-form JSON (replaces the inline query flags)
        #[arg(short, long, conflicts_with_all = ["intent", "start", "end", "prefer", "duration", "count"])]
        query: Option<String>,
        /// find_days, find_slots or suggest_times
        #[arg(long, required_unless_present = "query")]
        intent: Option<String>,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long, required_unless_present = "query")]
        start: Option<String>,
        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long, required_unless_present = "query")]
        end: Option<String>,
        /// any, morning, afternoon or evening
        #[arg(long)]
        prefer: Option<String>,
        /// one-hour, half-day or full-day
        #[arg(long)]
        duration: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        count: Option<usize>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show open hours per day for a date range
    Inspect {
        /// Calendar export file ("-" reads stdin)
        #[arg(short, long)]
        calendar: String,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            calendar,
            query,
            intent,
            start,
            end,
            prefer,
            duration,
            count,
            pretty,
            output,
        } => {
            let snapshot = load_snapshot(&calendar)?;
            let query = match query {
                Some(path) => {
                    let json = read_input(Some(&path))?;
                    Query::from_json(&json)?
                }
                None => build_query(
                    intent.as_deref(),
                    start.as_deref(),
                    end.as_deref(),
                    prefer.as_deref(),
                    duration.as_deref(),
                    count,
                )?,
            };

            let engine = AvailabilityQueryEngine::new(snapshot);
            let result = engine.execute(&query)?;
            info!(intent = %result.intent, items = result.len(), "query complete");

            let json = if pretty {
                result.to_json_pretty()?
            } else {
                result.to_json()?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Inspect {
            calendar,
            start,
            end,
        } => {
            let snapshot = load_snapshot(&calendar)?;
            let range = DateRange::parse(&start, &end)?;
            for date in range.days() {
                let mask = snapshot.blocked_mask(date);
                let label = snapshot
                    .day(date)
                    .and_then(|d| d.label.as_deref())
                    .map(|l| format!("  {}", l))
                    .unwrap_or_default();
                println!("{}  {:>2}/16 open{}", date, mask.open_count(), label);
            }
        }
    }

    Ok(())
}

/// Assemble a query from the inline flags.
fn build_query(
    intent: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    prefer: Option<&str>,
    duration: Option<&str>,
    count: Option<usize>,
) -> Result<Query> {
    let intent: Intent = intent.context("--intent is required")?.parse()?;
    let start = start.context("--start is required")?;
    let end = end.context("--end is required")?;

    let mut query = Query::new(intent, start, end);
    if let Some(prefer) = prefer {
        query = query.prefer(prefer.parse::<TimePreference>()?);
    }
    if let Some(duration) = duration {
        query = query.lasting(duration.parse::<SlotDuration>()?);
    }
    query.count = count;
    Ok(query)
}

fn load_snapshot(path: &str) -> Result<CalendarSnapshot> {
    let source = if path == "-" { None } else { Some(path) };
    let json = read_input(source)?;
    let snapshot = CalendarSnapshot::from_json(&json)
        .with_context(|| format!("Failed to load calendar: {}", path))?;
    info!(owner = %snapshot.owner_id, days = snapshot.days.len(), "loaded calendar");
    Ok(snapshot)
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
