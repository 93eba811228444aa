//! DAIS: daily operations briefings from JSON-backed stores.
//!
//! A one-shot batch tool: it loads the household and human-contact store
//! assets, derives a briefing for a single target date and prints it.
//! There is no persistence beyond reading the two assets, no long-running
//! process and no concurrency.
//!
//! # Architecture
//!
//! - [`core`]: immutable data model, tolerant store parsing, shared
//!   primitives (errors, time, output helpers)
//! - [`pipelines`]: the two pure derivation pipelines (household briefing,
//!   contact radar)
//! - [`coordinator`]: composes both pipelines into the external document
//!   and renders output
//!
//! # Examples
//!
//! ```bash
//! # Combined briefing for today
//! dais briefing --household assets/household-store.json \
//!     --contacts assets/human-contact-store.json
//!
//! # Household briefing only, for a fixed date, as a terminal report
//! dais household --store assets/household-store.json \
//!     --date 2025-01-06 --format text
//! ```

pub mod coordinator;
pub mod core;
pub mod pipelines;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::error::DaisError;
use crate::core::json_store;
use crate::core::time;
use crate::pipelines::household::{DEFAULT_STALE_AFTER_DAYS, build_daily_briefing};
use crate::pipelines::human_contact::build_contact_radar;

#[derive(Parser, Debug)]
#[clap(
    name = "dais",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily operations briefings over household and human-contact stores"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct BriefingCli {
    /// Path to the household store JSON asset.
    #[clap(long)]
    household: PathBuf,
    /// Path to the human-contact store JSON asset.
    #[clap(long)]
    contacts: PathBuf,
    /// Target date (YYYY-MM-DD). Defaults to today's local calendar date.
    #[clap(long)]
    date: Option<String>,
    /// Days without a completion before a card counts as stale.
    #[clap(long, default_value_t = DEFAULT_STALE_AFTER_DAYS)]
    stale_after_days: i64,
    /// Output format: 'json' or 'text'.
    #[clap(long, default_value = "json")]
    format: String,
}

#[derive(clap::Args, Debug)]
struct HouseholdCli {
    /// Path to the household store JSON asset.
    #[clap(long)]
    store: PathBuf,
    /// Target date (YYYY-MM-DD). Defaults to today's local calendar date.
    #[clap(long)]
    date: Option<String>,
    /// Days without a completion before a card counts as stale.
    #[clap(long, default_value_t = DEFAULT_STALE_AFTER_DAYS)]
    stale_after_days: i64,
    /// Output format: 'json' or 'text'.
    #[clap(long, default_value = "json")]
    format: String,
}

#[derive(clap::Args, Debug)]
struct ContactsCli {
    /// Path to the human-contact store JSON asset.
    #[clap(long)]
    store: PathBuf,
    /// Target date (YYYY-MM-DD). Defaults to today's local calendar date.
    #[clap(long)]
    date: Option<String>,
    /// Output format: 'json' or 'text'.
    #[clap(long, default_value = "json")]
    format: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the combined daily operations briefing.
    Briefing(BriefingCli),
    /// Generate the household briefing only.
    Household(HouseholdCli),
    /// Generate the human-contact radar only.
    Contacts(ContactsCli),
    /// Print version information.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn from_flag(raw: &str) -> Result<Self, DaisError> {
        match raw {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(DaisError::InvalidArgument(format!(
                "unknown format '{other}', expected 'json' or 'text'"
            ))),
        }
    }
}

fn parse_target_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>, DaisError> {
    raw.map(time::parse_cli_date).transpose()
}

pub fn run() -> Result<(), DaisError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Briefing(args) => run_briefing(args),
        Command::Household(args) => run_household(args),
        Command::Contacts(args) => run_contacts(args),
    }
}

fn run_briefing(args: BriefingCli) -> Result<(), DaisError> {
    let format = OutputFormat::from_flag(&args.format)?;
    let target = parse_target_date(args.date.as_deref())?;
    let household = json_store::load_household_store(&args.household)?;
    let contacts = json_store::load_human_contact_store(&args.contacts)?;

    let briefing =
        coordinator::generate_briefing(&household, &contacts, target, args.stale_after_days);
    match format {
        OutputFormat::Json => println!("{}", briefing.to_json_pretty()?),
        OutputFormat::Text => println!("{}", coordinator::render_briefing_text(&briefing)),
    }
    Ok(())
}

fn run_household(args: HouseholdCli) -> Result<(), DaisError> {
    let format = OutputFormat::from_flag(&args.format)?;
    let target = parse_target_date(args.date.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let store = json_store::load_household_store(&args.store)?;

    let briefing = build_daily_briefing(&store, target, args.stale_after_days);
    match format {
        OutputFormat::Json => println!("{}", coordinator::to_json_document(&briefing)?),
        OutputFormat::Text => println!("{}", coordinator::render_household_text(&briefing)),
    }
    Ok(())
}

fn run_contacts(args: ContactsCli) -> Result<(), DaisError> {
    let format = OutputFormat::from_flag(&args.format)?;
    let target = parse_target_date(args.date.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let store = json_store::load_human_contact_store(&args.store)?;

    let radar = build_contact_radar(&store, target);
    match format {
        OutputFormat::Json => println!("{}", coordinator::to_json_document(&radar)?),
        OutputFormat::Text => println!("{}", coordinator::render_contacts_text(&radar)),
    }
    Ok(())
}
