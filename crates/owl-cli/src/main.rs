//! CLI frontend for Night Owls, the covert-hero Renown and Notoriety tracker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use commands::SessionArgs;

#[derive(Parser)]
#[command(
    name = "owl",
    about = "Night Owls: Renown, Notoriety and complications for covert heroes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show totals, tiers and heat
    Status,

    /// Preview a mission, or record it with --apply
    Mission(MissionArgs),

    /// Apply an adjustment: lie-low, charity, or custom
    Adjust {
        /// Adjustment kind: lie-low, charity, custom
        kind: String,

        /// Renown change (custom only)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        renown: f64,

        /// Notoriety change (custom only)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        notoriety: f64,

        /// Reason recorded in the ledger (custom only)
        #[arg(long)]
        reason: Option<String>,
    },

    /// Spin the complication wheel, or complete a spin chosen elsewhere
    Spin {
        /// Index the client chose (0-based)
        #[arg(long, requires = "nonce")]
        index: Option<usize>,

        /// Nonce of the client's spin
        #[arg(long, requires = "index")]
        nonce: Option<String>,
    },

    /// List tier thresholds, perks and city responses
    Tiers,

    /// Export the ledger
    Export {
        /// Output format: csv, json, markdown, text
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start an interactive session
    Play,
}

/// Mission description shared by preview and apply.
#[derive(Args)]
struct MissionArgs {
    /// Archetype: help, sabotage, expose
    #[arg(required_unless_present = "inputs")]
    archetype: Option<String>,

    /// Read the full mission from a JSON file instead of flags
    #[arg(long, conflicts_with = "archetype")]
    inputs: Option<PathBuf>,

    /// Gold spent (Help the Poor)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    gold: i64,

    /// Households aided (Help the Poor)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    households: i64,

    /// Impact or exposure level, 1-5 (Sabotage / Expose)
    #[arg(long, default_value = "1", allow_hyphen_values = true, value_parser = whole_number)]
    level: i64,

    /// Success margin of the check
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    margin: i64,

    /// Critical success
    #[arg(long)]
    crit: bool,

    /// Critical failure
    #[arg(long)]
    fumble: bool,

    /// Solid plan
    #[arg(long)]
    plan: bool,

    /// Inside contact
    #[arg(long)]
    contact: bool,

    /// Rushed or loud
    #[arg(long)]
    rushed: bool,

    /// Hard proof
    #[arg(long)]
    proof: bool,

    /// Reused signature
    #[arg(long)]
    reused: bool,

    /// Visibility (0-3)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    vis: i64,

    /// Noise (0-3)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    noise: i64,

    /// Signature (0-2)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    sig: i64,

    /// Witnesses (0-2)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    wit: i64,

    /// Magic trace (0-2)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    magic: i64,

    /// Concealment (0-3)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    conceal: i64,

    /// Misdirection (0-2)
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = whole_number)]
    misdir: i64,

    /// Record the mission in the ledger
    #[arg(long)]
    apply: bool,

    /// Notes stored with an applied mission
    #[arg(long, requires = "apply")]
    notes: Option<String>,
}

/// Any whole number; range clamping happens when the mission is built.
fn whole_number(text: &str) -> Result<i64, String> {
    owl_core::saturating::parse_whole(text)
        .ok_or_else(|| format!("\"{text}\" is not a whole number"))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Status => commands::status::run(&cli.session),
        Commands::Mission(args) => commands::mission::run(&cli.session, &args),
        Commands::Adjust {
            kind,
            renown,
            notoriety,
            reason,
        } => commands::adjust::run(&cli.session, &kind, renown, notoriety, reason.as_deref()),
        Commands::Spin { index, nonce } => {
            commands::spin::run(&cli.session, index, nonce.as_deref())
        }
        Commands::Tiers => commands::tiers::run(&cli.session),
        Commands::Export { format, output } => {
            commands::export::run(&cli.session, &format, output.as_deref())
        }
        Commands::Play => commands::play::run(&cli.session),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
