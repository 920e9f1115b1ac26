//! CLI frontend for the Death May Die character analyzer.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "dmd",
    about = "Dice probabilities and character statistics for Death May Die",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show single-die and combined roll statistics
    Dice {
        /// Number of black dice
        #[arg(short, long, default_value = "3")]
        black: u32,

        /// Number of green dice
        #[arg(short, long, default_value = "0")]
        green: u32,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show how adding green dice changes a roll
    Impact {
        /// Base black dice
        #[arg(short, long, default_value = "3")]
        black: u32,

        /// Base green dice
        #[arg(short, long, default_value = "0")]
        green: u32,

        /// Green dice added by the power
        #[arg(short, long)]
        add: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build a character from a power catalog and analyze it
    Analyze {
        /// Power catalog (JSON array of powers)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Character name
        #[arg(short, long)]
        name: String,

        /// Special power as NAME:LEVEL
        #[arg(long)]
        special: Option<String>,

        /// Common power as NAME:LEVEL (at most two)
        #[arg(long)]
        common: Vec<String>,

        /// Insanity track position
        #[arg(long)]
        insanity: Option<u32>,

        /// Wounds already taken
        #[arg(long, default_value = "0")]
        damage: u32,

        /// Stress already taken
        #[arg(long, default_value = "0")]
        stress: u32,

        /// Engine configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Apply tentacle batches to an insanity track
    Insanity {
        /// Starting position
        #[arg(short, long)]
        start: Option<u32>,

        /// Keep moving past checkpoints instead of stopping on them
        #[arg(long)]
        no_stop: bool,

        /// Tentacles per batch, applied in order
        #[arg(short, long, num_args = 1.., required = true)]
        tentacles: Vec<u32>,

        /// Engine configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Dice { black, green, json } => commands::dice::run(black, green, json),
        Commands::Impact {
            black,
            green,
            add,
            json,
        } => commands::impact::run(black, green, add, json),
        Commands::Analyze {
            catalog,
            name,
            special,
            common,
            insanity,
            damage,
            stress,
            config,
            json,
        } => commands::analyze::run(&commands::analyze::AnalyzeArgs {
            catalog: &catalog,
            name: &name,
            special: special.as_deref(),
            common: &common,
            insanity,
            damage,
            stress,
            config: config.as_deref(),
            json,
        }),
        Commands::Insanity {
            start,
            no_stop,
            tentacles,
            config,
        } => commands::insanity::run(start, !no_stop, &tentacles, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
