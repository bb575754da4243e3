// Command-line front-end for the bridge simulator

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod live;
    pub mod run;
}

#[derive(Parser)]
#[command(name = "bridge-sim")]
#[command(about = "Single-lane bridge traffic simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file deterministically, one JSON line per tick
    Run {
        /// Scenario file (JSON)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Override the number of ticks in the scenario
        #[arg(short, long)]
        ticks: Option<usize>,

        /// Print the event log after the last tick
        #[arg(long)]
        events: bool,
    },

    /// Tick on a timer and take add_car/remove_car commands from stdin
    Live {
        /// Milliseconds between ticks
        #[arg(short, long, default_value = "1000")]
        interval_ms: u64,

        /// Stop after this many ticks
        #[arg(short, long)]
        ticks: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            events,
        } => {
            commands::run::run(&scenario, ticks, events)?;
        }
        Commands::Live { interval_ms, ticks } => {
            commands::live::run(interval_ms, ticks).await?;
        }
    }

    Ok(())
}
