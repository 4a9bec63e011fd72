//! BioCredit CLI - command-line interface for the time-credit ledger
//!
//! Every invocation builds one in-memory [`BioCreditSystem`] and drops it on
//! exit. One-shot subcommands therefore start from an empty ledger; use
//! `shell` to run a sequence of commands against the same ledger.

use std::ffi::OsString;
use std::path::PathBuf;

use biocredit_identity::DigestAlgorithm;
use biocredit_ledger::BioCreditSystem;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{demo, ledger, shell};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use output::OutputFormat;

/// BioCredit CLI application
#[derive(Parser)]
#[command(name = "biocredit")]
#[command(about = "BioCredit - universal basic-time ledger", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (table, json, yaml)
    #[arg(short, long, global = true)]
    output: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, env = "BIOCREDIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Identity digest (sha256, blake3); overrides the config file
    #[arg(long, env = "BIOCREDIT_DIGEST", global = true)]
    digest: Option<DigestAlgorithm>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ledger(ledger::LedgerCommands),

    /// Replay the first recorded transaction: two registrations and one meal
    Demo,

    /// Read ledger commands from stdin against one live ledger
    Shell,
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing on stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    let config = CliConfig::load(cli.config.as_deref())?.with_digest(cli.digest);
    let format = cli.output.or(config.output).unwrap_or_default();
    let system = BioCreditSystem::with_config(&config.ledger_config());
    debug!(digest = %config.registrar.digest, ?format, "ledger initialised");

    match cli.command {
        Commands::Ledger(command) => ledger::execute(&system, command, format),
        Commands::Demo => demo::execute(&system, format),
        Commands::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::execute(&system, stdin, format).await
        }
    }
}
