//! Line-oriented shell over one live ledger
//!
//! Each input line is a ledger subcommand (`register`, `transfer`, `balance`,
//! `history`, `status`). Blank lines and `#` comments are skipped; `quit` or
//! `exit` ends the session early. A rejected line is reported and the shell
//! moves on.

use biocredit_ledger::BioCreditSystem;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::ledger::{self, LedgerCommands};
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "biocredit>", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Ledger(LedgerCommands),

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Outcome counts for a finished session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShellSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Read commands from `input` until end of stream or `quit`.
pub async fn run<R>(
    system: &BioCreditSystem,
    input: R,
    format: OutputFormat,
) -> CliResult<ShellSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut summary = ShellSummary::default();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(err) => {
                summary.executed += 1;
                summary.failed += 1;
                eprintln!("error: {}", err);
                continue;
            }
        };

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                eprintln!("{}", err);
                continue;
            }
            Err(err) => {
                summary.executed += 1;
                summary.failed += 1;
                eprintln!("{}", err);
                continue;
            }
        };

        match parsed.command {
            ShellCommand::Quit => break,
            ShellCommand::Ledger(command) => {
                debug!(?command, "shell command");
                summary.executed += 1;
                if let Err(err) = ledger::execute(system, command, format) {
                    summary.failed += 1;
                    eprintln!("error: {}", err);
                }
            }
        }
    }

    Ok(summary)
}

/// Run a session and turn any rejection into an error.
pub async fn execute<R>(system: &BioCreditSystem, input: R, format: OutputFormat) -> CliResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let summary = run(system, input, format).await?;
    if summary.failed > 0 {
        return Err(CliError::Rejected {
            failed: summary.failed,
            total: summary.executed,
        });
    }
    Ok(())
}

/// Split a line on whitespace, keeping single- or double-quoted runs intact.
fn split_words(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CliError::InvalidArgument(format!(
            "unterminated quote in: {}",
            line
        )));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
