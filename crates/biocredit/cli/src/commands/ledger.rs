//! Ledger commands: register, transfer, balance, history, status

use biocredit_ledger::{BioCreditSystem, LedgerError, SystemStatus, TransferRequest};
use biocredit_types::{BioSeconds, IdentityToken, TransferReceipt};
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use tracing::warn;

use crate::error::{CliError, CliResult};
use crate::output::{emit, OutputFormat};

/// Ledger subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LedgerCommands {
    /// Register one or more humans from biometric proxies
    Register {
        /// Raw biometric proxy strings
        #[arg(required = true)]
        samples: Vec<String>,
    },

    /// Transfer seconds between two registered identities (fee is always zero)
    Transfer {
        /// Sender token, or @<proxy> to derive it
        sender: String,
        /// Receiver token, or @<proxy> to derive it
        receiver: String,
        /// Amount in seconds
        #[arg(allow_negative_numbers = true)]
        amount: i128,
        /// Free-text note
        note: Option<String>,
    },

    /// Show the balance of an identity
    Balance {
        /// Token, or @<proxy> to derive it
        token: String,
    },

    /// List journaled transfers involving an identity, newest first
    History {
        /// Token, or @<proxy> to derive it
        token: String,
        /// Maximum number to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show population size and the fixed policy
    Status,
}

/// Execute a ledger command against a live system
pub fn execute(
    system: &BioCreditSystem,
    command: LedgerCommands,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        LedgerCommands::Register { samples } => register(system, &samples, format),
        LedgerCommands::Transfer {
            sender,
            receiver,
            amount,
            note,
        } => transfer(system, &sender, &receiver, amount, note, format),
        LedgerCommands::Balance { token } => balance(system, &token, format),
        LedgerCommands::History { token, limit } => history(system, &token, limit, format),
        LedgerCommands::Status => status(system, format),
    }
}

/// Accept a raw token, or `@proxy` to derive the token the proxy maps to.
pub fn resolve_token(system: &BioCreditSystem, arg: &str) -> CliResult<IdentityToken> {
    match arg.strip_prefix('@') {
        Some(proxy) => Ok(system.token_for(proxy)?),
        None => Ok(IdentityToken::new(arg)),
    }
}

#[derive(Serialize)]
struct Registration {
    token: IdentityToken,
    balance: BioSeconds,
}

fn register(system: &BioCreditSystem, samples: &[String], format: OutputFormat) -> CliResult<()> {
    let mut registrations = Vec::with_capacity(samples.len());
    let mut outcome: CliResult<()> = Ok(());
    for sample in samples {
        match system.register(sample) {
            Ok(token) => registrations.push(Registration {
                balance: system.balance(&token)?,
                token,
            }),
            Err(err) => {
                outcome = Err(err.into());
                break;
            }
        }
    }

    // Report what was admitted before any rejection.
    if !registrations.is_empty() {
        emit(format, &registrations, |registrations| {
            for r in registrations {
                println!(
                    "{} {}",
                    "Registered".green().bold(),
                    r.token.as_str().yellow()
                );
                println!(
                    "    Welcome to true equality: you received {} BioSeconds ({:.2} BioCredits)",
                    r.balance.grouped().bold(),
                    r.balance.as_credits()
                );
            }
        })?;
    }
    outcome
}

fn transfer(
    system: &BioCreditSystem,
    sender: &str,
    receiver: &str,
    amount: i128,
    note: Option<String>,
    format: OutputFormat,
) -> CliResult<()> {
    let sender = resolve_token(system, sender)?;
    let receiver = resolve_token(system, receiver)?;
    let amount = match u64::try_from(amount) {
        Ok(amount) => amount,
        Err(_) => return Err(reject_amount(system, &sender, &receiver, amount)),
    };

    let mut request = TransferRequest::new(sender, receiver, amount);
    if let Some(note) = note {
        request = request.with_note(note);
    }
    let receipt = system.transfer(request)?;

    emit(format, &receipt, print_receipt)
}

/// An amount outside `u64` never reaches the ledger, so apply its ordering
/// here: unknown identities are reported ahead of the amount.
fn reject_amount(
    system: &BioCreditSystem,
    sender: &IdentityToken,
    receiver: &IdentityToken,
    amount: i128,
) -> CliError {
    let err = [sender, receiver]
        .into_iter()
        .find_map(|token| match system.is_registered(token) {
            Ok(true) => None,
            Ok(false) => Some(CliError::from(LedgerError::UnknownIdentity(token.clone()))),
            Err(err) => Some(CliError::from(err)),
        })
        .unwrap_or(CliError::InvalidAmount(amount));
    warn!(
        sender = sender.short(),
        receiver = receiver.short(),
        amount = %amount,
        error = %err,
        "transfer rejected"
    );
    err
}

fn print_receipt(receipt: &TransferReceipt) {
    println!(
        "{} moved {} seconds | note: {} | fee: {}",
        "Transfer settled:".green().bold(),
        receipt.amount.grouped().bold(),
        receipt.note,
        receipt.fee.as_u64()
    );
    println!(
        "    {} -> {}",
        receipt.sender.short().yellow(),
        receipt.receiver.short().yellow()
    );
    println!("    receipt {}", receipt.receipt_id.to_string().dimmed());
}

#[derive(Serialize)]
struct Balance {
    token: IdentityToken,
    balance: BioSeconds,
    credits: f64,
}

fn balance(system: &BioCreditSystem, token: &str, format: OutputFormat) -> CliResult<()> {
    let token = resolve_token(system, token)?;
    let balance = system.balance(&token)?;
    let report = Balance {
        credits: balance.as_credits(),
        token,
        balance,
    };
    emit(format, &report, |b| {
        println!("{}", b.token.as_str().yellow());
        println!(
            "    {} BioSeconds ({:.6} BioCredits)",
            b.balance.grouped().bold(),
            b.credits
        );
    })
}

fn history(
    system: &BioCreditSystem,
    token: &str,
    limit: Option<usize>,
    format: OutputFormat,
) -> CliResult<()> {
    let token = resolve_token(system, token)?;
    let receipts = system.history(&token, limit)?;
    emit(format, &receipts, |receipts| {
        println!("{} {}", "History for".bold().cyan(), token.short().yellow());
        println!("{}", "=".repeat(60));
        if receipts.is_empty() {
            println!("  {}", "No transfers recorded".dimmed());
        }
        for receipt in receipts {
            let direction = if receipt.sender == token {
                format!("-{}", receipt.amount.grouped()).red()
            } else {
                format!("+{}", receipt.amount.grouped()).green()
            };
            println!(
                "  {} {}  {} -> {}  {}",
                receipt.settled_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                direction,
                receipt.sender.short(),
                receipt.receiver.short(),
                receipt.note
            );
        }
    })
}

fn status(system: &BioCreditSystem, format: OutputFormat) -> CliResult<()> {
    let status = system.status()?;
    emit(format, &status, print_status)
}

pub(crate) fn print_status(status: &SystemStatus) {
    println!();
    println!("{}", "--- BioCredit System Status ---".bold().cyan());
    println!("{}: {}", "Decree".bold(), status.policy_text);
    println!(
        "{}: {} humans",
        "Registered population".bold(),
        status.registered_count
    );
    println!("{}: {}", "Sovereignty".bold(), status.sovereignty);
    println!(
        "{}: {} seconds | {}: {} | {}: {}",
        "Initial grant".bold(),
        status.initial_grant.grouped(),
        "Fee".bold(),
        status.transaction_fee.as_u64(),
        "Identity scheme".bold(),
        status.identity_scheme
    );
    println!(
        "{}: {} seconds across {} transfers",
        "Total supply".bold(),
        status.total_supply.grouped(),
        status.transfers_settled
    );
    println!("{}", "-------------------------------".cyan());
    println!();
}
