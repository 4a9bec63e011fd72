//! Scripted first-transaction run

use biocredit_ledger::{BioCreditSystem, SystemStatus, TransferRequest};
use biocredit_types::{IdentityToken, TransferReceipt};
use colored::Colorize;
use serde::Serialize;

use super::ledger::print_status;
use crate::error::CliResult;
use crate::output::{emit, OutputFormat};

const ARCHITECT_PROXY: &str = "Panumas_Biometric_Data_001";
const FARMER_PROXY: &str = "Farmer_Global_Data_002";

/// A meal's worth of labour: fifteen minutes.
const FIRST_MEAL_SECONDS: u64 = 900;
const FIRST_MEAL_NOTE: &str = "first meal traded in the new world";

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub status_before: SystemStatus,
    pub architect: IdentityToken,
    pub farmer: IdentityToken,
    pub first_transfer: TransferReceipt,
    pub status_after: SystemStatus,
}

/// Run the scripted scenario against `system`.
pub fn run_scenario(system: &BioCreditSystem) -> CliResult<DemoReport> {
    let status_before = system.status()?;
    let architect = system.register(ARCHITECT_PROXY)?;
    let farmer = system.register(FARMER_PROXY)?;
    let first_transfer = system.transfer(
        TransferRequest::new(architect.clone(), farmer.clone(), FIRST_MEAL_SECONDS)
            .with_note(FIRST_MEAL_NOTE),
    )?;
    let status_after = system.status()?;

    Ok(DemoReport {
        status_before,
        architect,
        farmer,
        first_transfer,
        status_after,
    })
}

pub fn execute(system: &BioCreditSystem, format: OutputFormat) -> CliResult<()> {
    let report = run_scenario(system)?;
    emit(format, &report, |report| {
        print_status(&report.status_before);
        println!(
            "{} architect {}",
            "1.".bold().yellow(),
            report.architect.short().yellow()
        );
        println!(
            "{} farmer    {}",
            "2.".bold().yellow(),
            report.farmer.short().yellow()
        );
        println!(
            "{} transfer of {} seconds settled | note: {} | fee: {}",
            "3.".bold().yellow(),
            report.first_transfer.amount.grouped().bold(),
            report.first_transfer.note,
            report.first_transfer.fee.as_u64()
        );
        print_status(&report.status_after);
    })
}
