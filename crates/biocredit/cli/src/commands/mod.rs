//! CLI command implementations

pub mod demo;
pub mod ledger;
pub mod shell;
