//! CLI configuration
//!
//! An optional TOML file supplies the registrar digest, journal sizing and a
//! default output format. Command-line flags and their environment variables
//! override whatever the file sets.

use std::path::Path;

use biocredit_identity::{DigestAlgorithm, RegistrarConfig};
use biocredit_ledger::{BioCreditConfig, JournalConfig};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format when `--output` is not given
    #[serde(default)]
    pub output: Option<OutputFormat>,

    #[serde(default)]
    pub registrar: RegistrarConfig,

    #[serde(default)]
    pub journal: JournalConfig,
}

impl CliConfig {
    /// Load configuration from a file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> CliResult<Self> {
        toml::from_str(contents).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn with_digest(mut self, digest: Option<DigestAlgorithm>) -> Self {
        if let Some(digest) = digest {
            self.registrar.digest = digest;
        }
        self
    }

    pub fn ledger_config(&self) -> BioCreditConfig {
        BioCreditConfig {
            registrar: self.registrar.clone(),
            journal: self.journal.clone(),
        }
    }
}
