//! `apidoc clean` command implementation.

use std::path::PathBuf;

use apidoc_config::Config;
use apidoc_site::wipe_out_target;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the clean command.
#[derive(Args)]
pub(crate) struct CleanArgs {
    /// Output directory to clean.
    #[arg(short, long)]
    output: PathBuf,

    /// Path to configuration file (default: auto-discover apidoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CleanArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        if !wipe_out_target(&self.output, &config) {
            return Err(CliError::Wipe(self.output));
        }
        output.success(&format!("Cleaned {}", self.output.display()));
        Ok(())
    }
}
