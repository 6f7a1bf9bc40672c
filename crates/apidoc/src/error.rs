//! CLI error types.

use std::path::PathBuf;

use apidoc_config::ConfigError;
use apidoc_model::ModelError;
use apidoc_site::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot wipe out target directory {}", .0.display())]
    Wipe(PathBuf),
}
