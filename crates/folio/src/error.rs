//! CLI error types.

use folio_config::ConfigError;
use folio_manifest::{DeclarationError, ValidationError};
use folio_mirror::MirrorError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Declaration(#[from] DeclarationError),

    #[error("Invalid site declaration: {0}")]
    Manifest(#[from] ValidationError),

    #[error("{0}")]
    Mirror(#[from] MirrorError),

    #[error("Failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
