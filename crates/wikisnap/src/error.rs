//! CLI error types.

use wikisnap_config::ConfigError;
use wikisnap_model::ModelError;
use wikisnap_store::StoreError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
