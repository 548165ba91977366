//! CLI error types.

use appletdoc_config::ConfigError;
use appletdoc_site::{BuildError, PageRenderError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] PageRenderError),

    #[error("{0}")]
    Build(#[from] BuildError),
}
