//! Typed errors for the command locator.
//!
//! Library operations return `LocateError`; the CLI and configuration layers
//! wrap these in `anyhow::Error` with added context.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from scanning script trees for declared commands.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Path not found or inaccessible: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("No workflow declared in {}", path.display())]
    NoOrchestrationDeclared { path: PathBuf },

    #[error("Failed to enumerate script files under {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read script file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
