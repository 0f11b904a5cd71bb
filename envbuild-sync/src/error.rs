//! Error types for envbuild-sync.

use std::path::PathBuf;

use thiserror::Error;

use envbuild_renderer::RenderError;
use envbuild_store::StoreError;

/// All errors that can abort a build run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The template could not be read (missing, unreadable, not UTF-8).
    #[error("cannot read template {path}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing parameters from the store failed.
    #[error("fetching parameters failed")]
    Store(#[from] StoreError),

    /// The template could not be rendered under the configured policies.
    #[error("rendering failed")]
    Render(#[from] RenderError),

    /// An I/O error while inspecting or writing the output, with annotated path.
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
