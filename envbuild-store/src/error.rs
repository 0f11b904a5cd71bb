//! Error types for envbuild-store.

use thiserror::Error;

/// Boxed source error from a store backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can arise while listing parameters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote store rejected or failed the request (auth, network, throttling, bad response).
    #[error("parameter store request for {path} failed")]
    Remote {
        path: String,
        #[source]
        source: BoxError,
    },

    /// A backend failure that carries only a message.
    #[error("parameter store error: {0}")]
    Backend(String),

    /// The store kept returning continuation cursors past the page cap.
    #[error("parameter listing for {path} exceeded {max_pages} pages")]
    PageLimitExceeded { path: String, max_pages: usize },

    /// A page cap of zero would never fetch anything.
    #[error("page limit must be at least 1")]
    InvalidPageLimit,
}
