//! Chat data access error types.

use thiserror::Error;

use crate::domain::entities::ServerId;

/// Data access error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DataError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown server: {0}")]
    UnknownServer(ServerId),

    #[error("member sync failed for {server}: {message}")]
    SyncFailed { server: ServerId, message: String },
}

impl DataError {
    /// Creates sync failed error.
    #[must_use]
    pub fn sync_failed(server: ServerId, message: impl Into<String>) -> Self {
        Self::SyncFailed {
            server,
            message: message.into(),
        }
    }

    /// Returns whether retrying the operation may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::SyncFailed { .. })
    }
}
