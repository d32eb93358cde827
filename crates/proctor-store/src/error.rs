// error.rs — Errors for the action store.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// History was requested before any action log exists. A programming or
    /// sequencing error on the caller's side, surfaced rather than papered
    /// over with an empty history.
    #[error("action log not initialized at {path} (run `proctor init` or record an action first)")]
    NotInitialized { path: PathBuf },

    #[error("failed to open action log {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write action record: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to encode or decode action record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown action type '{0}'")]
    UnknownActionType(String),
}
