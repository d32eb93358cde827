// error.rs — Errors for secret persistence.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to access secret file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secret file {path} is malformed (expected 64 hex characters)")]
    MalformedSecret { path: PathBuf },
}
