// error.rs — Error types for gateway bring-up and tool execution.

use thiserror::Error;

/// Errors surfaced by gateway state operations.
///
/// Tool handlers convert these to MCP errors at the protocol boundary;
/// everything below the boundary stays typed.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("credential error: {0}")]
    Credential(#[from] proctor_credential::CredentialError),

    #[error("store error: {0}")]
    Store(#[from] proctor_store::StoreError),

    #[error("review error: {0}")]
    Review(#[from] proctor_review::ReviewError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
