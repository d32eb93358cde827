//! # proctor-gateway
//!
//! The MCP gateway server. Exposes Proctor's verification loop to agent
//! clients as five tools: verify an action, assess drift, review a session,
//! report status, and read history. All state for one supervised root lives
//! under its `.proctor/` directory; one gateway process is one session.

pub mod error;
pub mod paths;
pub mod server;

pub use error::GatewayError;
pub use paths::{ProctorPaths, STATE_DIR_NAME};
pub use server::{GatewayState, ProctorServer, VerifyOutcome};
