// commands/mod.rs — CLI subcommand implementations.

pub mod check;
pub mod drift;
pub mod history;
pub mod init;
pub mod review;
pub mod serve;
pub mod token;
