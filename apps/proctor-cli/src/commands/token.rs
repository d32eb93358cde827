// token.rs — Token subcommands: generate, validate.

use clap::Subcommand;
use proctor_config::ConfigStore;
use proctor_credential::{CredentialRotator, DEFAULT_ROTATION_MINUTES};
use proctor_gateway::ProctorPaths;

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Print the token for the current rotation window.
    Generate,
    /// Check a token against the current and previous windows.
    Validate {
        /// The token to check.
        token: String,
    },
}

pub fn execute(cmd: &TokenCommands, paths: &ProctorPaths) -> anyhow::Result<()> {
    let config = ConfigStore::load(&paths.policy_file, &paths.goals_file);
    let rotation_minutes =
        config.policy_lookup_or("credentials.rotation_minutes", DEFAULT_ROTATION_MINUTES);
    let rotator = CredentialRotator::from_secret_file(&paths.secret_file, rotation_minutes)?;

    match cmd {
        TokenCommands::Generate => {
            println!("{}", rotator.generate_token());
        }
        TokenCommands::Validate { token } => {
            if rotator.validate_token(token) {
                println!(
                    "valid (window {}, rotates in {}s)",
                    rotator.current_window(),
                    rotator.ms_until_rotation() / 1000,
                );
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
