// secret.rs — Persisted signing secret.
//
// 32 bytes of OS entropy, hex-encoded to 64 characters on disk. The file is
// created once with owner-only permissions and reused across restarts. Two
// processes racing to create it is resolved by `create_new`: the loser
// re-reads the winner's file instead of overwriting it.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::info;

use crate::error::CredentialError;

/// Secret length in raw bytes (64 hex characters on disk).
pub const SECRET_LEN: usize = 32;

/// Load the secret at `path`, generating and persisting a new one if the
/// file does not exist yet.
pub fn load_or_create(path: &Path) -> Result<[u8; SECRET_LEN], CredentialError> {
    if path.exists() {
        return read_secret(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CredentialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut secret = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut secret);

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    match options.open(path) {
        Ok(mut file) => {
            let io_err = |source| CredentialError::Io {
                path: path.to_path_buf(),
                source,
            };
            file.write_all(hex::encode(secret).as_bytes()).map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
            info!(path = %path.display(), "generated verification secret");
            Ok(secret)
        }
        // Lost a create race — somebody else's secret is the real one.
        Err(err) if err.kind() == ErrorKind::AlreadyExists => read_secret(path),
        Err(source) => Err(CredentialError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_secret(path: &Path) -> Result<[u8; SECRET_LEN], CredentialError> {
    let text = fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes = hex::decode(text.trim()).map_err(|_| CredentialError::MalformedSecret {
        path: path.to_path_buf(),
    })?;
    bytes
        .try_into()
        .map_err(|_| CredentialError::MalformedSecret {
            path: path.to_path_buf(),
        })
}
