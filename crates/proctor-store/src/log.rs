// log.rs — Append-only JSONL action history.
//
// One JSON object per line, append-friendly and easy to inspect with
// standard tools (jq, grep). Writes are buffered and flushed per record so a
// crash never loses an acknowledged append. `create` is for writers (the
// gateway, `proctor init`); `open` refuses to conjure up an empty history for
// readers that expected one to exist.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::record::ActionRecord;

/// Append-only action history backed by a JSONL file.
#[derive(Debug)]
pub struct ActionLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl ActionLog {
    /// Open the log for appending, creating the file (and parent directories)
    /// if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        }
        Self::open_writer(path)
    }

    /// Open an existing log. Fails with [`StoreError::NotInitialized`] when
    /// the file does not exist — history-dependent callers must not silently
    /// observe an empty history that was never written.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StoreError::NotInitialized { path });
        }
        Self::open_writer(path)
    }

    fn open_writer(path: PathBuf) -> Result<Self, StoreError> {
        // Append mode — existing records are never overwritten.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Append one record and flush.
    pub fn append(&mut self, record: &ActionRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        tracing::debug!(id = %record.id, action_type = %record.action_type, "action recorded");
        Ok(())
    }

    /// Read every record in file order (oldest first). Skips blank lines.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<ActionRecord>, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::NotInitialized {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    /// All records for one session, ordered by timestamp ascending.
    pub fn session_history(&self, session_id: &str) -> Result<Vec<ActionRecord>, StoreError> {
        let mut records: Vec<ActionRecord> = Self::read_all(&self.path)?
            .into_iter()
            .filter(|r| r.session_id == session_id)
            .collect();
        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }

    /// The session id of the most recently written record, if any.
    pub fn latest_session_id(&self) -> Result<Option<String>, StoreError> {
        let records = Self::read_all(&self.path)?;
        Ok(records
            .into_iter()
            .max_by_key(|r| r.timestamp)
            .map(|r| r.session_id))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
