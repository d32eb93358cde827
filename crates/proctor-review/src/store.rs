// store.rs — JSON persistence of session reviews, one file per session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ReviewError;
use crate::scorer::SessionReview;

pub struct ReviewStore {
    dir: PathBuf,
}

impl ReviewStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the review as pretty JSON under `<session id>.json`, creating
    /// the directory if needed. Saving the same session again overwrites.
    pub fn save(&self, review: &SessionReview) -> Result<PathBuf, ReviewError> {
        fs::create_dir_all(&self.dir).map_err(|err| ReviewError::Io {
            path: self.dir.clone(),
            source: err,
        })?;
        let path = self.review_path(&review.session_id);
        let json = serde_json::to_string_pretty(review)?;
        fs::write(&path, json).map_err(|err| ReviewError::Io {
            path: path.clone(),
            source: err,
        })?;
        tracing::info!(path = %path.display(), "session review saved");
        Ok(path)
    }

    pub fn load(&self, session_id: &str) -> Result<Option<SessionReview>, ReviewError> {
        let path = self.review_path(session_id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ReviewError::Io { path, source: err }),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn review_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(session_id)))
    }
}

/// Session ids become file names; anything outside a conservative character
/// set is replaced.
fn sanitize(session_id: &str) -> String {
    session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
