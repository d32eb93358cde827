// insights.rs — Rolling markdown log of session reviews.
//
// The newest block sits at the top and at most MAX_BLOCKS blocks are kept.
// Writes are best-effort: an unwritable insights file is logged and
// swallowed, it must never fail an active session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;

use crate::error::ReviewError;
use crate::scorer::SessionReview;

/// Maximum number of review blocks kept in the file.
pub const MAX_BLOCKS: usize = 10;

pub struct InsightsLog {
    path: PathBuf,
}

impl InsightsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepend a block for `review`, trimming to [`MAX_BLOCKS`]. Failures are
    /// logged and swallowed.
    pub fn append_review(&self, review: &SessionReview) {
        if let Err(err) = self.try_append(review) {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "could not update insights log"
            );
        }
    }

    pub fn try_append(&self, review: &SessionReview) -> Result<(), ReviewError> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(self.io_error(err)),
        };

        let mut blocks = split_blocks(&existing);
        blocks.insert(0, render_block(review));
        blocks.truncate(MAX_BLOCKS);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let mut content = String::new();
        for block in &blocks {
            content.push_str(block);
            content.push_str("\n\n");
        }
        fs::write(&self.path, content).map_err(|err| self.io_error(err))?;
        tracing::debug!(
            path = %self.path.display(),
            blocks = blocks.len(),
            "insights log updated"
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> ReviewError {
        ReviewError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// One review as a markdown block: a header line, then one bullet per
/// insight.
fn render_block(review: &SessionReview) -> String {
    let mut block = format!(
        "## Session Review — {} | Grade: {} ({}/100)",
        review.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        review.overall_grade,
        review.overall_score,
    );
    for insight in &review.insights {
        block.push_str("\n- ");
        block.push_str(insight);
    }
    block
}

/// Split the file back into blocks. A block starts at a `## ` header and
/// carries every following non-blank line; anything before the first header
/// is dropped.
fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    for line in content.lines() {
        if line.starts_with("## ") {
            blocks.push(line.to_string());
        } else if line.trim().is_empty() {
            continue;
        } else if let Some(block) = blocks.last_mut() {
            block.push('\n');
            block.push_str(line);
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{ActionSummary, Grade, Highlights, ScoreBreakdown};
    use chrono::Utc;

    fn review_with(score: u32, insights: &[&str]) -> SessionReview {
        SessionReview {
            session_id: "s-1".to_string(),
            generated_at: Utc::now(),
            overall_grade: Grade::from_score(score),
            overall_score: score,
            scores: ScoreBreakdown {
                goal_alignment: score,
                security_compliance: score,
                constraint_adherence: score,
            },
            action_summary: ActionSummary {
                total: 0,
                passed: 0,
                warned: 0,
                blocked: 0,
                credential_failures: 0,
            },
            highlights: Highlights {
                best_actions: vec![],
                drift_moments: vec![],
                blocked_actions: vec![],
                unverified_risks: vec![],
            },
            insights: insights.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn first_review_renders_a_header_and_bullets() {
        let dir = tempfile::tempdir().unwrap();
        let log = InsightsLog::new(dir.path().join("insights.md"));

        log.append_review(&review_with(84, &["stayed on goal", "one block"]));

        let content = fs::read_to_string(log.path()).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("## Session Review — "));
        assert!(header.contains("| Grade: B (84/100)"));
        assert_eq!(lines.next(), Some("- stayed on goal"));
        assert_eq!(lines.next(), Some("- one block"));
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn newer_reviews_are_prepended() {
        let dir = tempfile::tempdir().unwrap();
        let log = InsightsLog::new(dir.path().join("insights.md"));

        log.append_review(&review_with(61, &["first"]));
        log.append_review(&review_with(92, &["second"]));

        let content = fs::read_to_string(log.path()).unwrap();
        let newer = content.find("(92/100)").unwrap();
        let older = content.find("(61/100)").unwrap();
        assert!(newer < older, "newest block must come first:\n{content}");
    }

    #[test]
    fn log_is_trimmed_to_ten_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let log = InsightsLog::new(dir.path().join("insights.md"));

        for score in 0..=10 {
            log.append_review(&review_with(score, &["note"]));
        }

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("## Session Review").count(), MAX_BLOCKS);
        // Newest first, oldest evicted.
        assert!(content.lines().next().unwrap().contains("(10/100)"));
        assert!(!content.contains("(0/100)"));
        assert!(content.contains("(1/100)"));
    }

    #[test]
    fn blocks_keep_their_bullets_across_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let log = InsightsLog::new(dir.path().join("insights.md"));

        log.append_review(&review_with(70, &["alpha", "beta"]));
        log.append_review(&review_with(90, &["gamma"]));

        let content = fs::read_to_string(log.path()).unwrap();
        let older = &content[content.find("(70/100)").unwrap()..];
        assert!(older.contains("- alpha\n- beta"));
    }

    #[test]
    fn reviews_without_insights_render_a_bare_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = InsightsLog::new(dir.path().join("insights.md"));

        log.append_review(&review_with(100, &[]));
        log.append_review(&review_with(50, &["later"]));

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("## Session Review").count(), 2);
        assert!(content.contains("(100/100)"));
    }

    #[test]
    fn append_failures_are_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocking_file = dir.path().join("not-a-dir");
        fs::write(&blocking_file, "x").unwrap();

        // Parent path is a file, so the write cannot succeed.
        let log = InsightsLog::new(blocking_file.join("insights.md"));
        log.append_review(&review_with(84, &["ignored"]));
        assert!(log.try_append(&review_with(84, &["ignored"])).is_err());
    }
}
