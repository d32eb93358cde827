// paths.rs — On-disk layout of Proctor state.
//
// Everything lives under a `.proctor/` directory in the supervised root:
//
//   .proctor/policy.yaml    — policy document (limits, lists, custom rules)
//   .proctor/goals.yaml     — goal document (goals, constraints, categories)
//   .proctor/secret.key     — signing secret for rotating tokens (mode 0600)
//   .proctor/actions.jsonl  — append-only action log, one record per line
//   .proctor/reviews/       — one JSON scorecard per reviewed session
//   .proctor/insights.md    — rolling markdown log of session insights

use std::path::{Path, PathBuf};

/// Name of the state directory created under the supervised root.
pub const STATE_DIR_NAME: &str = ".proctor";

/// Resolved file locations for one supervised root.
#[derive(Debug, Clone)]
pub struct ProctorPaths {
    /// The directory being supervised.
    pub root: PathBuf,
    /// `<root>/.proctor/`.
    pub state_dir: PathBuf,
    pub policy_file: PathBuf,
    pub goals_file: PathBuf,
    pub secret_file: PathBuf,
    pub actions_log: PathBuf,
    pub reviews_dir: PathBuf,
    pub insights_file: PathBuf,
}

impl ProctorPaths {
    /// Standard layout under `<root>/.proctor/`. Resolves paths only;
    /// nothing is created until [`ensure_dirs`](Self::ensure_dirs).
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let state_dir = root.join(STATE_DIR_NAME);
        Self {
            policy_file: state_dir.join("policy.yaml"),
            goals_file: state_dir.join("goals.yaml"),
            secret_file: state_dir.join("secret.key"),
            actions_log: state_dir.join("actions.jsonl"),
            reviews_dir: state_dir.join("reviews"),
            insights_file: state_dir.join("insights.md"),
            root,
            state_dir,
        }
    }

    /// Create the state directory tree if it does not exist yet.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        std::fs::create_dir_all(&self.reviews_dir)?;
        Ok(())
    }
}
