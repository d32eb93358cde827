// store.rs — Config loading and dotted-path lookup.
//
// `ConfigStore::load` never fails: a missing file is the normal pre-init
// state (debug log), a malformed file is an authoring error (warn log), and
// both fall back to built-in defaults. The raw parsed trees are kept around
// so callers can read values the typed structs do not model, via dotted-path
// lookup with a caller-supplied default.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::goals::GoalConfig;
use crate::policy::PolicyConfig;

/// Default `policy.yaml` written by `proctor init`.
pub const DEFAULT_POLICY_YAML: &str = r#"# policy.yaml — rules applied to every proposed action.

spending:
  per_action: 50 # hard cap for a single action
  daily: 200 # hard cap for the running daily total
  warn_above: 20 # above this, allowed but flagged for confirmation

contacts:
  mode: blocklist # or: allowlist
  allowed: []
  blocked: []

domains:
  mode: blocklist
  allowed: []
  blocked: []

# Action types that are never allowed, e.g. execute_command.
blocked_actions: []

# Custom rules run last, in declared order.
# Operators: equals, contains, greater_than, less_than.
custom_rules: []
# - if: { field: target, operator: contains, value: "competitor.com" }
#   then: block
#   reason: "no outreach to competitors"

credentials:
  rotation_minutes: 15
"#;

/// Default `goals.yaml` written by `proctor init`.
pub const DEFAULT_GOALS_YAML: &str = r#"# goals.yaml — what the agent is supposed to be doing.

goals:
  - "Keep the inbox under control"

priorities:
  - { rank: 1, text: "Answer customer emails" }

# Free-text constraints; blocked actions whose description overlaps a
# constraint count against the session's adherence score.
constraints: []

# Names from the built-in category table: email, calendar, productivity,
# coding, research, finance, communication, files, shopping, browsing.
goal_categories: ["email", "calendar", "productivity"]

context: ""
"#;

/// Loaded configuration plus the raw trees for dotted-path lookup.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    policy: PolicyConfig,
    goals: GoalConfig,
    policy_tree: Value,
    goals_tree: Value,
}

impl ConfigStore {
    /// Load both documents, substituting defaults for anything missing or
    /// malformed. Never fails.
    pub fn load(policy_path: &Path, goals_path: &Path) -> Self {
        let policy_tree = read_tree(policy_path);
        let goals_tree = read_tree(goals_path);
        Self {
            policy: typed_or_default(&policy_tree, policy_path),
            goals: typed_or_default(&goals_tree, goals_path),
            policy_tree,
            goals_tree,
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn goals(&self) -> &GoalConfig {
        &self.goals
    }

    /// Dotted-path lookup into the policy tree, e.g.
    /// `policy_lookup_or("spending.daily", 200.0)`.
    pub fn policy_lookup_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        lookup_or(&self.policy_tree, path, default)
    }

    /// Dotted-path lookup into the goals tree.
    pub fn goals_lookup_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        lookup_or(&self.goals_tree, path, default)
    }
}

/// Walk `tree` by the dotted `path`; deserialize the node, or return
/// `default` when the path is absent or the value has the wrong shape.
pub fn lookup_or<T: DeserializeOwned>(tree: &Value, path: &str, default: T) -> T {
    let mut node = tree;
    for part in path.split('.') {
        match node.get(part) {
            Some(next) => node = next,
            None => return default,
        }
    }
    serde_json::from_value(node.clone()).unwrap_or(default)
}

/// Write the default documents for any of the two paths that do not exist
/// yet; returns the paths actually created.
pub fn write_default_files(
    policy_path: &Path,
    goals_path: &Path,
) -> Result<Vec<std::path::PathBuf>, ConfigError> {
    let mut created = Vec::new();
    for (path, contents) in [
        (policy_path, DEFAULT_POLICY_YAML),
        (goals_path, DEFAULT_GOALS_YAML),
    ] {
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, contents).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        created.push(path.to_path_buf());
    }
    Ok(created)
}

fn read_tree(path: &Path) -> Value {
    if !path.exists() {
        debug!(path = %path.display(), "config file not present; using defaults");
        return Value::Null;
    }
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read config; using defaults");
            return Value::Null;
        }
    };
    match serde_yaml::from_str(&text) {
        Ok(tree) => tree,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to parse config; using defaults");
            Value::Null
        }
    }
}

fn typed_or_default<T: DeserializeOwned + Default>(tree: &Value, path: &Path) -> T {
    if tree.is_null() {
        return T::default();
    }
    match serde_json::from_value(tree.clone()) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config did not match the expected shape; using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ListMode;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_with_missing_files_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::load(&dir.path().join("policy.yaml"), &dir.path().join("goals.yaml"));
        assert_eq!(store.policy().spending.daily, 200.0);
        assert!(store.goals().goal_categories.is_empty());
    }

    #[test]
    fn load_with_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let policy = write(dir.path(), "policy.yaml", "{ unclosed: [");
        let goals = write(dir.path(), "goals.yaml", "goal_categories: [\"email\"]");
        let store = ConfigStore::load(&policy, &goals);
        assert_eq!(store.policy().spending.per_action, 50.0);
        assert_eq!(store.goals().goal_categories, vec!["email"]);
    }

    #[test]
    fn load_parses_valid_documents() {
        let dir = tempfile::tempdir().unwrap();
        let policy = write(
            dir.path(),
            "policy.yaml",
            "spending: { per_action: 10, daily: 40, warn_above: 5 }\ncontacts: { mode: allowlist, allowed: [\"team.com\"] }\n",
        );
        let goals = write(dir.path(), "goals.yaml", "constraints: [\"never email the press\"]");
        let store = ConfigStore::load(&policy, &goals);
        assert_eq!(store.policy().spending.per_action, 10.0);
        assert_eq!(store.policy().contacts.mode, ListMode::Allowlist);
        assert_eq!(store.goals().constraints.len(), 1);
    }

    #[test]
    fn dotted_lookup_finds_nested_values() {
        let dir = tempfile::tempdir().unwrap();
        let policy = write(dir.path(), "policy.yaml", DEFAULT_POLICY_YAML);
        let goals = write(dir.path(), "goals.yaml", DEFAULT_GOALS_YAML);
        let store = ConfigStore::load(&policy, &goals);
        assert_eq!(store.policy_lookup_or("spending.daily", 0.0), 200.0);
        assert_eq!(store.policy_lookup_or("credentials.rotation_minutes", 99u64), 15);
        assert_eq!(store.policy_lookup_or("credentials.missing", 7u64), 7);
        assert_eq!(
            store.goals_lookup_or("goal_categories", Vec::<String>::new()),
            vec!["email", "calendar", "productivity"]
        );
    }

    #[test]
    fn dotted_lookup_falls_back_on_shape_mismatch() {
        let tree: Value = serde_json::json!({ "spending": { "daily": "not a number" } });
        assert_eq!(lookup_or(&tree, "spending.daily", 42.0), 42.0);
    }

    #[test]
    fn default_templates_parse_into_valid_configs() {
        let policy: PolicyConfig = serde_yaml::from_str(DEFAULT_POLICY_YAML).unwrap();
        assert_eq!(policy.spending.daily, 200.0);
        let goals: GoalConfig = serde_yaml::from_str(DEFAULT_GOALS_YAML).unwrap();
        assert_eq!(goals.goal_categories.len(), 3);
    }

    #[test]
    fn write_default_files_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.yaml");
        let goals = dir.path().join("goals.yaml");
        fs::write(&policy, "spending: { daily: 7 }\n").unwrap();

        let created = write_default_files(&policy, &goals).unwrap();
        assert_eq!(created, vec![goals.clone()]);

        // the pre-existing file is untouched
        let store = ConfigStore::load(&policy, &goals);
        assert_eq!(store.policy().spending.daily, 7.0);
        assert!(goals.exists());
    }
}
