// goals.rs — Goal document: what the agent is supposed to be doing.

use serde::{Deserialize, Serialize};

/// A ranked priority; rank 1 is the most important.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub rank: u32,
    pub text: String,
}

/// The full goal document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Free-text goals for the session.
    pub goals: Vec<String>,
    pub priorities: Vec<Priority>,
    /// Free-text constraints; their tokens feed constraint-adherence scoring.
    pub constraints: Vec<String>,
    /// Names into the built-in category keyword table.
    pub goal_categories: Vec<String>,
    /// Background context, shown to reviewers but not scored.
    pub context: String,
}

impl GoalConfig {
    /// Priorities sorted ascending by rank (rank 1 first).
    pub fn sorted_priorities(&self) -> Vec<Priority> {
        let mut sorted = self.priorities.clone();
        sorted.sort_by_key(|p| p.rank);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_yaml_round_trips() {
        let yaml = r#"
goals:
  - "Clear the support inbox"
priorities:
  - { rank: 2, text: "Schedule the retro" }
  - { rank: 1, text: "Answer customer emails" }
constraints:
  - "never contact the press"
goal_categories: ["email", "calendar"]
context: "Support rotation week"
"#;
        let config: GoalConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.goals.len(), 1);
        assert_eq!(config.goal_categories, vec!["email", "calendar"]);
        assert_eq!(config.context, "Support rotation week");
    }

    #[test]
    fn sorted_priorities_orders_by_rank_ascending() {
        let config = GoalConfig {
            priorities: vec![
                Priority {
                    rank: 3,
                    text: "low".into(),
                },
                Priority {
                    rank: 1,
                    text: "high".into(),
                },
                Priority {
                    rank: 2,
                    text: "mid".into(),
                },
            ],
            ..GoalConfig::default()
        };
        let sorted = config.sorted_priorities();
        assert_eq!(sorted[0].text, "high");
        assert_eq!(sorted[1].text, "mid");
        assert_eq!(sorted[2].text, "low");
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let config: GoalConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.goals.is_empty());
        assert!(config.constraints.is_empty());
        assert!(config.goal_categories.is_empty());
        assert!(config.context.is_empty());
    }
}
