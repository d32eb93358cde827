// policy.rs — Policy document: spending limits, target lists, custom rules.
//
// Rule enums (`field`, `operator`, `then`) deserialize through `From<String>`
// instead of failing on unrecognized values: a typo in one custom rule must
// not invalidate the whole document, and an unrecognized operator or action
// simply never matches / never fires. Fail-open for authoring errors.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending limits, in the account's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingLimits {
    /// Hard cap for a single action.
    pub per_action: f64,
    /// Hard cap for the running daily total.
    pub daily: f64,
    /// Amounts above this are allowed but flagged for confirmation.
    pub warn_above: f64,
}

impl Default for SpendingLimits {
    fn default() -> Self {
        Self {
            per_action: 50.0,
            daily: 200.0,
            warn_above: 20.0,
        }
    }
}

/// How a [`TargetRules`] list is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Only targets containing an allowed entry pass (when the list is non-empty).
    Allowlist,
    /// Targets containing a blocked entry are rejected; everything else passes.
    #[default]
    Blocklist,
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListMode::Allowlist => write!(f, "allowlist"),
            ListMode::Blocklist => write!(f, "blocklist"),
        }
    }
}

/// Allow/deny lists matched by case-insensitive containment against the
/// action target. Used for both contacts and domains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetRules {
    pub mode: ListMode,
    pub allowed: Vec<String>,
    pub blocked: Vec<String>,
}

/// Which field of the proposed action a custom rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RuleField {
    Type,
    Target,
    Amount,
    Description,
    /// Unrecognized field name; extracts nothing and never matches.
    Unknown,
}

impl From<String> for RuleField {
    fn from(s: String) -> Self {
        match s.as_str() {
            "type" => RuleField::Type,
            "target" => RuleField::Target,
            "amount" => RuleField::Amount,
            "description" => RuleField::Description,
            _ => RuleField::Unknown,
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleField::Type => "type",
            RuleField::Target => "target",
            RuleField::Amount => "amount",
            RuleField::Description => "description",
            RuleField::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Comparison operator of a custom rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RuleOperator {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
    /// Unrecognized operator; never matches.
    Unknown,
}

impl From<String> for RuleOperator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" => RuleOperator::Equals,
            "contains" => RuleOperator::Contains,
            "greater_than" => RuleOperator::GreaterThan,
            "less_than" => RuleOperator::LessThan,
            _ => RuleOperator::Unknown,
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleOperator::Equals => "equals",
            RuleOperator::Contains => "contains",
            RuleOperator::GreaterThan => "greater_than",
            RuleOperator::LessThan => "less_than",
            RuleOperator::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// What a matched custom rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RuleAction {
    Block,
    Warn,
    /// Unrecognized action; the rule has no effect.
    Unknown,
}

impl From<String> for RuleAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "block" => RuleAction::Block,
            "warn" => RuleAction::Warn,
            _ => RuleAction::Unknown,
        }
    }
}

/// Condition of a custom rule: `field operator value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: RuleField,
    pub operator: RuleOperator,
    pub value: serde_json::Value,
}

/// A user-authored rule, evaluated after the built-in rule groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRule {
    #[serde(rename = "if")]
    pub condition: RuleCondition,
    pub then: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The full policy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub spending: SpendingLimits,
    pub contacts: TargetRules,
    pub domains: TargetRules,
    /// Action type names that are blocked outright.
    pub blocked_actions: BTreeSet<String>,
    pub custom_rules: Vec<CustomRule>,
}
