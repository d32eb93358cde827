// evaluator.rs — Ordered policy rule evaluation.
//
// Evaluation order is fixed and a hard block ends it early:
//
// 1. Spending limits      — only when the action carries an amount
// 2. Contact rules        — message-sending action types only
// 3. Domain rules         — domain-targeting action types only
// 4. Blocked action types
// 5. Custom rules         — in declared order
//
// `rules_checked` records the label of every group actually evaluated, in
// order; a blocking group is always the last entry. Warnings (the spend warn
// threshold, custom `warn` rules) set `requires_confirmation` and keep
// going; the most recent warn message becomes the final reason.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use proctor_config::{PolicyConfig, RuleAction, RuleCondition, RuleField, RuleOperator, TargetRules};
use proctor_lexicon::contains_ci;
use proctor_store::ActionType;

use crate::spend::DailySpendState;

pub const RULE_SPENDING: &str = "spending";
pub const RULE_CONTACTS: &str = "contacts";
pub const RULE_DOMAINS: &str = "domains";
pub const RULE_BLOCKED_ACTIONS: &str = "blocked_actions";
pub const RULE_CUSTOM: &str = "custom_rules";

/// A proposed action, as submitted for verification.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub action_type: ActionType,
    pub target: String,
    pub amount: f64,
    pub description: String,
}

impl ActionRequest {
    pub fn new(action_type: ActionType, target: impl Into<String>) -> Self {
        Self {
            action_type,
            target: target.into(),
            amount: 0.0,
            description: String::new(),
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Result of a policy check.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyCheck {
    pub allowed: bool,
    pub requires_confirmation: bool,
    pub reason: String,
    pub rules_checked: Vec<String>,
    pub daily_spend_remaining: f64,
}

/// Evaluates actions against one policy document. Owns the daily spend
/// state; everything else here is pure.
#[derive(Debug)]
pub struct PolicyEvaluator {
    config: PolicyConfig,
    spend: DailySpendState,
}

impl PolicyEvaluator {
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            config,
            spend: DailySpendState::new(),
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Evaluate `request` against the policy. Pure: records nothing, spends
    /// nothing.
    pub fn check_action(&self, request: &ActionRequest) -> PolicyCheck {
        let check = self.check_action_on(request, Local::now().date_naive());
        tracing::debug!(
            action_type = %request.action_type,
            allowed = check.allowed,
            requires_confirmation = check.requires_confirmation,
            reason = %check.reason,
            "policy check"
        );
        check
    }

    /// Add an allowed spend to the daily running total (rolls the date over
    /// first when it changed). The only mutation this evaluator performs.
    pub fn record_spend(&mut self, amount: f64) {
        self.spend.add_on(amount, Local::now().date_naive());
        tracing::debug!(amount, used_today = self.spend.used_today(), "spend recorded");
    }

    /// Today's remaining daily budget, floored at zero.
    pub fn daily_spend_remaining(&self) -> f64 {
        (self.config.spending.daily - self.spend.used_today()).max(0.0)
    }

    /// Today's running spend total.
    pub fn daily_spend_used(&self) -> f64 {
        self.spend.used_today()
    }

    fn check_action_on(&self, request: &ActionRequest, today: NaiveDate) -> PolicyCheck {
        let mut rules_checked: Vec<String> = Vec::new();
        let mut warn_reason: Option<String> = None;

        let used = self.spend.used_on(today);
        let remaining = (self.config.spending.daily - used).max(0.0);

        // 1. Spending — per-action cap, then daily cap, then warn threshold.
        if request.amount > 0.0 {
            rules_checked.push(RULE_SPENDING.to_string());
            let limits = &self.config.spending;
            if request.amount > limits.per_action {
                return blocked(
                    format!(
                        "amount {:.2} exceeds the per-action limit of {:.2}",
                        request.amount, limits.per_action
                    ),
                    &warn_reason,
                    rules_checked,
                    remaining,
                );
            }
            if used + request.amount > limits.daily {
                return blocked(
                    format!(
                        "amount {:.2} would exceed the daily limit of {:.2} ({:.2} already spent today)",
                        request.amount, limits.daily, used
                    ),
                    &warn_reason,
                    rules_checked,
                    remaining,
                );
            }
            if request.amount > limits.warn_above {
                warn_reason = Some(format!(
                    "amount {:.2} exceeds the warning threshold of {:.2}; confirmation required",
                    request.amount, limits.warn_above
                ));
            }
        }

        // 2. Contact rules — targets of messaging actions are people.
        if request.action_type.is_messaging() {
            rules_checked.push(RULE_CONTACTS.to_string());
            if let Some(reason) = match_target_rules(&self.config.contacts, &request.target, "contact")
            {
                return blocked(reason, &warn_reason, rules_checked, remaining);
            }
        }

        // 3. Domain rules — same semantics, different list.
        if request.action_type.targets_domain() {
            rules_checked.push(RULE_DOMAINS.to_string());
            if let Some(reason) = match_target_rules(&self.config.domains, &request.target, "domain")
            {
                return blocked(reason, &warn_reason, rules_checked, remaining);
            }
        }

        // 4. Globally blocked action types.
        rules_checked.push(RULE_BLOCKED_ACTIONS.to_string());
        if self
            .config
            .blocked_actions
            .contains(request.action_type.as_str())
        {
            return blocked(
                format!("action type '{}' is blocked by policy", request.action_type),
                &warn_reason,
                rules_checked,
                remaining,
            );
        }

        // 5. Custom rules, in declared order. A matched `block` ends
        // evaluation; a matched `warn` keeps going.
        if !self.config.custom_rules.is_empty() {
            rules_checked.push(RULE_CUSTOM.to_string());
            for rule in &self.config.custom_rules {
                if !rule_matches(&rule.condition, request) {
                    continue;
                }
                let reason = rule
                    .reason
                    .clone()
                    .unwrap_or_else(|| default_rule_reason(&rule.condition));
                match rule.then {
                    RuleAction::Block => {
                        return blocked(reason, &warn_reason, rules_checked, remaining)
                    }
                    RuleAction::Warn => warn_reason = Some(reason),
                    RuleAction::Unknown => {}
                }
            }
        }

        let requires_confirmation = warn_reason.is_some();
        PolicyCheck {
            allowed: true,
            requires_confirmation,
            reason: warn_reason.unwrap_or_else(|| "action permitted by policy".to_string()),
            rules_checked,
            daily_spend_remaining: remaining,
        }
    }
}

fn blocked(
    reason: String,
    warn_reason: &Option<String>,
    rules_checked: Vec<String>,
    remaining: f64,
) -> PolicyCheck {
    PolicyCheck {
        allowed: false,
        // A warn raised by an earlier group is not unset by a later block.
        requires_confirmation: warn_reason.is_some(),
        reason,
        rules_checked,
        daily_spend_remaining: remaining,
    }
}

/// Allow/deny list evaluation shared by contacts and domains. Returns the
/// block reason, or `None` to continue.
fn match_target_rules(rules: &TargetRules, target: &str, kind: &str) -> Option<String> {
    if rules.mode == proctor_config::ListMode::Allowlist && !rules.allowed.is_empty() {
        let permitted = rules.allowed.iter().any(|entry| contains_ci(target, entry));
        if !permitted {
            return Some(format!("target '{target}' is not on the {kind} allowlist"));
        }
    }
    if let Some(entry) = rules.blocked.iter().find(|entry| contains_ci(target, entry)) {
        return Some(format!("target '{target}' matches blocked {kind} '{entry}'"));
    }
    None
}

fn rule_matches(condition: &RuleCondition, request: &ActionRequest) -> bool {
    let Some(actual) = field_value(condition.field, request) else {
        return false;
    };
    match condition.operator {
        RuleOperator::Equals => values_equal(&actual, &condition.value),
        RuleOperator::Contains => contains_ci(&value_text(&actual), &value_text(&condition.value)),
        RuleOperator::GreaterThan => match (number_of(&actual), number_of(&condition.value)) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        RuleOperator::LessThan => match (number_of(&actual), number_of(&condition.value)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        // Unrecognized operators never match: a bad rule cannot deny all
        // actions.
        RuleOperator::Unknown => false,
    }
}

fn field_value(field: RuleField, request: &ActionRequest) -> Option<Value> {
    match field {
        RuleField::Type => Some(Value::String(request.action_type.as_str().to_string())),
        RuleField::Target => Some(Value::String(request.target.clone())),
        RuleField::Amount => serde_json::Number::from_f64(request.amount).map(Value::Number),
        RuleField::Description => Some(Value::String(request.description.clone())),
        RuleField::Unknown => None,
    }
}

/// Strict equality: numbers compare numerically (`30` equals `30.0`),
/// strings compare exactly and case-sensitively. No cross-type coercion.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => false,
    }
}

/// Loose numeric view for ordering comparisons: numbers pass through,
/// numeric strings parse.
fn number_of(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn default_rule_reason(condition: &RuleCondition) -> String {
    format!(
        "custom rule matched: {} {} {}",
        condition.field,
        condition.operator,
        value_text(&condition.value)
    )
}
