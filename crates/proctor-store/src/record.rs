// record.rs — Action types, verdicts, and the action record.
//
// `ActionType` carries two classifications the policy evaluator keys on
// (message-sending types get contact rules, domain-targeting types get
// domain rules) plus a default sensitivity tier used by session scoring:
// tier 1 is the highest risk, tier 3 the lowest.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// The twelve action types an agent can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    SendEmail,
    SendMessage,
    PostContent,
    BrowseWebsite,
    ApiCall,
    DownloadFile,
    MakePurchase,
    ScheduleEvent,
    ReadFile,
    WriteFile,
    DeleteFile,
    ExecuteCommand,
}

impl ActionType {
    pub const ALL: [ActionType; 12] = [
        ActionType::SendEmail,
        ActionType::SendMessage,
        ActionType::PostContent,
        ActionType::BrowseWebsite,
        ActionType::ApiCall,
        ActionType::DownloadFile,
        ActionType::MakePurchase,
        ActionType::ScheduleEvent,
        ActionType::ReadFile,
        ActionType::WriteFile,
        ActionType::DeleteFile,
        ActionType::ExecuteCommand,
    ];

    /// Message-sending types — the targets are people, so contact rules apply.
    pub fn is_messaging(&self) -> bool {
        matches!(
            self,
            ActionType::SendEmail | ActionType::SendMessage | ActionType::PostContent
        )
    }

    /// Types whose target is a URL or host — domain rules apply.
    pub fn targets_domain(&self) -> bool {
        matches!(
            self,
            ActionType::BrowseWebsite | ActionType::ApiCall | ActionType::DownloadFile
        )
    }

    /// Default sensitivity tier: 1 (highest risk) to 3 (lowest).
    pub fn default_tier(&self) -> u8 {
        match self {
            ActionType::SendEmail
            | ActionType::SendMessage
            | ActionType::PostContent
            | ActionType::MakePurchase
            | ActionType::DeleteFile
            | ActionType::ExecuteCommand => 1,
            ActionType::ApiCall
            | ActionType::DownloadFile
            | ActionType::ScheduleEvent
            | ActionType::WriteFile => 2,
            ActionType::BrowseWebsite | ActionType::ReadFile => 3,
        }
    }

    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SendEmail => "send_email",
            ActionType::SendMessage => "send_message",
            ActionType::PostContent => "post_content",
            ActionType::BrowseWebsite => "browse_website",
            ActionType::ApiCall => "api_call",
            ActionType::DownloadFile => "download_file",
            ActionType::MakePurchase => "make_purchase",
            ActionType::ScheduleEvent => "schedule_event",
            ActionType::ReadFile => "read_file",
            ActionType::WriteFile => "write_file",
            ActionType::DeleteFile => "delete_file",
            ActionType::ExecuteCommand => "execute_command",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StoreError::UnknownActionType(s.to_string()))
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    /// Allowed, but flagged for confirmation.
    Warn,
    Block,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verdict::Pass => "pass",
            Verdict::Warn => "warn",
            Verdict::Block => "block",
        };
        write!(f, "{name}")
    }
}

/// One verified action. Created once per verify call, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub action_type: ActionType,
    pub target: String,
    pub amount: f64,
    pub description: String,
    pub verdict: Verdict,
    pub reason: String,
    /// Whether the caller presented a currently-valid verification token.
    pub credential_was_valid: bool,
    /// Sensitivity tier, 1 (highest risk) to 3 (lowest).
    pub tier: u8,
}

impl ActionRecord {
    pub fn new(
        session_id: impl Into<String>,
        action_type: ActionType,
        target: impl Into<String>,
        verdict: Verdict,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            session_id: session_id.into(),
            action_type,
            target: target.into(),
            amount: 0.0,
            description: String::new(),
            verdict,
            reason: String::new(),
            credential_was_valid: false,
            tier: action_type.default_tier(),
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

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_credential(mut self, valid: bool) -> Self {
        self.credential_was_valid = valid;
        self
    }
}
