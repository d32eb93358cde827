// server.rs — MCP gateway server for Proctor.
//
// ProctorServer implements the rmcp ServerHandler trait, exposing the
// verification loop as MCP tools. Every proposed action flows through
// policy evaluation → verdict → append-only log, so the end-of-session
// scorecard is computed over a complete record of what the agent tried
// to do, not just what succeeded.
//
// Tools (prefixed `proctor_` for namespacing):
//   proctor_verify_action  — evaluate an action, log it, rotate the token
//   proctor_assess_drift   — score an activity summary against the goals
//   proctor_session_review — score a session and persist the scorecard
//   proctor_status         — session, drift, spend, and token-window snapshot
//   proctor_history        — recent logged actions for a session

use std::sync::{Arc, Mutex};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

use proctor_config::{ConfigStore, GoalConfig};
use proctor_credential::{CredentialRotator, DEFAULT_ROTATION_MINUTES};
use proctor_drift::DriftAssessor;
use proctor_policy::{ActionRequest, PolicyCheck, PolicyEvaluator};
use proctor_review::{score_session, InsightsLog, ReviewStore, SessionReview};
use proctor_store::{ActionLog, ActionRecord, ActionType, StoreError, Verdict};

use crate::error::GatewayError;
use crate::paths::ProctorPaths;

// ── Tool parameter types ─────────────────────────────────────────

/// Parameters for `proctor_verify_action`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct VerifyActionParams {
    /// Action type, e.g. "send_email", "browse_website", "make_purchase".
    pub action_type: String,
    /// Target of the action: an address, domain, URL, file path, or command.
    pub target: String,
    /// Monetary amount for spending actions. Defaults to 0.
    #[serde(default)]
    pub amount: f64,
    /// Free-text description of what the action will do.
    #[serde(default)]
    pub description: String,
    /// Verification token from the previous response. Omit on the first call.
    #[serde(default)]
    pub token: String,
}

/// Parameters for `proctor_assess_drift`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AssessDriftParams {
    /// Free-text summary of the agent's recent activity.
    pub activity_summary: String,
}

/// Parameters for `proctor_session_review`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SessionReviewParams {
    /// Session to review. Defaults to the most recently active session.
    pub session_id: Option<String>,
}

/// Parameters for `proctor_history`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HistoryParams {
    /// Session to read. Defaults to the live gateway session.
    pub session_id: Option<String>,
    /// Maximum number of records to return, oldest first. Defaults to 20.
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    20
}

// ── Gateway state ────────────────────────────────────────────────

/// Shared mutable state for the gateway server.
///
/// Holds everything the tool handlers need: the policy evaluator, the
/// credential rotator, the drift assessor, and the stores.
pub struct GatewayState {
    pub paths: ProctorPaths,
    /// One session per gateway process.
    pub session_id: String,
    pub goals: GoalConfig,
    pub evaluator: PolicyEvaluator,
    pub rotator: CredentialRotator,
    pub drift: DriftAssessor,
    pub log: ActionLog,
    pub reviews: ReviewStore,
    pub insights: InsightsLog,
}

impl GatewayState {
    /// Initialize gateway state under `paths`. Creates the state directory,
    /// loads both config documents (falling back to defaults), loads or
    /// creates the signing secret, and opens the action log.
    pub fn new(paths: ProctorPaths) -> Result<Self, GatewayError> {
        paths.ensure_dirs()?;

        let config = ConfigStore::load(&paths.policy_file, &paths.goals_file);
        let rotation_minutes =
            config.policy_lookup_or("credentials.rotation_minutes", DEFAULT_ROTATION_MINUTES);
        let rotator = CredentialRotator::from_secret_file(&paths.secret_file, rotation_minutes)?;
        let log = ActionLog::create(&paths.actions_log)?;
        let session_id = Uuid::new_v4().to_string();

        tracing::info!(
            %session_id,
            root = %paths.root.display(),
            rotation_minutes,
            "gateway session started"
        );

        Ok(Self {
            evaluator: PolicyEvaluator::new(config.policy().clone()),
            goals: config.goals().clone(),
            rotator,
            drift: DriftAssessor::new(),
            log,
            reviews: ReviewStore::new(&paths.reviews_dir),
            insights: InsightsLog::new(&paths.insights_file),
            session_id,
            paths,
        })
    }

    /// Run one proposed action through the verification loop: policy
    /// evaluation, token validation, spend accounting, and the action log.
    pub fn verify_action(
        &mut self,
        action_type: ActionType,
        target: &str,
        amount: f64,
        description: &str,
        token: &str,
    ) -> Result<VerifyOutcome, GatewayError> {
        let request = ActionRequest::new(action_type, target)
            .with_amount(amount)
            .with_description(description);
        let check = self.evaluator.check_action(&request);
        let credential_was_valid = self.rotator.validate_token(token);

        let verdict = if !check.allowed {
            Verdict::Block
        } else if check.requires_confirmation {
            Verdict::Warn
        } else {
            Verdict::Pass
        };

        // Blocked actions never count against the budget.
        if check.allowed && amount > 0.0 {
            self.evaluator.record_spend(amount);
        }

        let record = ActionRecord::new(self.session_id.clone(), action_type, target, verdict)
            .with_amount(amount)
            .with_description(description)
            .with_reason(check.reason.clone())
            .with_credential(credential_was_valid);
        self.log.append(&record)?;

        // A fresh token is issued regardless of the verdict, so one rejected
        // action does not strand an otherwise healthy session.
        let next_token = self.rotator.generate_token();

        Ok(VerifyOutcome {
            record,
            check,
            next_token,
        })
    }

    /// Score a session and persist the scorecard. `None` reviews the most
    /// recently active session in the log, falling back to the live one when
    /// nothing has been logged yet.
    pub fn review_session(
        &self,
        session_id: Option<&str>,
    ) -> Result<SessionReview, GatewayError> {
        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => self
                .log
                .latest_session_id()?
                .unwrap_or_else(|| self.session_id.clone()),
        };
        let history = self.log.session_history(&session_id)?;
        let review = score_session(&session_id, &history, &self.goals);
        self.reviews.save(&review)?;
        self.insights.append_review(&review);
        Ok(review)
    }

    /// Logged actions for one session, oldest first, truncated to the most
    /// recent `limit`.
    pub fn session_history(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<ActionRecord>, GatewayError> {
        let mut records = self.log.session_history(session_id)?;
        if records.len() > limit {
            records = records.split_off(records.len() - limit);
        }
        Ok(records)
    }
}

/// Everything produced by one pass through the verification loop.
#[derive(Debug)]
pub struct VerifyOutcome {
    pub record: ActionRecord,
    pub check: PolicyCheck,
    pub next_token: String,
}

// ── MCP Server ───────────────────────────────────────────────────

/// The MCP gateway server. Holds shared state and the tool router.
pub struct ProctorServer {
    state: Arc<Mutex<GatewayState>>,
    tool_router: ToolRouter<Self>,
}

// Tool definitions. Each `#[tool]` method becomes an MCP tool that an agent
// client can call.
#[tool_router]
impl ProctorServer {
    /// Create a new gateway server rooted at `paths`.
    pub fn new(paths: ProctorPaths) -> Result<Self, GatewayError> {
        let state = GatewayState::new(paths)?;
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            tool_router: Self::tool_router(),
        })
    }

    /// Create a server wrapping existing state (for testing).
    pub fn with_state(state: GatewayState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared state (for testing).
    pub fn state(&self) -> &Arc<Mutex<GatewayState>> {
        &self.state
    }

    #[tool(
        description = "Verify a proposed real-world action against the active policy before performing it. Logs the action with its verdict, validates the presented verification token, and returns a fresh token for the next call."
    )]
    fn proctor_verify_action(
        &self,
        Parameters(params): Parameters<VerifyActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let action_type = parse_action_type(&params.action_type)?;
        let mut state = self
            .state
            .lock()
            .map_err(|e| McpError::internal_error(format!("lock poisoned: {}", e), None))?;
        let outcome = state
            .verify_action(
                action_type,
                &params.target,
                params.amount,
                &params.description,
                &params.token,
            )
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let response = serde_json::json!({
            "record_id": outcome.record.id.to_string(),
            "session_id": outcome.record.session_id,
            "verdict": outcome.record.verdict.to_string(),
            "allowed": outcome.check.allowed,
            "requires_confirmation": outcome.check.requires_confirmation,
            "reason": outcome.check.reason,
            "rules_checked": outcome.check.rules_checked,
            "daily_spend_remaining": outcome.check.daily_spend_remaining,
            "credential_was_valid": outcome.record.credential_was_valid,
            "verification_token": outcome.next_token,
        });
        Ok(CallToolResult::success(vec![Content::json(response)
            .map_err(|e| {
                McpError::internal_error(e.to_string(), None)
            })?]))
    }

    #[tool(
        description = "Assess how far recent activity has drifted from the configured goal categories. Takes a free-text summary of what the agent has been doing since the last check."
    )]
    fn proctor_assess_drift(
        &self,
        Parameters(params): Parameters<AssessDriftParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| McpError::internal_error(format!("lock poisoned: {}", e), None))?;
        let categories = state.goals.goal_categories.clone();
        let assessment = state.drift.assess(&params.activity_summary, &categories);

        Ok(CallToolResult::success(vec![Content::json(assessment)
            .map_err(|e| {
                McpError::internal_error(e.to_string(), None)
            })?]))
    }

    #[tool(
        description = "Produce the end-of-session scorecard: goal alignment, security compliance, and constraint adherence sub-scores with a letter grade, plus highlights and insights. Persists the scorecard and updates the rolling insights log. Defaults to the most recently active session."
    )]
    fn proctor_session_review(
        &self,
        Parameters(params): Parameters<SessionReviewParams>,
    ) -> Result<CallToolResult, McpError> {
        let state = self
            .state
            .lock()
            .map_err(|e| McpError::internal_error(format!("lock poisoned: {}", e), None))?;
        let review = state
            .review_session(params.session_id.as_deref())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::json(review)
            .map_err(|e| {
                McpError::internal_error(e.to_string(), None)
            })?]))
    }

    #[tool(
        description = "Snapshot of the live session: session id, current drift level, spend used and remaining today, and the rotating-token window."
    )]
    fn proctor_status(&self) -> Result<CallToolResult, McpError> {
        let state = self
            .state
            .lock()
            .map_err(|e| McpError::internal_error(format!("lock poisoned: {}", e), None))?;
        let actions = state
            .log
            .session_history(&state.session_id)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let response = serde_json::json!({
            "session_id": state.session_id,
            "root": state.paths.root.display().to_string(),
            "drift_level": state.drift.current_level(),
            "last_drift_check": state.drift.last_refresh().map(|t| t.to_rfc3339()),
            "daily_spend_used": state.evaluator.daily_spend_used(),
            "daily_spend_remaining": state.evaluator.daily_spend_remaining(),
            "rotation_minutes": state.rotator.rotation_minutes(),
            "current_window": state.rotator.current_window(),
            "ms_until_rotation": state.rotator.ms_until_rotation(),
            "actions_this_session": actions.len(),
        });
        Ok(CallToolResult::success(vec![Content::json(response)
            .map_err(|e| {
                McpError::internal_error(e.to_string(), None)
            })?]))
    }

    #[tool(
        description = "Recent logged actions for a session, oldest first. Defaults to the live session."
    )]
    fn proctor_history(
        &self,
        Parameters(params): Parameters<HistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let state = self
            .state
            .lock()
            .map_err(|e| McpError::internal_error(format!("lock poisoned: {}", e), None))?;
        let session_id = params
            .session_id
            .unwrap_or_else(|| state.session_id.clone());
        let records = state
            .session_history(&session_id, params.limit)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let items: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id.to_string(),
                    "timestamp": r.timestamp.to_rfc3339(),
                    "action_type": r.action_type,
                    "target": r.target,
                    "amount": r.amount,
                    "verdict": r.verdict,
                    "reason": r.reason,
                    "credential_was_valid": r.credential_was_valid,
                })
            })
            .collect();

        let response = serde_json::json!({
            "session_id": session_id,
            "actions": items,
            "count": items.len(),
        });
        Ok(CallToolResult::success(vec![Content::json(response)
            .map_err(|e| {
                McpError::internal_error(e.to_string(), None)
            })?]))
    }
}

#[tool_handler]
impl ServerHandler for ProctorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "proctor".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Proctor".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Proctor MCP server. Call proctor_verify_action before \
                 performing any real-world action, presenting the \
                 verification_token from the previous response each time. \
                 Report activity with proctor_assess_drift periodically, \
                 and finish with proctor_session_review to get the session \
                 scorecard."
                    .into(),
            ),
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Parse an action type name, returning an MCP error on failure.
fn parse_action_type(s: &str) -> Result<ActionType, McpError> {
    s.parse()
        .map_err(|e: StoreError| McpError::invalid_params(e.to_string(), None))
}
