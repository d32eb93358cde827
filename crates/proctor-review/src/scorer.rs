// scorer.rs — Deterministic session scoring.
//
// Three sub-scores are computed independently over the ordered action list
// of one session, each floored at zero:
//
//   goal alignment       — share of actions whose type+description tokens
//                          match any configured goal category
//   security compliance  — deductions for invalid credentials on sensitive
//                          tiers and for blocked actions retried past the
//                          block
//   constraint adherence — deductions for blocked actions whose tokens
//                          overlap a configured constraint
//
// overall = round(0.4·alignment + 0.4·security + 0.2·adherence), mapped to a
// letter grade. The same inputs always produce the same review (modulo the
// generation timestamp); nothing here consults a model or the network.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use proctor_config::GoalConfig;
use proctor_lexicon::{bidirectional_contains, category_keywords, tokenize, tokenize_min};
use proctor_store::{ActionRecord, ActionType, Verdict};

const TIER1_PENALTY: i64 = 15;
const TIER2_PENALTY: i64 = 5;
const RETRY_PENALTY: i64 = 20;
const CONSTRAINT_PENALTY: i64 = 25;

/// A non-blocked action of the same type within this many minutes after a
/// blocked one counts as a retry past the block.
const RETRY_WINDOW_MINUTES: i64 = 5;

/// Constraint keywords shorter than this are too common to be meaningful.
const CONSTRAINT_TOKEN_MIN_LEN: usize = 4;

const MAX_BEST_ACTIONS: usize = 3;

const LOW_ALIGNMENT_BELOW: u32 = 70;
const SECURITY_NOTE_BELOW: u32 = 90;
const POSITIVE_NOTE_ABOVE: u32 = 85;

/// Letter grade for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            Grade::A
        } else if score >= 80 {
            Grade::B
        } else if score >= 70 {
            Grade::C
        } else if score >= 60 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three sub-scores, each in `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub goal_alignment: u32,
    pub security_compliance: u32,
    pub constraint_adherence: u32,
}

/// Verdict and credential counts across the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSummary {
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub blocked: usize,
    pub credential_failures: usize,
}

/// A single action referenced from a highlight list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionHighlight {
    pub action_type: ActionType,
    pub target: String,
    pub description: String,
}

impl ActionHighlight {
    fn of(action: &ActionRecord) -> Self {
        Self {
            action_type: action.action_type,
            target: action.target.clone(),
            description: action.description.clone(),
        }
    }
}

/// A blocked action, with the policy reason it was blocked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedHighlight {
    pub action_type: ActionType,
    pub target: String,
    pub reason: String,
}

impl BlockedHighlight {
    fn of(action: &ActionRecord) -> Self {
        Self {
            action_type: action.action_type,
            target: action.target.clone(),
            reason: action.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlights {
    /// Up to three credential-valid, passing, goal-aligned actions, in
    /// original order.
    pub best_actions: Vec<ActionHighlight>,
    /// Every action that did not align with any goal category.
    pub drift_moments: Vec<ActionHighlight>,
    /// Every blocked action.
    pub blocked_actions: Vec<BlockedHighlight>,
    /// Every tier-1 action that ran without a valid credential.
    pub unverified_risks: Vec<ActionHighlight>,
}

/// The full scorecard for one session. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReview {
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub overall_grade: Grade,
    pub overall_score: u32,
    pub scores: ScoreBreakdown,
    pub action_summary: ActionSummary,
    pub highlights: Highlights,
    pub insights: Vec<String>,
}

/// Score one session's ordered action history against the goal document.
pub fn score_session(
    session_id: &str,
    actions: &[ActionRecord],
    goals: &GoalConfig,
) -> SessionReview {
    let categories = goals.goal_categories.as_slice();
    let token_lists: Vec<Vec<String>> = actions.iter().map(action_tokens).collect();
    let aligned: Vec<bool> = token_lists
        .iter()
        .map(|tokens| {
            categories
                .iter()
                .any(|category| matches_category(tokens, category_keywords(category)))
        })
        .collect();

    let scores = ScoreBreakdown {
        goal_alignment: alignment_score(&aligned),
        security_compliance: security_score(actions),
        constraint_adherence: adherence_score(actions, &token_lists, &goals.constraints),
    };
    let overall_score = (0.4 * f64::from(scores.goal_alignment)
        + 0.4 * f64::from(scores.security_compliance)
        + 0.2 * f64::from(scores.constraint_adherence))
    .round() as u32;
    let overall_grade = Grade::from_score(overall_score);

    let best_actions = actions
        .iter()
        .zip(&aligned)
        .filter(|(action, aligned)| {
            action.credential_was_valid && action.verdict == Verdict::Pass && **aligned
        })
        .take(MAX_BEST_ACTIONS)
        .map(|(action, _)| ActionHighlight::of(action))
        .collect();
    let drift_moments = actions
        .iter()
        .zip(&aligned)
        .filter(|(_, aligned)| !**aligned)
        .map(|(action, _)| ActionHighlight::of(action))
        .collect();
    let blocked_actions = actions
        .iter()
        .filter(|action| action.verdict == Verdict::Block)
        .map(BlockedHighlight::of)
        .collect();
    let unverified_risks = actions
        .iter()
        .filter(|action| action.tier == 1 && !action.credential_was_valid)
        .map(ActionHighlight::of)
        .collect();

    let insights = build_insights(actions, &token_lists, categories, &scores);

    tracing::info!(
        session_id,
        score = overall_score,
        grade = %overall_grade,
        actions = actions.len(),
        "session scored"
    );

    SessionReview {
        session_id: session_id.to_string(),
        generated_at: Utc::now(),
        overall_grade,
        overall_score,
        scores,
        action_summary: summarize(actions),
        highlights: Highlights {
            best_actions,
            drift_moments,
            blocked_actions,
            unverified_risks,
        },
        insights,
    }
}

/// Tokens of an action for alignment purposes: the wire name of its type
/// plus its free-text description.
fn action_tokens(action: &ActionRecord) -> Vec<String> {
    tokenize(&format!("{} {}", action.action_type, action.description))
}

fn matches_category(tokens: &[String], keywords: &[&str]) -> bool {
    tokens
        .iter()
        .any(|token| keywords.iter().any(|kw| bidirectional_contains(token, kw)))
}

/// Rounded percentage of aligned actions; an empty session counts as fully
/// aligned.
fn alignment_score(aligned: &[bool]) -> u32 {
    if aligned.is_empty() {
        return 100;
    }
    let matched = aligned.iter().filter(|a| **a).count();
    (matched as f64 / aligned.len() as f64 * 100.0).round() as u32
}

fn security_score(actions: &[ActionRecord]) -> u32 {
    let mut score: i64 = 100;
    for action in actions {
        if action.credential_was_valid {
            continue;
        }
        score -= match action.tier {
            1 => TIER1_PENALTY,
            2 => TIER2_PENALTY,
            _ => 0,
        };
    }
    // One deduction per blocked action that was retried, no matter how many
    // qualifying retries followed it.
    let window = Duration::minutes(RETRY_WINDOW_MINUTES);
    for blocked in actions.iter().filter(|a| a.verdict == Verdict::Block) {
        let retried = actions.iter().any(|later| {
            later.action_type == blocked.action_type
                && later.verdict != Verdict::Block
                && later.timestamp > blocked.timestamp
                && later.timestamp - blocked.timestamp <= window
        });
        if retried {
            score -= RETRY_PENALTY;
        }
    }
    score.max(0) as u32
}

fn adherence_score(
    actions: &[ActionRecord],
    token_lists: &[Vec<String>],
    constraints: &[String],
) -> u32 {
    if constraints.is_empty() {
        return 100;
    }
    let keyword_sets: Vec<HashSet<String>> = constraints
        .iter()
        .map(|constraint| {
            tokenize_min(constraint, CONSTRAINT_TOKEN_MIN_LEN)
                .into_iter()
                .collect()
        })
        .collect();

    let mut score: i64 = 100;
    for (action, tokens) in actions.iter().zip(token_lists) {
        if action.verdict != Verdict::Block {
            continue;
        }
        // At most one deduction per action; first matching constraint stops
        // the scan.
        let violated = keyword_sets
            .iter()
            .any(|set| tokens.iter().any(|token| set.contains(token)));
        if violated {
            score -= CONSTRAINT_PENALTY;
        }
    }
    score.max(0) as u32
}

fn summarize(actions: &[ActionRecord]) -> ActionSummary {
    ActionSummary {
        total: actions.len(),
        passed: actions.iter().filter(|a| a.verdict == Verdict::Pass).count(),
        warned: actions.iter().filter(|a| a.verdict == Verdict::Warn).count(),
        blocked: actions.iter().filter(|a| a.verdict == Verdict::Block).count(),
        credential_failures: actions.iter().filter(|a| !a.credential_was_valid).count(),
    }
}

fn build_insights(
    actions: &[ActionRecord],
    token_lists: &[Vec<String>],
    categories: &[String],
    scores: &ScoreBreakdown,
) -> Vec<String> {
    let mut insights = Vec::new();

    if scores.goal_alignment < LOW_ALIGNMENT_BELOW {
        let top = top_matched_category(token_lists, categories);
        insights.push(format!(
            "Goal alignment was low: most activity matched '{top}' while the configured goal \
             categories are [{}].",
            categories.join(", ")
        ));
    }

    if scores.security_compliance < SECURITY_NOTE_BELOW {
        let count = actions
            .iter()
            .filter(|a| a.tier <= 2 && !a.credential_was_valid)
            .count();
        insights.push(format!(
            "{count} sensitive action(s) ran without a valid verification token."
        ));
    }

    if let Some(action_type) = first_retried_type(actions) {
        insights.push(format!(
            "A blocked '{action_type}' action was retried within five minutes without approval."
        ));
    }

    if scores.goal_alignment > POSITIVE_NOTE_ABOVE
        && scores.security_compliance > POSITIVE_NOTE_ABOVE
        && scores.constraint_adherence > POSITIVE_NOTE_ABOVE
    {
        insights.push("Strong session: actions stayed on goal and within policy.".to_string());
    }

    insights
}

/// The category matching the most actions, ties broken by configured order;
/// "unknown" when no action matched any category.
fn top_matched_category(token_lists: &[Vec<String>], categories: &[String]) -> String {
    let mut best_name: Option<&str> = None;
    let mut best_count = 0usize;
    for category in categories {
        let keywords = category_keywords(category);
        let count = token_lists
            .iter()
            .filter(|tokens| matches_category(tokens, keywords))
            .count();
        if count > best_count {
            best_count = count;
            best_name = Some(category);
        }
    }
    best_name.unwrap_or("unknown").to_string()
}

/// Type of the first blocked action that a non-blocked action of the same
/// type followed within the retry window. Scanned separately from the
/// security deduction, and unlike it also counts a retry logged at the exact
/// same instant.
fn first_retried_type(actions: &[ActionRecord]) -> Option<ActionType> {
    let window = Duration::minutes(RETRY_WINDOW_MINUTES);
    actions
        .iter()
        .filter(|a| a.verdict == Verdict::Block)
        .find(|blocked| {
            actions.iter().any(|later| {
                later.action_type == blocked.action_type
                    && later.verdict != Verdict::Block
                    && later.timestamp >= blocked.timestamp
                    && later.timestamp - blocked.timestamp <= window
            })
        })
        .map(|blocked| blocked.action_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals_with(categories: &[&str]) -> GoalConfig {
        GoalConfig {
            goal_categories: categories.iter().map(|s| s.to_string()).collect(),
            ..GoalConfig::default()
        }
    }

    fn pass(action_type: ActionType, target: &str) -> ActionRecord {
        ActionRecord::new("s-1", action_type, target, Verdict::Pass).with_credential(true)
    }

    fn at(record: ActionRecord, base: DateTime<Utc>, minutes: i64) -> ActionRecord {
        ActionRecord {
            timestamp: base + Duration::minutes(minutes),
            ..record
        }
    }

    #[test]
    fn empty_session_scores_a_perfect_review() {
        let review = score_session("s-1", &[], &goals_with(&["email"]));
        assert_eq!(review.scores.goal_alignment, 100);
        assert_eq!(review.scores.security_compliance, 100);
        assert_eq!(review.scores.constraint_adherence, 100);
        assert_eq!(review.overall_score, 100);
        assert_eq!(review.overall_grade, Grade::A);
        assert!(review.highlights.best_actions.is_empty());
        assert_eq!(review.insights.len(), 1);
        assert!(review.insights[0].starts_with("Strong session"));
    }

    #[test]
    fn alignment_is_the_rounded_share_of_aligned_actions() {
        let goals = goals_with(&["email", "calendar"]);
        let mut actions = Vec::new();
        for i in 0..6 {
            actions.push(pass(ActionType::SendEmail, &format!("peer{i}@example.com")));
        }
        for _ in 0..4 {
            actions.push(pass(ActionType::BrowseWebsite, "https://reddit.example"));
        }

        let review = score_session("s-1", &actions, &goals);
        assert_eq!(review.scores.goal_alignment, 60);
        assert_eq!(review.scores.security_compliance, 100);
        assert_eq!(review.scores.constraint_adherence, 100);
        // round(0.4*60 + 0.4*100 + 0.2*100) = 84
        assert_eq!(review.overall_score, 84);
        assert_eq!(review.overall_grade, Grade::B);
    }

    #[test]
    fn invalid_credentials_deduct_by_tier() {
        let goals = goals_with(&["email"]);

        // Tier 1 without a valid credential: -15.
        let t1 = ActionRecord::new("s-1", ActionType::SendEmail, "a@b.c", Verdict::Pass);
        let review = score_session("s-1", &[t1], &goals);
        assert_eq!(review.scores.security_compliance, 85);

        // Tier 2: -5.
        let t2 = ActionRecord::new("s-1", ActionType::ApiCall, "https://api.example", Verdict::Pass);
        let review = score_session("s-1", &[t2], &goals);
        assert_eq!(review.scores.security_compliance, 95);

        // Tier 3: no deduction.
        let t3 = ActionRecord::new("s-1", ActionType::ReadFile, "/tmp/notes", Verdict::Pass);
        let review = score_session("s-1", &[t3], &goals);
        assert_eq!(review.scores.security_compliance, 100);
    }

    #[test]
    fn retry_within_window_deducts_twenty_and_adds_an_insight() {
        let base = Utc::now();
        let blocked = at(
            ActionRecord::new("s-1", ActionType::SendEmail, "press@example.com", Verdict::Block)
                .with_credential(true)
                .with_reason("target 'press@example.com' matches blocked contact 'press'"),
            base,
            0,
        );
        let retry = at(pass(ActionType::SendEmail, "press2@example.com"), base, 3);

        let review = score_session("s-1", &[blocked, retry], &goals_with(&["email"]));
        assert_eq!(review.scores.security_compliance, 80);
        assert!(review
            .insights
            .iter()
            .any(|i| i.contains("retried within five minutes")));
    }

    #[test]
    fn retry_outside_window_deducts_nothing() {
        let base = Utc::now();
        let blocked = at(
            ActionRecord::new("s-1", ActionType::SendEmail, "press@example.com", Verdict::Block)
                .with_credential(true),
            base,
            0,
        );
        let late_retry = at(pass(ActionType::SendEmail, "press2@example.com"), base, 6);

        let review = score_session("s-1", &[blocked, late_retry], &goals_with(&["email"]));
        assert_eq!(review.scores.security_compliance, 100);
        assert!(!review.insights.iter().any(|i| i.contains("retried")));
    }

    #[test]
    fn one_deduction_per_blocked_action() {
        let base = Utc::now();
        let blocked = at(
            ActionRecord::new("s-1", ActionType::SendEmail, "x@example.com", Verdict::Block)
                .with_credential(true),
            base,
            0,
        );
        let first_retry = at(pass(ActionType::SendEmail, "y@example.com"), base, 1);
        let second_retry = at(pass(ActionType::SendEmail, "z@example.com"), base, 2);

        let review = score_session(
            "s-1",
            &[blocked, first_retry, second_retry],
            &goals_with(&["email"]),
        );
        assert_eq!(review.scores.security_compliance, 80);
    }

    #[test]
    fn each_retried_blocked_action_deducts_separately() {
        let base = Utc::now();
        let actions = vec![
            at(
                ActionRecord::new("s-1", ActionType::SendEmail, "a@example.com", Verdict::Block)
                    .with_credential(true),
                base,
                0,
            ),
            at(pass(ActionType::SendEmail, "b@example.com"), base, 1),
            at(
                ActionRecord::new("s-1", ActionType::MakePurchase, "shop.example", Verdict::Block)
                    .with_credential(true),
                base,
                2,
            ),
            at(pass(ActionType::MakePurchase, "shop.example"), base, 4),
        ];

        let review = score_session("s-1", &actions, &goals_with(&["email"]));
        assert_eq!(review.scores.security_compliance, 60);
    }

    #[test]
    fn adherence_only_penalizes_blocked_constraint_matches() {
        let goals = GoalConfig {
            constraints: vec!["never contact the press".to_string()],
            goal_categories: vec!["email".to_string()],
            ..GoalConfig::default()
        };

        // Blocked and token-overlapping ("press"): -25.
        let violation = ActionRecord::new("s-1", ActionType::SendEmail, "tips@press.example", Verdict::Block)
            .with_credential(true)
            .with_description("press outreach");
        let review = score_session("s-1", &[violation], &goals);
        assert_eq!(review.scores.constraint_adherence, 75);

        // Same tokens, but the action went through: no deduction.
        let allowed = pass(ActionType::SendEmail, "tips@press.example")
            .with_description("press outreach");
        let review = score_session("s-1", &[allowed], &goals);
        assert_eq!(review.scores.constraint_adherence, 100);

        // Blocked, but no token overlap with the constraint: no deduction.
        let unrelated = ActionRecord::new("s-1", ActionType::SendEmail, "a@b.c", Verdict::Block)
            .with_credential(true)
            .with_description("vendor invoice");
        let review = score_session("s-1", &[unrelated], &goals);
        assert_eq!(review.scores.constraint_adherence, 100);
    }

    #[test]
    fn adherence_deducts_once_per_action() {
        let goals = GoalConfig {
            constraints: vec![
                "never contact the press".to_string(),
                "avoid press statements".to_string(),
            ],
            goal_categories: vec!["email".to_string()],
            ..GoalConfig::default()
        };
        // Matches both constraints; only one deduction applies.
        let violation = ActionRecord::new("s-1", ActionType::SendEmail, "tips@press.example", Verdict::Block)
            .with_credential(true)
            .with_description("press outreach");
        let review = score_session("s-1", &[violation], &goals);
        assert_eq!(review.scores.constraint_adherence, 75);
    }

    #[test]
    fn scores_floor_at_zero() {
        let actions: Vec<ActionRecord> = (0..7)
            .map(|i| {
                ActionRecord::new(
                    "s-1",
                    ActionType::SendEmail,
                    format!("p{i}@example.com"),
                    Verdict::Pass,
                )
            })
            .collect();
        let review = score_session("s-1", &actions, &goals_with(&["email"]));
        // 7 tier-1 credential failures would be -105.
        assert_eq!(review.scores.security_compliance, 0);
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(80), Grade::B);
        assert_eq!(Grade::from_score(79), Grade::C);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(69), Grade::D);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn best_actions_are_capped_at_three_in_original_order() {
        let goals = goals_with(&["email"]);
        let actions = vec![
            pass(ActionType::SendEmail, "one@example.com"),
            // Warn verdict: not a best action.
            ActionRecord::new("s-1", ActionType::SendEmail, "warned@example.com", Verdict::Warn)
                .with_credential(true),
            pass(ActionType::SendEmail, "two@example.com"),
            // Invalid credential: not a best action.
            ActionRecord::new("s-1", ActionType::SendEmail, "invalid@example.com", Verdict::Pass),
            pass(ActionType::SendEmail, "three@example.com"),
            pass(ActionType::SendEmail, "four@example.com"),
        ];

        let review = score_session("s-1", &actions, &goals);
        let targets: Vec<&str> = review
            .highlights
            .best_actions
            .iter()
            .map(|a| a.target.as_str())
            .collect();
        assert_eq!(
            targets,
            vec!["one@example.com", "two@example.com", "three@example.com"]
        );
    }

    #[test]
    fn drift_moments_and_unverified_risks() {
        let goals = goals_with(&["email"]);
        let actions = vec![
            pass(ActionType::SendEmail, "a@b.c"),
            // Tier 1, invalid credential, off-goal.
            ActionRecord::new("s-1", ActionType::DeleteFile, "/tmp/x", Verdict::Pass),
            // Tier 2, invalid credential, off-goal: a drift moment but not an
            // unverified risk.
            ActionRecord::new("s-1", ActionType::ApiCall, "https://api.example", Verdict::Pass),
        ];

        let review = score_session("s-1", &actions, &goals);
        assert_eq!(review.highlights.drift_moments.len(), 2);
        assert_eq!(review.highlights.unverified_risks.len(), 1);
        assert_eq!(
            review.highlights.unverified_risks[0].action_type,
            ActionType::DeleteFile
        );
    }

    #[test]
    fn blocked_actions_carry_their_reasons() {
        let goals = goals_with(&["email"]);
        let blocked = ActionRecord::new("s-1", ActionType::ExecuteCommand, "rm -rf /", Verdict::Block)
            .with_credential(true)
            .with_reason("action type 'execute_command' is blocked by policy");
        let review = score_session("s-1", &[blocked], &goals);
        assert_eq!(review.highlights.blocked_actions.len(), 1);
        assert_eq!(
            review.highlights.blocked_actions[0].reason,
            "action type 'execute_command' is blocked by policy"
        );
        assert_eq!(review.action_summary.blocked, 1);
    }

    #[test]
    fn low_alignment_insight_names_the_top_category() {
        // One action ties calendar and email; configured order breaks the tie.
        let goals = goals_with(&["calendar", "email"]);
        let actions = vec![
            pass(ActionType::SendEmail, "a@b.c").with_description("schedule meeting"),
            pass(ActionType::BrowseWebsite, "https://reddit.example"),
            pass(ActionType::BrowseWebsite, "https://news.example"),
        ];

        let review = score_session("s-1", &actions, &goals);
        assert_eq!(review.scores.goal_alignment, 33);
        let insight = &review.insights[0];
        assert!(insight.contains("'calendar'"), "insight was: {insight}");
        assert!(insight.contains("[calendar, email]"));
    }

    #[test]
    fn low_alignment_with_no_matches_names_unknown() {
        let goals = goals_with(&["email"]);
        let actions = vec![
            pass(ActionType::BrowseWebsite, "https://reddit.example"),
            pass(ActionType::BrowseWebsite, "https://news.example"),
        ];
        let review = score_session("s-1", &actions, &goals);
        assert_eq!(review.scores.goal_alignment, 0);
        assert!(review.insights[0].contains("'unknown'"));
    }

    #[test]
    fn security_insight_counts_sensitive_invalid_actions() {
        let goals = goals_with(&["email"]);
        let actions = vec![
            // Tier 1 invalid: -15 brings security to 85, under the note
            // threshold.
            ActionRecord::new("s-1", ActionType::SendEmail, "a@b.c", Verdict::Pass),
            pass(ActionType::SendEmail, "b@c.d"),
        ];
        let review = score_session("s-1", &actions, &goals);
        assert_eq!(review.scores.security_compliance, 85);
        assert!(review
            .insights
            .iter()
            .any(|i| i.contains("1 sensitive action(s) ran without a valid verification token")));
    }

    #[test]
    fn strong_sessions_get_a_positive_insight() {
        let goals = goals_with(&["email"]);
        let actions = vec![
            pass(ActionType::SendEmail, "a@b.c"),
            pass(ActionType::SendEmail, "b@c.d"),
        ];
        let review = score_session("s-1", &actions, &goals);
        assert_eq!(
            review.insights,
            vec!["Strong session: actions stayed on goal and within policy.".to_string()]
        );
    }

    #[test]
    fn action_summary_counts_verdicts_and_credential_failures() {
        let actions = vec![
            pass(ActionType::SendEmail, "a@b.c"),
            ActionRecord::new("s-1", ActionType::MakePurchase, "shop.example", Verdict::Warn)
                .with_credential(true),
            ActionRecord::new("s-1", ActionType::ExecuteCommand, "rm -rf /", Verdict::Block),
        ];
        let review = score_session("s-1", &actions, &goals_with(&["email"]));
        let summary = &review.action_summary;
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.warned, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.credential_failures, 1);
    }
}
