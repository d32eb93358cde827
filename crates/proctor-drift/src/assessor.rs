// assessor.rs — Lexical drift scoring of activity summaries.
//
// A summary is tokenized and matched against the keyword table of each
// configured goal category. Matching is bidirectional substring containment
// ("emails" matches keyword "email", token "sched" would match keyword
// "schedule"), which tolerates pluralization and compounding at the cost of
// false positives on short tokens. Two ratios feed the score: the share of
// configured categories with at least one match, and the share of summary
// tokens that matched anything.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use proctor_lexicon::{bidirectional_contains, category_keywords, tokenize};

const CATEGORY_WEIGHT: f64 = 0.6;
const WORD_WEIGHT: f64 = 0.4;

/// Level boundaries on the raw score: below the first is `None`, below the
/// second `Low`, below the third `Medium`, everything else `High`.
const NONE_BELOW: f64 = 0.20;
const LOW_BELOW: f64 = 0.40;
const MEDIUM_BELOW: f64 = 0.70;

/// At most this many unaligned terms are reported per assessment.
const MAX_UNALIGNED_TERMS: usize = 10;

/// Severity of topical drift between observed activity and configured goals.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DriftLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl DriftLevel {
    /// Map a raw drift score in `[0, 1]` to a level.
    pub fn from_score(score: f64) -> Self {
        if score < NONE_BELOW {
            DriftLevel::None
        } else if score < LOW_BELOW {
            DriftLevel::Low
        } else if score < MEDIUM_BELOW {
            DriftLevel::Medium
        } else {
            DriftLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriftLevel::None => "none",
            DriftLevel::Low => "low",
            DriftLevel::Medium => "medium",
            DriftLevel::High => "high",
        }
    }
}

impl fmt::Display for DriftLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One assessment of a free-text activity summary.
#[derive(Debug, Clone, Serialize)]
pub struct DriftAssessment {
    pub level: DriftLevel,
    /// Raw score in `[0, 1]`; higher means further from the configured goals.
    pub score: f64,
    pub explanation: String,
    /// Configured categories with at least one matching token, in the order
    /// they were configured.
    pub aligned_categories: Vec<String>,
    /// Tokens longer than three characters that matched nothing, deduplicated
    /// in first-seen order, capped at [`MAX_UNALIGNED_TERMS`].
    pub unaligned_terms: Vec<String>,
}

/// Stateful wrapper around [`assess_summary`] that remembers the most recent
/// level and refresh time for status reporting. Last write wins.
#[derive(Debug, Default)]
pub struct DriftAssessor {
    current_level: DriftLevel,
    last_refresh: Option<DateTime<Utc>>,
}

impl DriftAssessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assess `summary` against `goal_categories`, recording the level.
    pub fn assess(&mut self, summary: &str, goal_categories: &[String]) -> DriftAssessment {
        let assessment = assess_summary(summary, goal_categories);
        self.current_level = assessment.level;
        self.last_refresh = Some(Utc::now());
        tracing::debug!(
            level = %assessment.level,
            score = assessment.score,
            aligned = assessment.aligned_categories.len(),
            "drift assessed"
        );
        assessment
    }

    /// Level of the most recent assessment; `none` before the first call.
    pub fn current_level(&self) -> DriftLevel {
        self.current_level
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }
}

/// Score one activity summary against the configured goal categories.
pub fn assess_summary(summary: &str, goal_categories: &[String]) -> DriftAssessment {
    let tokens = tokenize(summary);
    if tokens.is_empty() {
        return DriftAssessment {
            level: DriftLevel::None,
            score: 0.0,
            explanation: explanation_for(DriftLevel::None, &[], goal_categories),
            aligned_categories: Vec::new(),
            unaligned_terms: Vec::new(),
        };
    }

    let mut aligned_categories: Vec<String> = Vec::new();
    let mut matched: HashSet<&str> = HashSet::new();
    for category in goal_categories {
        let keywords = category_keywords(category);
        let mut category_aligned = false;
        for token in &tokens {
            if keywords
                .iter()
                .any(|keyword| bidirectional_contains(token, keyword))
            {
                category_aligned = true;
                matched.insert(token.as_str());
            }
        }
        if category_aligned {
            aligned_categories.push(category.clone());
        }
    }

    let category_ratio = if goal_categories.is_empty() {
        1.0
    } else {
        aligned_categories.len() as f64 / goal_categories.len() as f64
    };
    let word_ratio = matched.len() as f64 / tokens.len() as f64;
    let score = 1.0 - (CATEGORY_WEIGHT * category_ratio + WORD_WEIGHT * word_ratio);
    let level = DriftLevel::from_score(score);

    let mut unaligned_terms: Vec<String> = Vec::new();
    for token in &tokens {
        if token.chars().count() <= 3 || matched.contains(token.as_str()) {
            continue;
        }
        if unaligned_terms.iter().any(|seen| seen == token) {
            continue;
        }
        unaligned_terms.push(token.clone());
        if unaligned_terms.len() == MAX_UNALIGNED_TERMS {
            break;
        }
    }

    DriftAssessment {
        level,
        score,
        explanation: explanation_for(level, &aligned_categories, goal_categories),
        aligned_categories,
        unaligned_terms,
    }
}

fn explanation_for(level: DriftLevel, aligned: &[String], configured: &[String]) -> String {
    match level {
        DriftLevel::None => {
            "Activity is aligned with the configured goal categories.".to_string()
        }
        DriftLevel::Low => {
            "Activity mostly matches the configured goal categories, with minor digressions."
                .to_string()
        }
        DriftLevel::Medium => format!(
            "Activity only partially matches the configured goals. \
             Aligned categories: [{}]; configured categories: [{}].",
            aligned.join(", "),
            configured.join(", ")
        ),
        DriftLevel::High => format!(
            "Activity shows little overlap with the configured goals. \
             Aligned categories: [{}]; configured categories: [{}].",
            aligned.join(", "),
            configured.join(", ")
        ),
    }
}
