//! Public boundary types for the duplicate-detection engine.
//!
//! The surrounding web/store layer speaks JSON; every record here carries
//! serde derives with the camelCase field names of that boundary. Store
//! rows arrive as [`CandidateRecord`] and are validated exactly once, at
//! ingestion, into [`Candidate`] - the engine itself only ever sees the
//! strongly-typed form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// TUNED DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Minimum token-set Jaccard for a candidate to be kept on that signal.
pub const DEFAULT_TOKEN_THRESHOLD: f64 = 0.18;
/// Minimum trigram Dice for a candidate to be kept on that signal.
pub const DEFAULT_TRIGRAM_THRESHOLD: f64 = 0.32;
/// Queries normalizing to fewer characters than this return no matches.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 8;
/// Query token sets are truncated (in input order) to bound per-candidate
/// work; candidate token sets are never capped.
pub const DEFAULT_MAX_QUERY_TOKENS: usize = 10;
/// Output cap on the ranked match list.
pub const DEFAULT_MAX_MATCHES: usize = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Lifecycle state of a published question, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Open,
    Closed,
    Resolved,
    Cancelled,
}

/// One row of the candidate pool as the external store supplies it.
/// Fields the engine requires are still optional at this layer; validation
/// happens once, in [`Candidate::from_record`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub closes_at: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<QuestionStatus>,
}

/// A validated candidate question. Read-only to the engine; the caller
/// owns its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub closes_at: Option<NaiveDate>,
    pub status: Option<QuestionStatus>,
}

impl Candidate {
    /// Validate a store row. A record without an id or title can neither be
    /// scored nor reported; the ranker skips such rows and keeps going.
    /// An empty string counts as missing.
    pub fn from_record(record: &CandidateRecord) -> Result<Self, MatcherError> {
        let id = record
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(MatcherError::InvalidCandidate("id"))?;
        let title = record
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .ok_or(MatcherError::InvalidCandidate("title"))?;
        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            closes_at: record.closes_at,
            status: record.status,
        })
    }
}

/// One ranked near-duplicate in the response, shaped for the web layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMatch {
    pub id: String,
    pub title: String,
    pub closes_at: Option<NaiveDate>,
    /// Whether the candidate has already closed (`closes_at < today`), so
    /// the caller can warn "looks already resolved" vs. "active duplicate".
    pub ended: bool,
    pub status: Option<QuestionStatus>,
    /// Fused similarity as an integer percentage, 0-100.
    pub score: u8,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Tuning knobs for the scorer/ranker.
///
/// The defaults carry the empirically chosen production values - they are
/// configuration, not invariants. The thresholds are tuned for precision
/// over recall: better to miss a weak duplicate than to flood the author
/// with false positives.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    pub token_threshold: f64,
    pub trigram_threshold: f64,
    pub min_query_chars: usize,
    pub max_query_tokens: usize,
    pub max_matches: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            token_threshold: DEFAULT_TOKEN_THRESHOLD,
            trigram_threshold: DEFAULT_TRIGRAM_THRESHOLD,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            max_query_tokens: DEFAULT_MAX_QUERY_TOKENS,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

impl MatcherConfig {
    /// Bounds check, run once by [`crate::DuplicateMatcher::with_config`].
    pub fn validate(&self) -> Result<(), MatcherError> {
        if !(0.0..=1.0).contains(&self.token_threshold) {
            return Err(MatcherError::InvalidConfig(format!(
                "token_threshold {} outside [0, 1]",
                self.token_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.trigram_threshold) {
            return Err(MatcherError::InvalidConfig(format!(
                "trigram_threshold {} outside [0, 1]",
                self.trigram_threshold
            )));
        }
        if self.max_query_tokens == 0 {
            return Err(MatcherError::InvalidConfig(
                "max_query_tokens must be nonzero".to_string(),
            ));
        }
        if self.max_matches == 0 {
            return Err(MatcherError::InvalidConfig(
                "max_matches must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors surfaced at the engine boundary. Per-candidate scoring is pure;
/// the only failures are input-shape problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    /// A pool record is missing a required field. The ranker handles this
    /// locally by skipping the record.
    #[error("candidate record is missing required field '{0}'")]
    InvalidCandidate(&'static str),
    /// Rejected by [`MatcherConfig::validate`].
    #[error("invalid matcher configuration: {0}")]
    InvalidConfig(String),
}
