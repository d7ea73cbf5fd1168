//! Per-candidate similarity scoring.
//!
//! The query side is prepared once as a [`QuerySignature`] before the pool
//! scan, so each candidate only pays for its own normalization and
//! tokenization.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::interface::{Candidate, DuplicateMatch, MatcherConfig};
use crate::similarity::{dice_from_counts, jaccard, trigram_counts};
use crate::text::{normalize, tokenize};

/// Precomputed query-side data for one matching request.
pub(crate) struct QuerySignature {
    tokens: HashSet<String>,
    trigrams: HashMap<[char; 3], u32>,
}

impl QuerySignature {
    /// Prepare the query for scoring, or `None` when it carries too little
    /// signal to score safely: fewer than `min_query_chars` normalized
    /// characters, or an empty token set after the input-order cap.
    pub(crate) fn build(query: &str, config: &MatcherConfig) -> Option<Self> {
        let normalized = normalize(query);
        if normalized.chars().count() < config.min_query_chars {
            return None;
        }
        let mut tokens = tokenize(query);
        tokens.truncate(config.max_query_tokens);
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            tokens: tokens.into_iter().collect(),
            trigrams: trigram_counts(&normalized),
        })
    }

    pub(crate) fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// A candidate that has been scored against the query, with both component
/// signals kept for the threshold check.
pub(crate) struct ScoredCandidate {
    pub(crate) candidate: Candidate,
    pub(crate) token_score: f64,
    pub(crate) trigram_score: f64,
}

impl ScoredCandidate {
    /// Fused score: the maximum of the two signals, never an average. The
    /// signals catch different failure modes, so one firing is enough.
    pub(crate) fn score(&self) -> f64 {
        self.token_score.max(self.trigram_score)
    }

    /// Independent thresholds: kept iff either signal clears its own bar.
    pub(crate) fn passes(&self, config: &MatcherConfig) -> bool {
        self.token_score >= config.token_threshold
            || self.trigram_score >= config.trigram_threshold
    }

    /// Build the response record, rounding the fused score to an integer
    /// percentage and flagging candidates that closed before `today`.
    pub(crate) fn into_match(self, today: NaiveDate) -> DuplicateMatch {
        let score = (self.score() * 100.0).round() as u8;
        DuplicateMatch {
            ended: self.candidate.closes_at.is_some_and(|date| date < today),
            id: self.candidate.id,
            title: self.candidate.title,
            closes_at: self.candidate.closes_at,
            status: self.candidate.status,
            score,
        }
    }
}

/// Score one candidate with both similarity signals. The candidate's token
/// set is never capped; only the query side is.
pub(crate) fn score_candidate(query: &QuerySignature, candidate: Candidate) -> ScoredCandidate {
    let title_tokens: HashSet<String> = tokenize(&candidate.title).into_iter().collect();
    let token_score = jaccard(&query.tokens, &title_tokens);
    let trigram_score = dice_from_counts(
        &query.trigrams,
        &trigram_counts(&normalize(&candidate.title)),
    );
    ScoredCandidate {
        candidate,
        token_score,
        trigram_score,
    }
}
