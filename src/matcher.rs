//! Candidate scoring and ranking entry point.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::interface::{Candidate, CandidateRecord, DuplicateMatch, MatcherConfig, MatcherError};
use crate::ranking::{score_candidate, QuerySignature, ScoredCandidate};

/// Near-duplicate detector over a caller-supplied candidate pool.
///
/// Stateless between calls: every invocation normalizes and tokenizes the
/// query once, scores each candidate with both similarity signals, and
/// returns the thresholded top matches. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct DuplicateMatcher {
    config: MatcherConfig,
}

impl Default for DuplicateMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateMatcher {
    /// Matcher with the production-tuned default configuration.
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Matcher with custom thresholds and caps, validated once up front.
    pub fn with_config(config: MatcherConfig) -> Result<Self, MatcherError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this matcher ranks with.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Rank the candidate pool against a drafted question title.
    ///
    /// Returns at most `max_matches` candidates sorted by descending fused
    /// score; ties keep the pool's original order, which callers supply
    /// most-recent-first. A query with too little signal (fewer than
    /// `min_query_chars` normalized characters, or no usable tokens) yields
    /// an empty list - a defined result, not an error - as does an empty
    /// pool. Records missing an id or title are skipped individually; one
    /// malformed row never aborts the ranking.
    pub fn find_duplicates(
        &self,
        query: &str,
        pool: &[CandidateRecord],
        today: NaiveDate,
    ) -> Vec<DuplicateMatch> {
        let Some(signature) = QuerySignature::build(query, &self.config) else {
            return Vec::new();
        };

        let mut kept: Vec<ScoredCandidate> = Vec::new();
        for record in pool {
            let candidate = match Candidate::from_record(record) {
                Ok(candidate) => candidate,
                Err(err) => {
                    debug!("skipping pool record: {err}");
                    continue;
                }
            };
            let scored = score_candidate(&signature, candidate);
            if scored.passes(&self.config) {
                kept.push(scored);
            }
        }

        // Stable sort: equal scores keep pool (recency) order.
        kept.sort_by(|a, b| b.score().total_cmp(&a.score()));
        kept.truncate(self.config.max_matches);

        trace!(
            pool = pool.len(),
            query_tokens = signature.token_count(),
            kept = kept.len(),
            "ranked candidate pool"
        );

        kept.into_iter()
            .map(|scored| scored.into_match(today))
            .collect()
    }
}
