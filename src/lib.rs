//! Doppel - near-duplicate detection for prediction-market question titles
//!
//! Given a question title being drafted and a bounded pool of existing
//! question records, finds the existing questions that are likely about the
//! same real-world event. Two independent similarity signals are computed
//! per candidate - token-set Jaccard and character-trigram Dice - and fused
//! by taking their maximum: the signals catch different failure modes
//! (rewording vs. typos/word order/compounding), so either one firing is
//! sufficient evidence of near-duplication.
//!
//! The engine is a pure, synchronous library call with no I/O and no state
//! retained between calls. The caller owns candidate selection (a recent,
//! bounded, public pool) and everything HTTP/storage.

pub mod interface;
mod matcher;
mod ranking;
pub mod similarity;
pub mod text;

pub use interface::*;
pub use matcher::DuplicateMatcher;
pub use similarity::{jaccard, trigram_dice};
pub use text::{normalize, tokenize};
