//! Text canonicalization: diacritic folding, tokenization, stopwords.
//!
//! Every similarity signal in this crate compares the output of
//! [`normalize`] or [`tokenize`], never raw titles. Both are total pure
//! functions of their input - no caching, no shared state.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Tokens shorter than this (in chars, not bytes) carry too little signal
/// to keep.
pub(crate) const MIN_TOKEN_CHARS: usize = 3;

/// German function words dropped before token-set comparison: articles,
/// conjunctions, common auxiliaries, prepositions. Membership is a tuning
/// knob, not a correctness invariant. Words under [`MIN_TOKEN_CHARS`]
/// (im, zu, es, ...) are already removed by the length filter and need no
/// entry here. Entries are in normalized form - tokens are matched after
/// diacritic folding, so für/über are listed as "fur"/"uber".
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aber", "alle", "als", "auch", "auf", "aus", "bei", "bis", "das",
        "dass", "dem", "den", "der", "des", "die", "ein", "eine", "einem",
        "einen", "einer", "fur", "hat", "haben", "ist", "mit", "nach",
        "noch", "oder", "sein", "sind", "uber", "und", "von", "vor",
        "war", "werden", "wird", "wie", "zum", "zur",
    ]
    .into_iter()
    .collect()
});

/// Canonicalize raw text into its comparison-ready form.
///
/// Folds diacritics (NFD decomposition with combining marks stripped),
/// lowercases, and reduces every run of characters outside `[a-z0-9äöüß ]`
/// to a single space, with whitespace collapsed and trimmed. Total
/// function: never fails, empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut space_pending = false;
    let folded = text.nfd().filter(|c| !is_combining_mark(*c));
    for ch in folded.flat_map(char::to_lowercase) {
        if is_legal_char(ch) {
            if space_pending && !out.is_empty() {
                out.push(' ');
            }
            space_pending = false;
            out.push(ch);
        } else {
            space_pending = true;
        }
    }
    out
}

/// The legal-character class for normalized text. `ß` has no decomposition
/// and survives folding; the umlauts are whitelisted alongside it even
/// though folding has already reduced them to their base letters.
fn is_legal_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, 'ä' | 'ö' | 'ü' | 'ß')
}

/// Split text into meaningful word tokens: normalized, length- and
/// stopword-filtered, deduplicated with first-occurrence order preserved
/// (the ranker caps query tokens by input order).
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tokens = Vec::new();
    for word in normalized.split_whitespace() {
        if word.chars().count() < MIN_TOKEN_CHARS || STOPWORDS.contains(word) {
            continue;
        }
        if seen.insert(word) {
            tokens.push(word.to_string());
        }
    }
    tokens
}
