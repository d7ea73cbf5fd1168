//! Token-set and character-level similarity metrics.
//!
//! Two independent signals: Jaccard over word-token sets catches reworded
//! titles that keep their vocabulary; Dice over padded character trigrams
//! survives typos, word-order changes and German compounding that defeat
//! token matching. Both are symmetric, deterministic, pure, and in [0, 1].

use std::collections::{HashMap, HashSet};

use crate::text::normalize;

/// Spaces added to each side of a string before the trigram window scan,
/// so the first and last characters each appear in boundary trigrams.
const TRIGRAM_PAD: usize = 2;

/// Jaccard similarity of two token sets: `|∩| / |∪|`.
///
/// An empty set means no evidence, not perfect similarity, so the result
/// is 0.0 whenever either side is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

/// Build the trigram multiset of an already-normalized string: a map from
/// each 3-char window of the space-padded string to its occurrence count.
/// Counts matter - a repeated trigram (double letters, repeated digits)
/// must weigh once per occurrence for the metric to behave on short
/// strings. Empty input yields an empty map.
pub(crate) fn trigram_counts(normalized: &str) -> HashMap<[char; 3], u32> {
    let mut counts = HashMap::new();
    if normalized.is_empty() {
        return counts;
    }
    let mut padded: Vec<char> = Vec::with_capacity(normalized.chars().count() + 2 * TRIGRAM_PAD);
    padded.extend(std::iter::repeat(' ').take(TRIGRAM_PAD));
    padded.extend(normalized.chars());
    padded.extend(std::iter::repeat(' ').take(TRIGRAM_PAD));
    for window in padded.windows(3) {
        *counts.entry([window[0], window[1], window[2]]).or_insert(0) += 1;
    }
    counts
}

/// Dice coefficient over two trigram multisets:
/// `2 * Σ min(a[t], b[t]) / (totalA + totalB)`, where the totals count
/// repeats. The intersection takes `min` per shared key - a multiset
/// intersection, never a set one.
pub(crate) fn dice_from_counts(
    a: &HashMap<[char; 3], u32>,
    b: &HashMap<[char; 3], u32>,
) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let total_a: u32 = a.values().sum();
    let total_b: u32 = b.values().sum();
    let shared: u32 = a
        .iter()
        .filter_map(|(trigram, &count_a)| b.get(trigram).map(|&count_b| count_a.min(count_b)))
        .sum();
    2.0 * f64::from(shared) / f64::from(total_a + total_b)
}

/// Character-trigram Dice similarity between two raw strings. Both sides
/// are normalized before the trigram scan; a string that normalizes to
/// empty scores 0.0 against everything.
pub fn trigram_dice(a: &str, b: &str) -> f64 {
    dice_from_counts(
        &trigram_counts(&normalize(a)),
        &trigram_counts(&normalize(b)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    // ── jaccard ──────────────────────────────────────────────────

    #[test]
    fn test_jaccard_identical_sets() {
        let a = set(&["inflation", "2026"]);
        assert_eq!(jaccard(&a, &a), 1.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let a = set(&["gold", "silber", "platin"]);
        let b = set(&["gold", "silber", "kupfer"]);
        // 2 shared, union of 4
        assert_eq!(jaccard(&a, &b), 0.5);
    }

    #[test]
    fn test_jaccard_empty_set_is_zero_not_one() {
        let empty = set(&[]);
        let a = set(&["gold"]);
        assert_eq!(jaccard(&empty, &a), 0.0);
        assert_eq!(jaccard(&a, &empty), 0.0);
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_jaccard_symmetric() {
        let a = set(&["wahl", "2025", "koalition"]);
        let b = set(&["wahl", "regierung"]);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    #[test]
    fn test_jaccard_disjoint() {
        let a = set(&["gold"]);
        let b = set(&["silber"]);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    // ── trigram_counts ───────────────────────────────────────────

    #[test]
    fn test_trigram_counts_padded_windows() {
        // "ab" padded to "  ab  ": windows "  a", " ab", "ab ", "b  "
        let counts = trigram_counts("ab");
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&[' ', ' ', 'a']], 1);
        assert_eq!(counts[&[' ', 'a', 'b']], 1);
        assert_eq!(counts[&['a', 'b', ' ']], 1);
        assert_eq!(counts[&['b', ' ', ' ']], 1);
    }

    #[test]
    fn test_trigram_counts_total_is_length_plus_two() {
        for s in ["a", "ab", "inflation", "co2 steuer"] {
            let total: u32 = trigram_counts(s).values().sum();
            assert_eq!(
                total as usize,
                s.chars().count() + 2,
                "total trigram count for {:?}",
                s
            );
        }
    }

    #[test]
    fn test_trigram_counts_repeats_are_counted() {
        // "aaaa" padded contains "aaa" twice
        let counts = trigram_counts("aaaa");
        assert_eq!(counts[&['a', 'a', 'a']], 2);
    }

    #[test]
    fn test_trigram_counts_empty() {
        assert!(trigram_counts("").is_empty());
    }

    // ── trigram_dice ─────────────────────────────────────────────

    #[test]
    fn test_dice_reflexive() {
        assert_eq!(trigram_dice("Fußball", "Fußball"), 1.0);
        assert_eq!(trigram_dice("a", "a"), 1.0);
    }

    #[test]
    fn test_dice_symmetric() {
        let a = "Wird Deutschland Weltmeister?";
        let b = "Deutschland wird Weltmeister";
        assert_eq!(trigram_dice(a, b), trigram_dice(b, a));
    }

    #[test]
    fn test_dice_empty_or_unnormalizable_input() {
        assert_eq!(trigram_dice("", "Inflation"), 0.0);
        assert_eq!(trigram_dice("?!", "Inflation"), 0.0);
        assert_eq!(trigram_dice("", ""), 0.0);
    }

    #[test]
    fn test_dice_survives_word_reordering() {
        let score = trigram_dice("Weltmeister Deutschland", "Deutschland Weltmeister");
        assert!(score > 0.7, "reordered words should stay similar, got {score}");
    }

    #[test]
    fn test_dice_survives_small_typos() {
        let score = trigram_dice("Bundestagswahl 2029", "Bundestagwahl 2029");
        assert!(score > 0.7, "one dropped letter should stay similar, got {score}");
    }

    #[test]
    fn test_dice_unrelated_titles_score_low() {
        let score = trigram_dice("Steigt die Inflation?", "Gewinnt Bayern die Meisterschaft?");
        assert!(score < 0.32, "unrelated titles must stay under threshold, got {score}");
    }

    #[test]
    fn test_dice_ignores_case_and_punctuation() {
        assert_eq!(
            trigram_dice("Kommt die CO2-Steuer 2027?", "kommt die co2 steuer 2027"),
            1.0
        );
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let pairs = [
            ("Inflation", "Deflation"),
            ("aaa", "aaaa"),
            ("x", "xxxxxxxxxxxxxxxx"),
            ("Öl über 100 Dollar?", "Ol uber 100 Dollar"),
        ];
        for (a, b) in pairs {
            let score = trigram_dice(a, b);
            assert!((0.0..=1.0).contains(&score), "dice({a:?}, {b:?}) = {score}");
        }
    }
}
