// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// A frequency-ranked word index fitted over the combined
// train+test corpus. The most frequent word gets index 1, the
// next index 2, and so on. Index 0 is never assigned: it is
// reserved for sequence padding.
//
// Ties in frequency keep first-occurrence order (the sort is
// stable), so the index is deterministic for a given corpus.

use std::collections::HashMap;

/// Characters stripped before counting words. Apostrophes are
/// deliberately not in this set, so contractions survive.
const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Lowercase a text, blank out filter characters, and return the
/// remaining whitespace-separated words.
pub fn normalize_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if FILTERS.contains(c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Word → index mapping, ordered by descending corpus frequency.
pub struct Vocabulary {
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Fit the index over every text in the iterator.
    pub fn fit<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // Count words, remembering first-occurrence order so the
        // ranking below is stable across runs.
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for text in texts {
            for word in normalize_words(text) {
                match counts.get_mut(&word) {
                    Some(count) => *count += 1,
                    None => {
                        counts.insert(word.clone(), 1);
                        order.push(word);
                    }
                }
            }
        }

        // Stable sort by descending count; ties keep corpus order.
        order.sort_by_key(|w| std::cmp::Reverse(counts[w]));

        let index = order
            .into_iter()
            .enumerate()
            .map(|(i, w)| (w, i + 1))
            .collect();

        Self { index }
    }

    /// The index of a word, if it was seen during fitting.
    /// Indices start at 1; 0 is the padding value.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Number of distinct words in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate over (word, index) pairs in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter().map(|(w, &i)| (w.as_str(), i))
    }
}
