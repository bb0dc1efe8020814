// ============================================================
// Layer 4 — Index Sequences and Padding
// ============================================================
// Converts normalised texts into sequences of vocabulary
// indices, then fixes every sequence to exactly `maxlen`
// entries so they can be stacked into rectangular batches.
//
// Conventions, matching the fitted Vocabulary:
//   - words with index >= max_features are dropped, not mapped
//     to a placeholder
//   - padding inserts zeros at the START of short sequences
//   - truncation removes from the START of long sequences,
//     keeping the most recent tokens

use crate::data::vocab::{normalize_words, Vocabulary};

/// Convert each text into a sequence of vocabulary indices.
/// Unknown words and words at or beyond the cap are dropped.
pub fn texts_to_sequences(
    texts: &[String],
    vocab: &Vocabulary,
    max_features: usize,
) -> Vec<Vec<i32>> {
    texts
        .iter()
        .map(|text| {
            normalize_words(text)
                .into_iter()
                .filter_map(|w| vocab.index_of(&w))
                .filter(|&i| i < max_features)
                .map(|i| i as i32)
                .collect()
        })
        .collect()
}

/// Pad or truncate every sequence to exactly `maxlen` entries.
pub fn pad_sequences(sequences: &[Vec<i32>], maxlen: usize) -> Vec<Vec<i32>> {
    sequences
        .iter()
        .map(|seq| {
            let tail: &[i32] = if seq.len() > maxlen {
                &seq[seq.len() - maxlen..]
            } else {
                seq
            };
            let mut padded = vec![0i32; maxlen];
            padded[maxlen - tail.len()..].copy_from_slice(tail);
            padded
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn small_vocab() -> Vocabulary {
        // "the"=1, "cat"=2, "sat"=3, "down"=4
        Vocabulary::fit(["the the the cat cat sat down"].iter().copied())
    }

    #[test]
    fn test_no_index_reaches_the_cap() {
        let vocab = small_vocab();
        let texts = vec!["the cat sat down".to_string()];
        for cap in 1..6 {
            for seq in texts_to_sequences(&texts, &vocab, cap) {
                assert!(seq.iter().all(|&i| (i as usize) < cap));
            }
        }
    }

    #[test]
    fn test_capped_words_are_dropped_not_replaced() {
        let vocab = small_vocab();
        let texts = vec!["the cat sat down".to_string()];
        let seqs = texts_to_sequences(&texts, &vocab, 3);
        // Only "the"=1 and "cat"=2 survive a cap of 3.
        assert_eq!(seqs[0], vec![1, 2]);
    }

    #[test]
    fn test_padded_length_is_exact() {
        let vocab = small_vocab();
        let texts = vec![
            "the".to_string(),
            "the cat sat down the cat sat down".to_string(),
            String::new(),
        ];
        let seqs = texts_to_sequences(&texts, &vocab, 100);
        for padded in pad_sequences(&seqs, 4) {
            assert_eq!(padded.len(), 4);
        }
    }

    #[test]
    fn test_short_sequence_gets_leading_zeros() {
        let vocab = small_vocab();
        let texts = vec!["the cat".to_string()];
        let seqs = texts_to_sequences(&texts, &vocab, 100);
        let padded = pad_sequences(&seqs, 5);
        // maxlen - token_count = 3 leading zeros, then the indices in order
        assert_eq!(padded[0], vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_long_sequence_keeps_last_tokens() {
        let vocab = small_vocab();
        let texts = vec!["the cat sat down".to_string()];
        let seqs = texts_to_sequences(&texts, &vocab, 100);
        let padded = pad_sequences(&seqs, 2);
        // Only the last two tokens survive: "sat"=3, "down"=4
        assert_eq!(padded[0], vec![3, 4]);
    }
}
