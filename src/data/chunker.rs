// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits long documents into bounded-length segments that
// respect sentence boundaries.
//
// Written essays are far longer than spoken utterances; feeding
// them in whole would let the classifier learn "long text = high
// level" instead of a linguistic-complexity signal. Chunking
// brings the word-count distribution of written samples in line
// with short speech transcripts.
//
// Algorithm:
//   - Split the document into sentence units at ".", "!" or "?"
//     followed by whitespace (the delimiter stays with its
//     sentence).
//   - Greedily accumulate units into the current chunk; when the
//     next unit would push the chunk past max_words AND the
//     chunk is non-empty, flush it and start a new one.
//   - Flush whatever remains, then drop chunks under min_words —
//     unless the document produced exactly one chunk, so very
//     short documents are never silently lost.
//
// A single sentence longer than max_words is never split: the
// bound is only enforced at sentence granularity.

/// Sentence-respecting greedy chunker.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    /// Chunks below this word count are discarded
    /// (single-chunk documents excepted)
    min_words: usize,
    /// Flush threshold — a chunk is closed before it would
    /// exceed this many words
    max_words: usize,
}

/// Default bounds match the observed speech-utterance lengths.
impl Default for Chunker {
    fn default() -> Self {
        Self::new(5, 50)
    }
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Panics
    /// Panics if min_words > max_words — such bounds would
    /// discard every chunk the flush rule produces.
    pub fn new(min_words: usize, max_words: usize) -> Self {
        assert!(
            min_words <= max_words,
            "min_words ({}) must not exceed max_words ({})",
            min_words,
            max_words
        );
        Self { min_words, max_words }
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Split `text` into sentence-aligned chunks.
    ///
    /// Joining the returned chunks with single spaces reproduces
    /// the document's word sequence, provided no chunk was
    /// dropped by the min_words filter.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        for unit in split_sentences(text) {
            let words = unit.split_whitespace().count();
            if words == 0 {
                continue;
            }

            // Flush before overflow — but never flush an empty
            // chunk, so an oversized sentence still lands somewhere
            if current_len + words > self.max_words && !current.is_empty() {
                chunks.push(current.join(" "));
                current.clear();
                current_len = 0;
            }

            current.push(unit);
            current_len += words;
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        // Very short documents produce one short chunk — keep it
        if chunks.len() == 1 {
            return chunks;
        }

        chunks
            .into_iter()
            .filter(|c| c.split_whitespace().count() >= self.min_words)
            .collect()
    }
}

/// Split text into sentence-like units at end punctuation
/// followed by whitespace. The punctuation stays with the
/// preceding unit; the whitespace run is consumed.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0usize;
    let mut prev_end = false;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() && prev_end {
            units.push(text[start..i].trim());
            start = i;
            prev_end = false;
        } else {
            prev_end = matches!(c, '.' | '!' | '?');
        }
    }
    if start < text.len() {
        units.push(text[start..].trim());
    }

    units.into_iter().filter(|u| !u.is_empty()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Build a sentence of exactly `n` words ending in a period.
    fn sentence(n: usize) -> String {
        let mut words: Vec<String> = (0..n).map(|i| format!("w{i}")).collect();
        let last = words.last_mut().unwrap();
        last.push('.');
        words.join(" ")
    }

    #[test]
    fn test_sentence_split_keeps_delimiters() {
        let units = split_sentences("First one. Second one! Third?");
        assert_eq!(units, vec!["First one.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_oversized_single_sentence_yields_one_chunk() {
        // A 120-word sentence cannot be split mid-sentence:
        // it comes back as one chunk even though it exceeds max_words
        let c = Chunker::new(5, 50);
        let text = (0..120).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let chunks = c.chunk(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].split_whitespace().count(), 120);
    }

    #[test]
    fn test_greedy_accumulation_packs_sentences() {
        // Six 20-word sentences with max_words=50:
        // the greedy-flush rule packs them two per chunk (40 words),
        // not one chunk per sentence
        let c = Chunker::new(5, 50);
        let text = (0..6).map(|_| sentence(20)).collect::<Vec<_>>().join(" ");
        let chunks = c.chunk(&text);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(chunk.split_whitespace().count(), 40);
        }
    }

    #[test]
    fn test_chunks_reconstruct_the_word_sequence() {
        let c = Chunker::new(5, 50);
        let text = (0..5).map(|_| sentence(30)).collect::<Vec<_>>().join(" ");
        let chunks = c.chunk(&text);

        let original: Vec<&str> = text.split_whitespace().collect();
        let rejoined = chunks.join(" ");
        let reconstructed: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original, reconstructed);
    }

    #[test]
    fn test_short_document_survives_as_single_chunk() {
        // Below min_words, but it is the only chunk — kept
        let c = Chunker::new(5, 50);
        let chunks = c.chunk("Too short.");
        assert_eq!(chunks, vec!["Too short.".to_string()]);
    }

    #[test]
    fn test_short_trailing_chunk_is_dropped() {
        // One full chunk plus a 2-word remainder: the remainder
        // falls below min_words and is discarded
        let c = Chunker::new(5, 50);
        let text = format!("{} {}", sentence(50), sentence(2));
        let chunks = c.chunk(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].split_whitespace().count(), 50);
    }

    #[test]
    fn test_empty_text_gives_no_chunks() {
        let c = Chunker::default();
        assert!(c.chunk("").is_empty());
        assert!(c.chunk("   \n ").is_empty());
    }

    #[test]
    #[should_panic]
    fn test_inverted_bounds_panic() {
        let _ = Chunker::new(50, 5);
    }
}
