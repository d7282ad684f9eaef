// ============================================================
// Layer 3 — Labelled Record Domain Type
// ============================================================
// The unit of training data flowing through the pipeline:
// a text fragment, its CEFR class id, and a provenance tag.
//
// The source tag ("stm", "wi", "hf", ...) drives oversampling
// decisions in the assembler and keeps held-out evaluation data
// identifiable — it is never a model feature.
//
// Records are immutable after creation: every transformation
// (oversampling, noise augmentation) produces new records.

use serde::{Deserialize, Serialize};

/// One labelled training sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRecord {
    /// The natural-language text fragment
    pub text: String,

    /// CEFR class id in [0, 5] — always a valid vocabulary id;
    /// parsers drop rows they cannot map rather than emit junk
    pub label: usize,

    /// Provenance tag identifying the originating corpus
    pub source: String,
}

impl LabeledRecord {
    pub fn new(text: impl Into<String>, label: usize, source: impl Into<String>) -> Self {
        Self {
            text:   text.into(),
            label,
            source: source.into(),
        }
    }

    /// Number of whitespace-separated words in the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// The outcome of parsing one source: the records that survived,
/// plus a count of the units that were silently dropped
/// (malformed lines, unmapped levels, blank text).
///
/// Skipped units are expected and never raised as errors —
/// the counter exists so the pipeline can report them.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<LabeledRecord>,
    pub skipped: usize,
}

impl ParsedRecords {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fold another batch into this one, accumulating both the
    /// records and the skip counter.
    pub fn merge(&mut self, other: ParsedRecords) {
        self.records.extend(other.records);
        self.skipped += other.skipped;
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        let r = LabeledRecord::new("one two  three", 2, "stm");
        assert_eq!(r.word_count(), 3);
    }

    #[test]
    fn test_merge_accumulates_records_and_skips() {
        let mut a = ParsedRecords {
            records: vec![LabeledRecord::new("x", 0, "stm")],
            skipped: 1,
        };
        let b = ParsedRecords {
            records: vec![LabeledRecord::new("y", 1, "stm")],
            skipped: 2,
        };
        a.merge(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.skipped, 3);
    }

    #[test]
    fn test_record_serialises_to_the_boundary_shape() {
        let r = LabeledRecord::new("hello world", 3, "wi");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"text":"hello world","label":3,"source":"wi"}"#);
    }
}
