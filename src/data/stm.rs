// ============================================================
// Layer 4 — Speech-Transcript (STM) Parser
// ============================================================
// Extracts (text, label) pairs from line-oriented transcript
// files. Each label-bearing line has the shape:
//
//   <o,Q4,B2,P1> today i want to talk about my family
//    └────┬────┘  └──────────────┬────────────────────┘
//     metadata            transcript text
//
// The metadata fields inside the angle brackets are comma
// separated; ONE of them is the CEFR level (or the legacy "C"
// token), but its position is not fixed — we scan all fields and
// take the first one the label vocabulary recognises.
//
// Lines starting with ";;" are comments. Malformed or unlabelled
// lines are expected in real transcript sets and are counted and
// skipped, never raised.
//
// A directory of STM files follows the standard split naming:
//   train-asr.stm + dev-asr.stm  → training portion
//   eval-asr.stm                 → held-out validation, untouched

use anyhow::Result;
use std::{fs, path::PathBuf};

use crate::domain::labels::level_to_id;
use crate::domain::record::{LabeledRecord, ParsedRecords};
use crate::domain::traits::RecordSource;

/// Provenance tag for speech-transcript records
pub const STM_SOURCE: &str = "stm";

/// Parse the full content of one STM file.
///
/// Per line:
///   1. Trim; skip blank lines and ";;" comments.
///   2. Locate the first <...> group (non-empty interior).
///      No group → skip the line.
///   3. Everything after the closing bracket is the transcript;
///      empty after trimming → skip. Literal "<"/">" characters
///      inside the transcript are preserved verbatim.
///   4. Scan the comma-separated metadata for the first field
///      the vocabulary maps; no match → skip.
pub fn parse_stm(content: &str) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(";;") {
            continue;
        }

        // First bracketed group — later groups belong to the transcript
        let Some(open) = line.find('<') else {
            parsed.skipped += 1;
            continue;
        };
        let Some(close) = line[open + 1..].find('>').map(|i| open + 1 + i) else {
            parsed.skipped += 1;
            continue;
        };
        if close == open + 1 {
            // "<>" carries no metadata fields
            parsed.skipped += 1;
            continue;
        }

        let text = line[close + 1..].trim();
        if text.is_empty() {
            parsed.skipped += 1;
            continue;
        }

        // The level field's position is not fixed — take the first match
        let interior = &line[open + 1..close];
        match interior.split(',').find_map(level_to_id) {
            Some(label) => parsed
                .records
                .push(LabeledRecord::new(text, label, STM_SOURCE)),
            None => parsed.skipped += 1,
        }
    }

    parsed
}

// ─── StmLoader ────────────────────────────────────────────────────────────────
/// Loads the standard STM split files from a directory.
///
/// A missing file is a source-unavailable condition: it is logged
/// and contributes zero records, so a partial split set still
/// produces a usable corpus.
pub struct StmLoader {
    dir: PathBuf,
}

impl StmLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Records for training: train-asr.stm plus dev-asr.stm.
    pub fn load_training(&self) -> ParsedRecords {
        let mut parsed = ParsedRecords::default();
        for name in ["train-asr.stm", "dev-asr.stm"] {
            parsed.merge(self.load_file(name));
        }
        parsed
    }

    /// The held-out evaluation portion: eval-asr.stm.
    /// Never oversampled, never noise-augmented, never trained on.
    pub fn load_eval(&self) -> ParsedRecords {
        self.load_file("eval-asr.stm")
    }

    fn load_file(&self, name: &str) -> ParsedRecords {
        let path = self.dir.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let parsed = parse_stm(&content);
                tracing::debug!(
                    "Parsed '{}': {} records, {} lines skipped",
                    path.display(),
                    parsed.len(),
                    parsed.skipped,
                );
                parsed
            }
            Err(e) => {
                tracing::warn!("Could not read '{}': {} — skipping", path.display(), e);
                ParsedRecords::default()
            }
        }
    }
}

impl RecordSource for StmLoader {
    fn name(&self) -> &str {
        STM_SOURCE
    }

    fn load(&self) -> Result<ParsedRecords> {
        Ok(self.load_training())
    }
}
