// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two seams of the pipeline:
//
//   RecordSource  — anything that can produce labelled records
//                   (STM files, the W&I corpus, remote datasets)
//   CorpusTrainer — the external training framework consuming
//                   the assembled corpus
//
// The application layer programs against these traits, so a new
// corpus format or a different trainer slots in without touching
// the build workflow.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::record::{LabeledRecord, ParsedRecords};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled records from a corpus.
///
/// Implementations:
///   - StmLoader     → speech-transcript files
///   - WiCorpus      → the Write & Improve essay TSV
///   - RemoteCatalog → snapshots of remote labelled datasets
pub trait RecordSource {
    /// Short provenance name used in diagnostics
    fn name(&self) -> &str;

    /// Load all available records from this source.
    /// Skippable units (malformed lines, unmapped levels) are
    /// counted, not raised; a Result::Err means the source
    /// itself was unavailable.
    fn load(&self) -> Result<ParsedRecords>;
}

// ─── CorpusTrainer ────────────────────────────────────────────────────────────
/// Everything downstream of the assembled corpus — tokenisation,
/// model fitting, metric computation, export — lives behind this
/// boundary. The pipeline hands over `(text, label, source)`
/// triples and receives evaluation metrics back.
pub trait CorpusTrainer {
    /// Train on `train`, evaluate on the held-out `eval` set.
    fn train(&self, train: &[LabeledRecord], eval: &[LabeledRecord]) -> Result<TrainReport>;
}

/// What the external trainer reports back after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub accuracy:   f64,
    pub f1:         f64,
    pub output_dir: String,
}
