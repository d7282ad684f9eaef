// ============================================================
// Layer 6 — Corpus Export
// ============================================================
// Writes the assembled corpus across the trainer boundary as
// JSON Lines: one {"text", "label", "source"} object per line.
// This is the exact shape the external training framework
// consumes — nothing downstream needs to know how the corpus
// was assembled.
//
// File naming convention:
//   <out_dir>/
//     train.jsonl        ← training corpus (augmented, shuffled)
//     eval.jsonl         ← held-out validation set (untouched)
//     corpus_stats.csv   ← per-level summary (metrics module)

use anyhow::{Context, Result};
use std::{
    fs,
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::domain::record::LabeledRecord;

/// Writes record collections under one output directory.
pub struct CorpusWriter {
    dir: PathBuf,
}

impl CorpusWriter {
    /// Create a new CorpusWriter, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Write one record collection as JSONL. Returns the path.
    pub fn write_jsonl(&self, name: &str, records: &[LabeledRecord]) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let file = fs::File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;

        tracing::info!("Wrote {} records to '{}'", records.len(), path.display());
        Ok(path)
    }
}
