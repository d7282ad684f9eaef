// ============================================================
// Layer 6 — Corpus Statistics
// ============================================================
// Per-level summaries of a record collection, written to a CSV
// file after each build.
//
// Columns recorded per CEFR level:
//   - level:     the canonical level string (A1..C2)
//   - count:     number of records carrying that label
//   - avg_words: mean word count of those records
//
// A skewed count column is the first thing to check when the
// classifier collapses onto one class; a drifting avg_words
// column means the chunker is no longer hiding the length
// signal.
//
// Output file: <out_dir>/corpus_stats.csv
//
// Example CSV output:
//   level,count,avg_words
//   A1,1043,12.4
//   A2,2210,14.1
//   ...

use anyhow::{Context, Result};
use std::{fs, io::Write, path::PathBuf};

use crate::domain::labels::{id_to_level, LEVELS};
use crate::domain::record::LabeledRecord;

/// Aggregated per-level statistics for one record collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    /// Records per class id (index = id)
    pub counts: [usize; 6],

    /// Mean word count per class id; 0.0 for empty classes
    pub avg_words: [f64; 6],

    /// Total number of records
    pub total: usize,
}

impl CorpusStats {
    /// Compute statistics over a record slice.
    pub fn compute(records: &[LabeledRecord]) -> Self {
        let mut counts = [0usize; 6];
        let mut words = [0usize; 6];

        for record in records {
            // labels are vocabulary ids by construction
            counts[record.label] += 1;
            words[record.label] += record.word_count();
        }

        let mut avg_words = [0.0f64; 6];
        for id in 0..6 {
            if counts[id] > 0 {
                avg_words[id] = words[id] as f64 / counts[id] as f64;
            }
        }

        Self {
            counts,
            avg_words,
            total: records.len(),
        }
    }

    /// One human-readable line per non-empty level.
    pub fn summary_lines(&self) -> Vec<String> {
        LEVELS
            .iter()
            .enumerate()
            .filter(|(id, _)| self.counts[*id] > 0)
            .map(|(id, level)| {
                format!(
                    "{}: {} samples, avg {:.1} words",
                    level, self.counts[id], self.avg_words[id],
                )
            })
            .collect()
    }
}

/// Writes one CorpusStats snapshot per build to a CSV file.
pub struct StatsLogger {
    csv_path: PathBuf,
}

impl StatsLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            csv_path: dir.join("corpus_stats.csv"),
        })
    }

    /// Overwrite the stats file with this build's snapshot.
    pub fn write(&self, stats: &CorpusStats) -> Result<()> {
        let mut f = fs::File::create(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;

        writeln!(f, "level,count,avg_words")?;
        for id in 0..6 {
            writeln!(
                f,
                "{},{},{:.1}",
                id_to_level(id).unwrap_or("?"),
                stats.counts[id],
                stats.avg_words[id],
            )?;
        }

        tracing::debug!("Wrote corpus stats to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
