// ============================================================
// Layer 2 — AnalyzeUseCase
// ============================================================
// Reports per-level sample counts and average text lengths for
// the speech and written sources, before any chunking or
// balancing. Used to sanity-check a new data drop: if the W&I
// averages dwarf the STM averages, the chunker bounds need a
// second look before anyone trains on the merge.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{stm::StmLoader, wi::WiCorpus};
use crate::infra::metrics::CorpusStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    pub stm_dir: String,
    pub wi_path: String,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            stm_dir: "data/stms".to_string(),
            wi_path: "data/wi/en-writeandimprove2024-corpus.tsv".to_string(),
        }
    }
}

/// Statistics for one source, identified by its provenance tag.
pub struct SourceAnalysis {
    pub source: String,
    pub stats:  CorpusStats,
}

pub struct AnalyzeUseCase {
    config: AnalyzeConfig,
}

impl AnalyzeUseCase {
    pub fn new(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Analyse every readable source. Presentation stays in the
    /// CLI layer — this returns the numbers only.
    pub fn execute(&self) -> Result<Vec<SourceAnalysis>> {
        let mut analyses = Vec::new();

        // Whole speech set: training splits plus the eval split
        let loader = StmLoader::new(&self.config.stm_dir);
        let mut stm = loader.load_training();
        stm.merge(loader.load_eval());
        if !stm.is_empty() {
            analyses.push(SourceAnalysis {
                source: "stm".to_string(),
                stats:  CorpusStats::compute(&stm.records),
            });
        }

        // Raw essays — unchunked, so the lengths are the real ones
        match WiCorpus::new(&self.config.wi_path).load_raw() {
            Ok(wi) if !wi.is_empty() => {
                analyses.push(SourceAnalysis {
                    source: "wi".to_string(),
                    stats:  CorpusStats::compute(&wi.records),
                });
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Written corpus unavailable: {} — skipping", e),
        }

        Ok(analyses)
    }
}
