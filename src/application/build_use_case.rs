// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Orchestrates the full corpus build in order:
//
//   Step 1: Parse speech transcripts      (Layer 4 - data)
//   Step 2: Parse the written corpus      (Layer 4 - data)
//   Step 3: Normalise remote datasets     (Layer 4 - data)
//   Step 4: Assemble the training corpus  (Layer 4 - data)
//   Step 5: Log corpus statistics         (Layer 6 - infra)
//   Step 6: Export JSONL for the trainer  (Layer 6 - infra)
//
// A source that cannot be read contributes zero records and the
// build continues; the only hard failure is every enabled source
// coming up empty.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    assembler::{AssemblerConfig, CorpusAssembler},
    chunker::Chunker,
    remote::RemoteCatalog,
    stm::StmLoader,
    wi::WiCorpus,
};
use crate::domain::record::{LabeledRecord, ParsedRecords};
use crate::domain::traits::{CorpusTrainer, RecordSource, TrainReport};
use crate::infra::{
    export::CorpusWriter,
    metrics::{CorpusStats, StatsLogger},
};

// ─── Build Configuration ─────────────────────────────────────────────────────
// Everything a corpus build needs. Serialisable so a build can be
// recorded alongside its output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub stm_dir:      String,
    pub wi_path:      String,
    pub datasets_dir: String,
    pub out_dir:      String,

    /// Source toggles. The written corpus can be excluded on its
    /// own — its licence may restrict it to local evaluation.
    pub use_stm:    bool,
    pub use_wi:     bool,
    pub use_remote: bool,

    pub stm_oversample: usize,
    pub max_samples:    Option<usize>,
    pub seed:           u64,
    pub augment:        bool,

    pub min_words: usize,
    pub max_words: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            stm_dir:      "data/stms".to_string(),
            wi_path:      "data/wi/en-writeandimprove2024-corpus.tsv".to_string(),
            datasets_dir: "data/datasets".to_string(),
            out_dir:      "corpus".to_string(),
            use_stm:      true,
            use_wi:       true,
            use_remote:   true,
            stm_oversample: 4,
            max_samples:  None,
            seed:         42,
            augment:      true,
            min_words:    5,
            max_words:    50,
        }
    }
}

/// The assembled corpus pair: training records plus the untouched
/// held-out evaluation set. Transient — lives for one run.
pub struct CorpusBundle {
    pub train: Vec<LabeledRecord>,
    pub eval:  Vec<LabeledRecord>,
}

// ─── BuildUseCase ─────────────────────────────────────────────────────────────
pub struct BuildUseCase {
    config: BuildConfig,
}

impl BuildUseCase {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the full build: parse, assemble, log stats, export.
    pub fn execute(&self) -> Result<CorpusBundle> {
        let cfg = &self.config;
        let bundle = self.assemble()?;

        // ── Corpus statistics ────────────────────────────────────────────────
        let stats = CorpusStats::compute(&bundle.train);
        for line in stats.summary_lines() {
            tracing::info!("   {}", line);
        }
        let stats_logger = StatsLogger::new(&cfg.out_dir)?;
        stats_logger.write(&stats)?;
        tracing::info!("Corpus stats at '{}'", stats_logger.csv_path().display());

        // ── Export across the trainer boundary ───────────────────────────────
        let writer = CorpusWriter::new(&cfg.out_dir)?;
        writer.write_jsonl("train.jsonl", &bundle.train)?;
        writer.write_jsonl("eval.jsonl", &bundle.eval)?;

        Ok(bundle)
    }

    /// Run the build and hand the corpus straight to a trainer.
    pub fn execute_with_trainer(&self, trainer: &dyn CorpusTrainer) -> Result<TrainReport> {
        let bundle = self.execute()?;
        let report = trainer.train(&bundle.train, &bundle.eval)?;
        tracing::info!(
            "Training done: accuracy={:.4}, f1={:.4}, model at '{}'",
            report.accuracy,
            report.f1,
            report.output_dir,
        );
        Ok(report)
    }

    /// Parse all enabled sources and assemble the corpus pair.
    fn assemble(&self) -> Result<CorpusBundle> {
        let cfg = &self.config;
        let chunker = Chunker::new(cfg.min_words, cfg.max_words);

        // ── Step 1: speech transcripts ───────────────────────────────────────
        // train+dev feed training; eval is the held-out target,
        // never oversampled, never noise-augmented
        let mut stm = ParsedRecords::default();
        let mut eval = ParsedRecords::default();
        if cfg.use_stm {
            tracing::info!("Loading speech transcripts from '{}'", cfg.stm_dir);
            let loader = StmLoader::new(&cfg.stm_dir);
            stm = load_source(&loader);
            eval = loader.load_eval();
            tracing::info!("   {} eval records held out", eval.len());
        }

        // ── Step 2: written corpus ───────────────────────────────────────────
        let mut wi = ParsedRecords::default();
        if cfg.use_wi {
            tracing::info!("Loading written corpus from '{}'", cfg.wi_path);
            wi = load_source(&WiCorpus::new(&cfg.wi_path).with_chunker(chunker));
        }

        // ── Step 3: remote datasets ──────────────────────────────────────────
        let mut remote = ParsedRecords::default();
        if cfg.use_remote {
            tracing::info!("Loading remote datasets from '{}'", cfg.datasets_dir);
            remote = load_source(&RemoteCatalog::new(&cfg.datasets_dir, chunker));
        }

        let skipped = stm.skipped + eval.skipped + wi.skipped + remote.skipped;
        if skipped > 0 {
            tracing::debug!("Skipped {} unusable units across all sources", skipped);
        }

        // ── Step 4: assemble ─────────────────────────────────────────────────
        let assembler = CorpusAssembler::new(AssemblerConfig {
            stm_oversample: cfg.stm_oversample,
            max_samples:    cfg.max_samples,
            seed:           cfg.seed,
            augment:        cfg.augment,
        });
        let train = assembler.assemble(stm.records, wi.records, remote.records)?;

        Ok(CorpusBundle {
            train,
            eval: eval.records,
        })
    }
}

/// Load one source through the RecordSource seam. An unavailable
/// source contributes zero records; the build carries on.
fn load_source(source: &dyn RecordSource) -> ParsedRecords {
    match source.load() {
        Ok(parsed) => {
            tracing::info!("   {}: {} records", source.name(), parsed.len());
            parsed
        }
        Err(e) => {
            tracing::warn!("Source '{}' unavailable: {} — skipping", source.name(), e);
            ParsedRecords::default()
        }
    }
}
