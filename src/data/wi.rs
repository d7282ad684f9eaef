// ============================================================
// Layer 4 — Written-Corpus (W&I) Parser
// ============================================================
// Parses the Write & Improve essay corpus: a tab-separated table
// with a free-text column and an automarker CEFR level column
// (level values may carry "+"/"-" modifier suffixes).
//
// Real exports of this corpus contain rows with stray tabs and
// broken field counts, so the reader runs in flexible mode and
// bad rows are counted and skipped — one corrupt row never sinks
// the file.
//
// Every surviving essay is passed through the Chunker so written
// samples match the length distribution of speech transcripts;
// each chunk becomes its own record with the essay's label.
//
// Licensing: this corpus may be restricted to local evaluation.
// The build configuration can exclude it independently of the
// other sources.
//
// Reference: csv crate documentation

use anyhow::{Context, Result};
use std::{fs, io::Read, path::PathBuf};

use crate::data::chunker::Chunker;
use crate::domain::labels::level_to_id;
use crate::domain::record::{LabeledRecord, ParsedRecords};
use crate::domain::traits::RecordSource;

/// Provenance tag for Write & Improve records
pub const WI_SOURCE: &str = "wi";

/// Default column carrying the automarker-assigned level
const DEFAULT_LEVEL_COLUMN: &str = "automarker_cefr_level";

/// Reads and chunks the W&I essay TSV.
pub struct WiCorpus {
    path:         PathBuf,
    text_column:  String,
    level_column: String,
    chunker:      Chunker,
}

impl WiCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:         path.into(),
            text_column:  "text".to_string(),
            level_column: DEFAULT_LEVEL_COLUMN.to_string(),
            chunker:      Chunker::default(),
        }
    }

    /// Override the text/level column names for corpus variants
    /// that use different headers.
    pub fn with_columns(mut self, text: impl Into<String>, level: impl Into<String>) -> Self {
        self.text_column = text.into();
        self.level_column = level.into();
        self
    }

    /// Use non-default chunking bounds.
    pub fn with_chunker(mut self, chunker: Chunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Load the corpus, chunking each essay.
    pub fn load(&self) -> Result<ParsedRecords> {
        let file = fs::File::open(&self.path)
            .with_context(|| format!("Cannot open W&I corpus '{}'", self.path.display()))?;
        self.load_from_reader(file, Some(&self.chunker))
    }

    /// Load without chunking — raw essay lengths, used by the
    /// analyze workflow to report length statistics.
    pub fn load_raw(&self) -> Result<ParsedRecords> {
        let file = fs::File::open(&self.path)
            .with_context(|| format!("Cannot open W&I corpus '{}'", self.path.display()))?;
        self.load_from_reader(file, None)
    }

    /// Shared row loop over any reader (files in production,
    /// in-memory strings in tests).
    fn load_from_reader<R: Read>(
        &self,
        reader: R,
        chunker: Option<&Chunker>,
    ) -> Result<ParsedRecords> {
        // flexible(true): rows with a bad field count still come
        // back as records; we skip them by failed column lookup
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .with_context(|| format!("Cannot read header row of '{}'", self.path.display()))?
            .clone();

        let text_idx = headers
            .iter()
            .position(|h| h == self.text_column)
            .with_context(|| format!("Missing '{}' column", self.text_column))?;
        let level_idx = headers
            .iter()
            .position(|h| h == self.level_column)
            .with_context(|| format!("Missing '{}' column", self.level_column))?;

        let mut parsed = ParsedRecords::default();

        for row in rdr.records() {
            // Row-level parse error: drop the row, keep the file
            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!("Skipping malformed W&I row: {}", e);
                    parsed.skipped += 1;
                    continue;
                }
            };

            let text = row.get(text_idx).unwrap_or("").trim();
            if text.is_empty() {
                parsed.skipped += 1;
                continue;
            }

            let Some(label) = level_to_id(row.get(level_idx).unwrap_or("")) else {
                parsed.skipped += 1;
                continue;
            };

            match chunker {
                Some(chunker) => {
                    for chunk in chunker.chunk(text) {
                        parsed.records.push(LabeledRecord::new(chunk, label, WI_SOURCE));
                    }
                }
                None => parsed.records.push(LabeledRecord::new(text, label, WI_SOURCE)),
            }
        }

        Ok(parsed)
    }
}

impl RecordSource for WiCorpus {
    fn name(&self) -> &str {
        WI_SOURCE
    }

    fn load(&self) -> Result<ParsedRecords> {
        WiCorpus::load(self)
    }
}
