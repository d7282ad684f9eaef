// ============================================================
// Layer 4 — Remote-Dataset Adapter
// ============================================================
// Normalises externally hosted labelled datasets into the shared
// record shape. Each dataset brings its own column names and its
// own level encoding:
//
//   Numeric — a small integer 0..=5 addressing the vocabulary
//             directly (out-of-range values are dropped)
//   Text    — a level string, normalised exactly like every
//             other label path ("B1+", "c2", legacy "C", ...)
//
// The adapter itself is agnostic to how rows are fetched: it
// consumes any iterator of JSON-object rows. The concrete
// collaborator here is a JSONL snapshot reader (one object per
// line) pointed at a datasets directory; a dataset whose
// snapshot is missing or unreadable is logged and skipped, and
// the remaining datasets still load.
//
// Length policy per row: text under min_words is dropped, text
// over max_words goes through the Chunker, anything in between
// is kept as a single record.

use anyhow::{Context, Result};
use serde_json::Value;
use std::{fs, path::PathBuf};

use crate::data::chunker::Chunker;
use crate::domain::labels::level_to_id;
use crate::domain::record::{LabeledRecord, ParsedRecords};
use crate::domain::traits::RecordSource;

/// How a dataset encodes its proficiency level column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEncoding {
    /// Integer class id 0..=5
    Numeric,
    /// Level string ("A1".."C2", modifiers tolerated)
    Text,
}

/// Description of one remote dataset: where its columns live and
/// how to read them. `source` becomes the provenance tag on every
/// record it yields.
#[derive(Debug, Clone)]
pub struct RemoteDataset {
    /// Snapshot file stem under the datasets directory
    pub name: String,
    /// Provenance tag for emitted records
    pub source: String,
    pub text_column: String,
    pub level_column: String,
    /// Language filter: keep only rows whose `language_column`
    /// equals `language`. Rows without the column pass through.
    pub language_column: Option<String>,
    pub language: Option<String>,
    pub encoding: LevelEncoding,
}

impl RemoteDataset {
    /// The UniversalCEFR dataset, filtered to English.
    pub fn universal_cefr() -> Self {
        Self {
            name:            "universal_cefr".to_string(),
            source:          "hf".to_string(),
            text_column:     "text".to_string(),
            level_column:    "cefr_level".to_string(),
            language_column: Some("language".to_string()),
            language:        Some("en".to_string()),
            encoding:        LevelEncoding::Text,
        }
    }
}

/// Normalise an iterator of row objects into labelled records.
///
/// Rows that fail any gate (not an object, filtered language,
/// blank text, unmappable level, too short) are counted and
/// skipped.
pub fn normalize_rows<I>(dataset: &RemoteDataset, rows: I, chunker: &Chunker) -> ParsedRecords
where
    I: IntoIterator<Item = Value>,
{
    let mut parsed = ParsedRecords::default();

    for row in rows {
        let Some(obj) = row.as_object() else {
            parsed.skipped += 1;
            continue;
        };

        // Language filter only applies when the column exists
        if let (Some(col), Some(want)) = (&dataset.language_column, &dataset.language) {
            if let Some(lang) = obj.get(col).and_then(Value::as_str) {
                if lang != want {
                    parsed.skipped += 1;
                    continue;
                }
            }
        }

        let text = obj
            .get(&dataset.text_column)
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if text.is_empty() {
            parsed.skipped += 1;
            continue;
        }

        let Some(label) = extract_label(dataset, obj) else {
            parsed.skipped += 1;
            continue;
        };

        let words = text.split_whitespace().count();
        if words < chunker.min_words() {
            parsed.skipped += 1;
        } else if words > chunker.max_words() {
            for chunk in chunker.chunk(text) {
                parsed
                    .records
                    .push(LabeledRecord::new(chunk, label, dataset.source.as_str()));
            }
        } else {
            parsed
                .records
                .push(LabeledRecord::new(text, label, dataset.source.as_str()));
        }
    }

    parsed
}

/// Pull the class id out of a row according to the dataset's
/// level encoding. None means the row is unlabelable.
fn extract_label(dataset: &RemoteDataset, obj: &serde_json::Map<String, Value>) -> Option<usize> {
    let value = obj.get(&dataset.level_column)?;
    match dataset.encoding {
        LevelEncoding::Numeric => {
            // Snapshots sometimes stringify their integers
            let id = value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))?;
            // Out-of-range ids do not address the vocabulary
            if (0..=5).contains(&id) {
                Some(id as usize)
            } else {
                None
            }
        }
        LevelEncoding::Text => level_to_id(value.as_str()?),
    }
}

// ─── RemoteCatalog ────────────────────────────────────────────────────────────
/// The set of remote datasets a build pulls from, backed by
/// JSONL snapshots under one directory.
pub struct RemoteCatalog {
    dir:      PathBuf,
    datasets: Vec<RemoteDataset>,
    chunker:  Chunker,
}

impl RemoteCatalog {
    /// Catalog with the default dataset set (UniversalCEFR).
    pub fn new(dir: impl Into<PathBuf>, chunker: Chunker) -> Self {
        Self {
            dir:      dir.into(),
            datasets: vec![RemoteDataset::universal_cefr()],
            chunker,
        }
    }

    pub fn with_datasets(mut self, datasets: Vec<RemoteDataset>) -> Self {
        self.datasets = datasets;
        self
    }

    /// Load every dataset, independently: one unavailable source
    /// never aborts the others.
    pub fn load_all(&self) -> ParsedRecords {
        let mut parsed = ParsedRecords::default();
        for dataset in &self.datasets {
            match self.load_dataset(dataset) {
                Ok(batch) => {
                    tracing::info!("Dataset '{}': {} records", dataset.name, batch.len());
                    parsed.merge(batch);
                }
                Err(e) => {
                    tracing::warn!("Dataset '{}' unavailable: {} — skipping", dataset.name, e);
                }
            }
        }
        parsed
    }

    fn load_dataset(&self, dataset: &RemoteDataset) -> Result<ParsedRecords> {
        let path = self.dir.join(format!("{}.jsonl", dataset.name));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read snapshot '{}'", path.display()))?;

        // One JSON object per line; unparseable lines are counted
        let mut rows = Vec::new();
        let mut bad_lines = 0usize;
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<Value>(line) {
                Ok(v) => rows.push(v),
                Err(_) => bad_lines += 1,
            }
        }

        let mut parsed = normalize_rows(dataset, rows, &self.chunker);
        parsed.skipped += bad_lines;
        Ok(parsed)
    }
}

impl RecordSource for RemoteCatalog {
    fn name(&self) -> &str {
        "remote"
    }

    fn load(&self) -> Result<ParsedRecords> {
        Ok(self.load_all())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_dataset() -> RemoteDataset {
        RemoteDataset::universal_cefr()
    }

    fn numeric_dataset() -> RemoteDataset {
        RemoteDataset {
            name:            "graded".to_string(),
            source:          "graded".to_string(),
            text_column:     "sentence".to_string(),
            level_column:    "grade".to_string(),
            language_column: None,
            language:        None,
            encoding:        LevelEncoding::Numeric,
        }
    }

    #[test]
    fn test_string_levels_are_normalised() {
        let rows = vec![
            json!({"text": "I am learning English at school now.", "cefr_level": "b1+", "language": "en"}),
            json!({"text": "Short but valid sentence for this test.", "cefr_level": "C", "language": "en"}),
        ];
        let parsed = normalize_rows(&text_dataset(), rows, &Chunker::default());
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.records[0].label, 2); // B1
        assert_eq!(parsed.records[1].label, 4); // legacy C → C1
        assert!(parsed.records.iter().all(|r| r.source == "hf"));
    }

    #[test]
    fn test_language_filter_keeps_only_target_rows() {
        let rows = vec![
            json!({"text": "This one is written in English language.", "cefr_level": "A2", "language": "en"}),
            json!({"text": "Dieser Satz ist auf Deutsch geschrieben worden.", "cefr_level": "A2", "language": "de"}),
        ];
        let parsed = normalize_rows(&text_dataset(), rows, &Chunker::default());
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_rows_without_language_column_pass_through() {
        let rows = vec![json!({"text": "No language tag on this row at all.", "cefr_level": "B2"})];
        let parsed = normalize_rows(&text_dataset(), rows, &Chunker::default());
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_numeric_labels_address_the_vocabulary() {
        let rows = vec![
            json!({"sentence": "A sentence graded with an integer label.", "grade": 0}),
            json!({"sentence": "Another sentence with a stringified grade.", "grade": "5"}),
        ];
        let parsed = normalize_rows(&numeric_dataset(), rows, &Chunker::default());
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.records[0].label, 0);
        assert_eq!(parsed.records[1].label, 5);
    }

    #[test]
    fn test_out_of_range_numeric_labels_are_dropped() {
        let rows = vec![
            json!({"sentence": "This grade falls outside the vocabulary.", "grade": 6}),
            json!({"sentence": "Negative grades are equally impossible.", "grade": -1}),
        ];
        let parsed = normalize_rows(&numeric_dataset(), rows, &Chunker::default());
        assert!(parsed.is_empty());
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_short_text_is_dropped_and_long_text_is_chunked() {
        let long_text = {
            let mut sentences = Vec::new();
            for _ in 0..3 {
                let mut s = (0..30).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
                s.push('.');
                sentences.push(s);
            }
            sentences.join(" ")
        };
        let rows = vec![
            json!({"text": "too few", "cefr_level": "B1", "language": "en"}),
            json!({"text": long_text, "cefr_level": "B1", "language": "en"}),
        ];
        let parsed = normalize_rows(&text_dataset(), rows, &Chunker::default());
        // the 2-word row is dropped; the 90-word row splits
        assert_eq!(parsed.skipped, 1);
        assert!(parsed.len() > 1);
        assert!(parsed.records.iter().all(|r| r.label == 2));
    }

    #[test]
    fn test_missing_snapshot_is_skipped_not_fatal() {
        let catalog = RemoteCatalog::new("/nonexistent/datasets", Chunker::default());
        let parsed = catalog.load_all();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_catalog_accepts_custom_dataset_descriptions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("graded.jsonl"),
            r#"{"sentence": "An integer graded sentence for the catalog.", "grade": 3}"#,
        )
        .unwrap();

        let catalog = RemoteCatalog::new(dir.path(), Chunker::default())
            .with_datasets(vec![numeric_dataset()]);
        let parsed = catalog.load_all();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.records[0].label, 3);
        assert_eq!(parsed.records[0].source, "graded");
    }

    #[test]
    fn test_catalog_reads_jsonl_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universal_cefr.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"text": "I go to the market with my mother.", "cefr_level": "A1", "language": "en"}"#,
                "\n",
                "not json at all\n",
                r#"{"text": "Overall the argument remains quite persuasive today.", "cefr_level": "C2", "language": "en"}"#,
                "\n",
            ),
        )
        .unwrap();

        let catalog = RemoteCatalog::new(dir.path(), Chunker::default());
        let parsed = catalog.load_all();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.skipped, 1); // the unparseable line
    }
}
