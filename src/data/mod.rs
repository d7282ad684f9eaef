// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw label sources and the corpus handed
// to the external trainer.
//
// The pipeline flows in this order:
//
//   STM files        W&I TSV        remote snapshots
//       │               │                 │
//       ▼               ▼                 ▼
//   stm parser      wi parser      remote adapter
//       │               │                 │
//       │               └───── Chunker ───┘
//       │                        │
//       └──────────┬─────────────┘
//                  ▼
//          CorpusAssembler  → oversample, noise-augment,
//                  │          shuffle, cap
//                  ▼
//          (text, label, source) triples
//
// Each module owns exactly one step and is independently
// testable.

/// Parses speech-transcript (STM) files
pub mod stm;

/// Splits long documents into sentence-aligned chunks
pub mod chunker;

/// Parses the Write & Improve essay TSV
pub mod wi;

/// Normalises remote labelled datasets
pub mod remote;

/// Simulates ASR recognition errors on clean text
pub mod noise;

/// Combines, balances, and shuffles the sources
pub mod assembler;
