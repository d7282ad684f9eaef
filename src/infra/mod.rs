// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   export.rs  — JSONL corpus files crossing the trainer
//                boundary (train.jsonl / eval.jsonl)
//
//   metrics.rs — per-level corpus statistics and their CSV
//                snapshot, for class-balance diagnostics
//
// Kept out of the data layer so the pipeline modules stay pure
// text-in/records-out and easy to test.

/// JSONL corpus writer
pub mod export;

/// Corpus statistics and CSV snapshot logger
pub mod metrics;
