// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no parsing, no printing, no file
// formats. Each use case tells the data and infra layers what to
// do and in what order.

// The corpus build workflow
pub mod build_use_case;

// The source statistics workflow
pub mod analyze_use_case;
