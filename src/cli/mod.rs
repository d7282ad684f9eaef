// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application);
// this layer only routes and prints.
//
// Two commands are supported:
//   1. `build`   — assembles and exports a training corpus
//   2. `analyze` — reports statistics on the raw sources

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AnalyzeArgs, BuildArgs, Commands};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "cefr-corpus",
    version = "0.1.0",
    about = "Build CEFR-labelled training corpora from speech transcripts, essays, and remote datasets."
)]
pub struct Cli {
    /// The subcommand to run (build or analyze)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args) => Self::run_build(args),
            Commands::Analyze(args) => Self::run_analyze(args),
        }
    }

    /// Handles the `build` subcommand.
    fn run_build(args: BuildArgs) -> Result<()> {
        use crate::application::build_use_case::BuildUseCase;

        let use_case = BuildUseCase::new(args.into());
        let bundle = use_case.execute()?;

        println!(
            "Corpus ready: {} training records, {} held-out eval records.",
            bundle.train.len(),
            bundle.eval.len(),
        );
        Ok(())
    }

    /// Handles the `analyze` subcommand.
    fn run_analyze(args: AnalyzeArgs) -> Result<()> {
        use crate::application::analyze_use_case::AnalyzeUseCase;

        let use_case = AnalyzeUseCase::new(args.into());
        let analyses = use_case.execute()?;

        if analyses.is_empty() {
            println!("No readable sources found.");
            return Ok(());
        }

        for analysis in analyses {
            println!("\n{} ({} samples):", analysis.source, analysis.stats.total);
            for line in analysis.stats.summary_lines() {
                println!("  {line}");
            }
        }
        Ok(())
    }
}
