// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `build` and `analyze`
// and all their configurable flags.
//
// clap's derive macros generate the help text, the error
// messages for missing args, and the string → number
// conversions.

use clap::{Args, Subcommand};

use crate::application::analyze_use_case::AnalyzeConfig;
use crate::application::build_use_case::BuildConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a CEFR training corpus and export it as JSONL
    Build(BuildArgs),

    /// Report per-level counts and lengths for the raw sources
    Analyze(AnalyzeArgs),
}

/// All arguments for the `build` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory containing the STM split files
    /// (train-asr.stm, dev-asr.stm, eval-asr.stm)
    #[arg(long, default_value = "data/stms")]
    pub stm_dir: String,

    /// Path to the Write & Improve corpus TSV
    #[arg(long, default_value = "data/wi/en-writeandimprove2024-corpus.tsv")]
    pub wi_path: String,

    /// Directory of remote-dataset JSONL snapshots
    #[arg(long, default_value = "data/datasets")]
    pub datasets_dir: String,

    /// Output directory for train.jsonl / eval.jsonl / stats
    #[arg(long, default_value = "corpus")]
    pub out_dir: String,

    /// Exclude the speech-transcript source
    #[arg(long)]
    pub no_stm: bool,

    /// Exclude the written corpus (e.g. when its licence rules it
    /// out of a redistributed model)
    #[arg(long)]
    pub no_wi: bool,

    /// Exclude the remote datasets
    #[arg(long)]
    pub no_remote: bool,

    /// Exact-duplication factor for speech records, balancing
    /// them against the much larger written corpus (1 = off)
    #[arg(long, default_value_t = 4)]
    pub oversample: usize,

    /// Cap the assembled corpus at this many samples
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Seed for noise augmentation and shuffling — the same seed
    /// over the same inputs reproduces the corpus exactly
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Disable ASR-noise augmentation of training text
    #[arg(long)]
    pub no_noise: bool,

    /// Chunks below this word count are discarded
    #[arg(long, default_value_t = 5)]
    pub min_words: usize,

    /// Chunks are flushed before exceeding this word count
    #[arg(long, default_value_t = 50)]
    pub max_words: usize,
}

/// Convert CLI BuildArgs into the application-layer BuildConfig.
/// The application layer never sees clap types.
impl From<BuildArgs> for BuildConfig {
    fn from(a: BuildArgs) -> Self {
        BuildConfig {
            stm_dir:        a.stm_dir,
            wi_path:        a.wi_path,
            datasets_dir:   a.datasets_dir,
            out_dir:        a.out_dir,
            use_stm:        !a.no_stm,
            use_wi:         !a.no_wi,
            use_remote:     !a.no_remote,
            stm_oversample: a.oversample,
            max_samples:    a.max_samples,
            seed:           a.seed,
            augment:        !a.no_noise,
            min_words:      a.min_words,
            max_words:      a.max_words,
        }
    }
}

/// All arguments for the `analyze` command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory containing the STM split files
    #[arg(long, default_value = "data/stms")]
    pub stm_dir: String,

    /// Path to the Write & Improve corpus TSV
    #[arg(long, default_value = "data/wi/en-writeandimprove2024-corpus.tsv")]
    pub wi_path: String,
}

impl From<AnalyzeArgs> for AnalyzeConfig {
    fn from(a: AnalyzeArgs) -> Self {
        AnalyzeConfig {
            stm_dir: a.stm_dir,
            wi_path: a.wi_path,
        }
    }
}
