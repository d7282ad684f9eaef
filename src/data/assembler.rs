// ============================================================
// Layer 4 — Corpus Assembler
// ============================================================
// Combines the per-source record batches into one training-ready
// corpus:
//
//   1. Replicate the speech-transcript batch by the oversampling
//      factor (exact duplication — the written corpus is an order
//      of magnitude larger, and without the boost the speech
//      domain drowns).
//   2. Concatenate all batches (speech, written, remote).
//   3. Noise-augment the text of every training record.
//   4. Shuffle with a seeded rng.
//   5. Optionally truncate to max_samples.
//
// The held-out evaluation split never passes through here — it
// is loaded separately and stays untouched.
//
// Zero records across every enabled source is the one condition
// that fails loudly: training on nothing is a configuration
// error, not something to degrade through.
//
// The same seed over the same inputs yields a byte-identical
// corpus: one ChaCha8 stream drives augmentation and then the
// shuffle, in that fixed order.

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::data::noise::NoiseAugmenter;
use crate::domain::record::LabeledRecord;

/// Assembly policy for one build.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Exact-duplication factor for the speech batch (1 = off)
    pub stm_oversample: usize,
    /// Cap on the assembled corpus, applied after the shuffle
    pub max_samples: Option<usize>,
    /// Seed for augmentation and shuffling
    pub seed: u64,
    /// Whether to run the noise augmenter over training text
    pub augment: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            stm_oversample: 4,
            max_samples:    None,
            seed:           42,
            augment:        true,
        }
    }
}

pub struct CorpusAssembler {
    config:    AssemblerConfig,
    augmenter: NoiseAugmenter,
}

impl CorpusAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            config,
            augmenter: NoiseAugmenter::default(),
        }
    }

    /// Combine the per-source batches into the final training
    /// corpus. Disabled sources arrive as empty vectors.
    pub fn assemble(
        &self,
        stm: Vec<LabeledRecord>,
        wi: Vec<LabeledRecord>,
        remote: Vec<LabeledRecord>,
    ) -> Result<Vec<LabeledRecord>> {
        let factor = self.config.stm_oversample.max(1);

        let mut corpus: Vec<LabeledRecord> =
            Vec::with_capacity(stm.len() * factor + wi.len() + remote.len());

        // Exact duplication, not resampling with variation
        for _ in 0..factor {
            corpus.extend(stm.iter().cloned());
        }
        if !stm.is_empty() && factor > 1 {
            tracing::info!("Oversampled speech records x{}: {}", factor, stm.len() * factor);
        }

        corpus.extend(wi);
        corpus.extend(remote);

        if corpus.is_empty() {
            bail!("no training data: every enabled source produced zero records");
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        // Records are immutable — augmentation builds new ones
        if self.config.augment {
            corpus = corpus
                .into_iter()
                .map(|r| {
                    let noisy = self.augmenter.augment(&r.text, &mut rng);
                    LabeledRecord::new(noisy, r.label, r.source)
                })
                .collect();
        }

        corpus.shuffle(&mut rng);

        if let Some(cap) = self.config.max_samples {
            corpus.truncate(cap);
        }

        tracing::info!("Assembled corpus: {} records", corpus.len());
        Ok(corpus)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize, source: &str) -> Vec<LabeledRecord> {
        (0..n)
            .map(|i| LabeledRecord::new(format!("sample text number {i}"), i % 6, source))
            .collect()
    }

    fn no_noise(config: AssemblerConfig) -> CorpusAssembler {
        CorpusAssembler::new(AssemblerConfig { augment: false, ..config })
    }

    #[test]
    fn test_oversampling_duplicates_by_value() {
        let assembler = no_noise(AssemblerConfig {
            stm_oversample: 4,
            ..AssemblerConfig::default()
        });
        let corpus = assembler.assemble(records(10, "stm"), vec![], vec![]).unwrap();
        assert_eq!(corpus.len(), 40);
        // every original record appears exactly 4 times
        for original in records(10, "stm") {
            let copies = corpus.iter().filter(|r| **r == original).count();
            assert_eq!(copies, 4);
        }
    }

    #[test]
    fn test_two_sources_no_oversampling() {
        // 10 speech + 5 written, factor 1 → exactly 15 records
        let assembler = no_noise(AssemblerConfig {
            stm_oversample: 1,
            ..AssemblerConfig::default()
        });
        let corpus = assembler
            .assemble(records(10, "stm"), records(5, "wi"), vec![])
            .unwrap();
        assert_eq!(corpus.len(), 15);
        assert_eq!(corpus.iter().filter(|r| r.source == "stm").count(), 10);
        assert_eq!(corpus.iter().filter(|r| r.source == "wi").count(), 5);
    }

    #[test]
    fn test_empty_sources_fail_loudly() {
        let assembler = no_noise(AssemblerConfig::default());
        let result = assembler.assemble(vec![], vec![], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_samples_caps_the_corpus() {
        let assembler = no_noise(AssemblerConfig {
            stm_oversample: 1,
            max_samples: Some(7),
            ..AssemblerConfig::default()
        });
        let corpus = assembler.assemble(records(20, "stm"), vec![], vec![]).unwrap();
        assert_eq!(corpus.len(), 7);
    }

    #[test]
    fn test_same_seed_is_byte_identical() {
        let config = AssemblerConfig {
            stm_oversample: 2,
            seed: 1234,
            ..AssemblerConfig::default()
        };
        let a = CorpusAssembler::new(config.clone())
            .assemble(records(8, "stm"), records(8, "wi"), vec![])
            .unwrap();
        let b = CorpusAssembler::new(config)
            .assemble(records(8, "stm"), records(8, "wi"), vec![])
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_shuffle_differently() {
        let base = AssemblerConfig {
            stm_oversample: 1,
            augment: false,
            ..AssemblerConfig::default()
        };
        let a = CorpusAssembler::new(AssemblerConfig { seed: 1, ..base.clone() })
            .assemble(records(50, "stm"), vec![], vec![])
            .unwrap();
        let b = CorpusAssembler::new(AssemblerConfig { seed: 2, ..base })
            .assemble(records(50, "stm"), vec![], vec![])
            .unwrap();
        assert_ne!(a, b); // same multiset, different order
    }
}
