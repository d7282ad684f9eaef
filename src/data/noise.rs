// ============================================================
// Layer 4 — ASR Noise Augmenter
// ============================================================
// Perturbs clean written text so it statistically resembles an
// imperfect speech-recognition transcript: swallowed function
// words, transposed characters, dropped characters.
//
// Per call:
//   - With probability skip_prob (default 0.8) the text passes
//     through untouched, preserving a majority-clean subset.
//   - Otherwise ONE uniform draw r ∈ [0,1) is made per word and
//     tested against nested cutoffs, first match wins:
//
//       len < 4  and r < 0.03  → drop the word
//       len > 3  and r < 0.08  → transpose two adjacent chars
//       len > 4  and r < 0.11  → delete one interior char
//       otherwise              → keep the word unchanged
//
//   - Surviving words are re-joined with single spaces.
//
// The cutoffs are nested against the SAME draw, not independent
// coin flips: the effective per-word rates are 3% / 5% / 3% on
// words passing the length gates. Re-implementing this as three
// separate flips changes the statistics — keep the single draw.
//
// All randomness comes from the caller's RNG — a seeded rng
// reproduces the exact same output, word for word.

use rand::Rng;

/// Nested cutoffs for the per-word draw.
const DROP_CUTOFF:      f64 = 0.03;
const TRANSPOSE_CUTOFF: f64 = 0.08;
const DELETE_CUTOFF:    f64 = 0.11;

/// Stochastic ASR-error simulator. Holds only the global skip
/// probability; the RNG is threaded through every call.
pub struct NoiseAugmenter {
    skip_prob: f64,
}

impl Default for NoiseAugmenter {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl NoiseAugmenter {
    /// `skip_prob` is the chance a call returns its input
    /// unchanged; 1.0 turns the augmenter into the identity.
    pub fn new(skip_prob: f64) -> Self {
        Self { skip_prob }
    }

    /// Apply one round of noise to `text`, drawing fresh
    /// randomness from `rng`.
    pub fn augment<R: Rng>(&self, text: &str, rng: &mut R) -> String {
        if rng.gen::<f64>() < self.skip_prob {
            return text.to_string();
        }

        let mut out: Vec<String> = Vec::new();
        for word in text.split_whitespace() {
            let r: f64 = rng.gen();
            let len = word.chars().count();

            if len < 4 && r < DROP_CUTOFF {
                // ASR swallows a short function word
                continue;
            } else if len > 3 && r < TRANSPOSE_CUTOFF {
                out.push(transpose(word, rng));
            } else if len > 4 && r < DELETE_CUTOFF {
                out.push(delete_interior(word, rng));
            } else {
                out.push(word.to_string());
            }
        }

        out.join(" ")
    }
}

/// Swap one adjacent pair of characters; the swap point is drawn
/// uniformly over the word's interior. Operates on chars, never
/// bytes, so multi-byte words stay valid UTF-8.
fn transpose<R: Rng>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    let i = rng.gen_range(1..chars.len());
    chars.swap(i - 1, i);
    chars.into_iter().collect()
}

/// Delete one character strictly between the first and the last.
fn delete_interior<R: Rng>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    let i = rng.gen_range(1..chars.len() - 1);
    chars.remove(i);
    chars.into_iter().collect()
}
