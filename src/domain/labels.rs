// ============================================================
// Layer 3 — CEFR Label Vocabulary
// ============================================================
// The fixed bijection between the six CEFR proficiency levels
// and the integer class ids the classifier is trained on:
//
//   A1 → 0, A2 → 1, B1 → 2, B2 → 3, C1 → 4, C2 → 5
//
// The table is a compile-time constant — created once, never
// mutated, shared by every parser in the pipeline.
//
// Normalisation rules applied before lookup:
//   - surrounding whitespace is trimmed, case is ignored
//   - one trailing "+" or "-" modifier is stripped ("B1+" → B1)
//   - the bare legacy token "C" maps to C1
//
// Anything else is unmapped: callers get None and must skip
// the record, never raise.
//
// Reference: CEFR (Common European Framework of Reference)

/// The six CEFR levels in ascending order. The index of a level
/// in this array IS its class id.
pub const LEVELS: [&str; 6] = ["A1", "A2", "B1", "B2", "C1", "C2"];

/// Map a raw level string to its class id.
///
/// Returns None for anything the vocabulary does not recognise —
/// an unmapped level means "skip this record", not an error.
pub fn level_to_id(level: &str) -> Option<usize> {
    let normalised = level.trim().to_ascii_uppercase();

    // Strip at most one trailing modifier suffix ("B1+", "B1-")
    let base = normalised
        .strip_suffix('+')
        .or_else(|| normalised.strip_suffix('-'))
        .unwrap_or(&normalised);

    // Legacy encoding: a bare "C" means C1
    let base = if base == "C" { "C1" } else { base };

    LEVELS.iter().position(|&l| l == base)
}

/// Inverse mapping: class id back to its canonical level string.
pub fn id_to_level(id: usize) -> Option<&'static str> {
    LEVELS.get(id).copied()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_levels_map_to_their_index() {
        for (id, level) in LEVELS.iter().enumerate() {
            assert_eq!(level_to_id(level), Some(id));
        }
    }

    #[test]
    fn test_modifier_suffixes_are_stripped() {
        assert_eq!(level_to_id("B1+"), level_to_id("B1"));
        assert_eq!(level_to_id("B1-"), level_to_id("B1"));
        assert_eq!(level_to_id("c2+"), Some(5));
    }

    #[test]
    fn test_legacy_c_maps_to_c1() {
        assert_eq!(level_to_id("C"), Some(4));
    }

    #[test]
    fn test_lowercase_and_whitespace_tolerated() {
        assert_eq!(level_to_id("  b2 "), Some(3));
        assert_eq!(level_to_id("a1"), Some(0));
    }

    #[test]
    fn test_unknown_strings_are_unmapped() {
        assert_eq!(level_to_id("D1"), None);
        assert_eq!(level_to_id(""), None);
        assert_eq!(level_to_id("native"), None);
        assert_eq!(level_to_id("B"), None);
    }

    #[test]
    fn test_id_to_level_is_the_inverse() {
        for id in 0..6 {
            let level = id_to_level(id).unwrap();
            assert_eq!(level_to_id(level), Some(id));
        }
        assert_eq!(id_to_level(6), None);
    }
}
