//! Summary length heuristics.
//!
//! The target summary length scales with the input word count and is bounded on both ends so
//! that model latency and output size stay predictable:
//!
//! ```text
//! max_length = clamp(trunc(words * 0.2), 25, 150)
//! min_length = max(20, trunc(max_length * 0.5))
//! ```
//!
//! Both products are truncated toward zero, so 128 words plan a ceiling of 25, not 26.
//!
//! Inputs of at most [`SHORT_INPUT_WORDS`] words bypass the formula and use [`SHORT_INPUT_BOUNDS`].

use serde::Serialize;

/// Fraction of the input word count used as the summary ceiling.
const MAX_LENGTH_RATIO: f64 = 0.2;
/// Lowest ceiling the planner will produce.
pub const MIN_MAX_LENGTH: usize = 25;
/// Highest ceiling the planner will produce.
pub const MAX_MAX_LENGTH: usize = 150;
/// Lowest floor the planner will produce.
const MIN_MIN_LENGTH: usize = 20;

/// Inputs at or below this word count use the fixed short-input bounds.
pub const SHORT_INPUT_WORDS: usize = 50;
/// Fixed bounds for short inputs; the formula degenerates for them.
pub const SHORT_INPUT_BOUNDS: LengthBounds = LengthBounds {
    min_length: 10,
    max_length: 25,
};

/// Length bounds passed to a single model invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBounds {
    /// Minimum summary length.
    pub min_length: usize,
    /// Maximum summary length.
    pub max_length: usize,
}

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Derive summary bounds from an input word count.
pub fn plan_length_bounds(input_length: usize) -> LengthBounds {
    let scaled = truncate_to_usize(input_length as f64 * MAX_LENGTH_RATIO);
    let max_length = scaled.clamp(MIN_MAX_LENGTH, MAX_MAX_LENGTH);
    let min_length = MIN_MIN_LENGTH.max(truncate_to_usize(max_length as f64 * 0.5));
    LengthBounds {
        min_length,
        max_length,
    }
}

// Float-to-int `as` truncates toward zero; inputs here are never negative.
fn truncate_to_usize(value: f64) -> usize {
    value as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min_length: usize, max_length: usize) -> LengthBounds {
        LengthBounds {
            min_length,
            max_length,
        }
    }

    #[test]
    fn boundary_values() {
        assert_eq!(plan_length_bounds(0), bounds(20, 25));
        assert_eq!(plan_length_bounds(125), bounds(20, 25));
        assert_eq!(plan_length_bounds(750), bounds(75, 150));
        assert_eq!(plan_length_bounds(10_000), bounds(75, 150));
    }

    #[test]
    fn scales_between_the_clamps() {
        // 0.2 * 400 = 80, 0.5 * 80 = 40
        assert_eq!(plan_length_bounds(400), bounds(40, 80));
        // 0.2 * 128 = 25.6 -> 25, 0.5 * 25 = 12.5 -> floor of 20
        assert_eq!(plan_length_bounds(128), bounds(20, 25));
        // 0.2 * 225 = 45, 0.5 * 45 = 22.5 -> 22
        assert_eq!(plan_length_bounds(225), bounds(22, 45));
        // 0.2 * 253 = 50.6 -> 50, 0.5 * 50 = 25
        assert_eq!(plan_length_bounds(253), bounds(25, 50));
    }

    #[test]
    fn fractional_products_are_truncated_not_rounded() {
        for words in 0..1_000usize {
            let expected_max = (words / 5).clamp(MIN_MAX_LENGTH, MAX_MAX_LENGTH);
            let expected = bounds(MIN_MIN_LENGTH.max(expected_max / 2), expected_max);
            assert_eq!(plan_length_bounds(words), expected, "words={words}");
        }
    }

    #[test]
    fn min_never_exceeds_max() {
        for words in (0..2_000).step_by(7) {
            let planned = plan_length_bounds(words);
            assert!(planned.min_length <= planned.max_length, "words={words}");
            assert!((MIN_MAX_LENGTH..=MAX_MAX_LENGTH).contains(&planned.max_length));
            assert!(planned.min_length >= 20);
        }
    }

    #[test]
    fn counts_whitespace_delimited_tokens() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
    }
}
