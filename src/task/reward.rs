//! Reward arithmetic shared by every scoring routine.
//!
//! # Invariants
//! - Every function here returns a value in `[0.0, 1.0]`
//! - No function here divides by zero or returns NaN

/// Tolerance used when comparing an integer output against a
/// floating-point expected value.
pub const FLOAT_TOLERANCE: f64 = 1e-6;

/// Partial credit: `correct / supplied`, or `0.0` when nothing was supplied.
///
/// `supplied` is the number of elements the task could structurally be
/// satisfied on in this context; `correct` is how many the agent got right.
///
/// # Precondition
/// `correct <= supplied` (larger values are capped at `supplied`)
///
/// # Pure Function
pub fn fractional_reward(supplied: u32, correct: u32) -> f64 {
    if supplied == 0 {
        return 0.0;
    }
    debug_assert!(correct <= supplied, "correct {correct} > supplied {supplied}");
    f64::from(correct.min(supplied)) / f64::from(supplied)
}

/// Exponential decay of quality with distance from the exact answer.
///
/// Returns `2^(-distance / halflife)` when the distance is within
/// `threshold`, `0.0` otherwise. A negative threshold means unbounded.
///
/// # Precondition
/// `halflife > 0` (enforced by the argument parsers)
pub fn decayed_quality(distance: f64, threshold: f64, halflife: f64) -> f64 {
    if !distance.is_finite() || distance < 0.0 {
        return 0.0;
    }
    if threshold >= 0.0 && distance > threshold {
        return 0.0;
    }
    clamp_reward(2f64.powf(-distance / halflife.abs()))
}

/// Whether an integer output equals an expected real value within
/// [`FLOAT_TOLERANCE`].
pub fn matches_value(output: i32, expected: f64) -> bool {
    expected.is_finite() && (f64::from(output) - expected).abs() <= FLOAT_TOLERANCE
}

/// Convert a boolean outcome into a reward.
pub fn all_or_nothing(passed: bool) -> f64 {
    if passed {
        1.0
    } else {
        0.0
    }
}

/// Force a value into the reward range. NaN maps to `0.0`.
pub fn clamp_reward(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
