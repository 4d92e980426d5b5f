//! Echo and integer arithmetic tasks.
//!
//! Operands range over distinct positions of the operand window (the last
//! three inputs). Add, Add3 and
//! Sub behave like 32-bit registers (wrapping); Mult and Div measure the
//! distance to the exact answer in 64-bit so nothing overflows.

use super::{any_selection, min_over_selections, operand_window};
use crate::task::params::DecayArgs;
use crate::task::reward::{all_or_nothing, decayed_quality};
use crate::task::TaskContext;

/// Output repeats the most recent input.
pub(crate) fn echo(ctx: &TaskContext<'_>) -> f64 {
    all_or_nothing(ctx.latest_input() == Some(ctx.output()))
}

pub(crate) fn add(ctx: &TaskContext<'_>) -> f64 {
    let inputs = operand_window(ctx);
    all_or_nothing(any_selection(inputs.len(), 2, |p| {
        inputs[p[0]].wrapping_add(inputs[p[1]]) == ctx.output()
    }))
}

pub(crate) fn add3(ctx: &TaskContext<'_>) -> f64 {
    let inputs = operand_window(ctx);
    all_or_nothing(any_selection(inputs.len(), 3, |p| {
        inputs[p[0]]
            .wrapping_add(inputs[p[1]])
            .wrapping_add(inputs[p[2]])
            == ctx.output()
    }))
}

pub(crate) fn sub(ctx: &TaskContext<'_>) -> f64 {
    let inputs = operand_window(ctx);
    all_or_nothing(any_selection(inputs.len(), 2, |p| {
        inputs[p[0]].wrapping_sub(inputs[p[1]]) == ctx.output()
    }))
}

/// Output is the largest XOR of any two inputs (as bit patterns).
pub(crate) fn xor_max(ctx: &TaskContext<'_>) -> f64 {
    let inputs = operand_window(ctx);
    let mut best: Option<u32> = None;
    for (i, a) in inputs.iter().enumerate() {
        for b in &inputs[i + 1..] {
            let x = (*a ^ *b) as u32;
            best = Some(best.map_or(x, |m| m.max(x)));
        }
    }
    all_or_nothing(best == Some(ctx.output() as u32))
}

pub(crate) fn mult(ctx: &TaskContext<'_>, args: &DecayArgs) -> f64 {
    let inputs = operand_window(ctx);
    let output = i64::from(ctx.output());
    let distance = min_over_selections(inputs.len(), 2, |p| {
        let product = i64::from(inputs[p[0]]) * i64::from(inputs[p[1]]);
        Some((output - product).unsigned_abs() as f64)
    });
    distance.map_or(0.0, |d| decayed_quality(d, args.threshold, args.halflife))
}

/// Zero divisors are skipped; a window with no usable pair scores nothing.
pub(crate) fn div(ctx: &TaskContext<'_>, args: &DecayArgs) -> f64 {
    let inputs = operand_window(ctx);
    let output = i64::from(ctx.output());
    let distance = min_over_selections(inputs.len(), 2, |p| {
        let quotient = i64::from(inputs[p[0]]).checked_div(i64::from(inputs[p[1]]))?;
        Some((output - quotient).unsigned_abs() as f64)
    });
    distance.map_or(0.0, |d| decayed_quality(d, args.threshold, args.halflife))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(inputs: &'a [i32], output: i32) -> TaskContext<'a> {
        TaskContext::builder(output).inputs(inputs).build()
    }

    #[test]
    fn test_echo_uses_latest_input() {
        assert_eq!(echo(&ctx(&[5, 9], 9)), 1.0);
        assert_eq!(echo(&ctx(&[5, 9], 5)), 0.0);
        assert_eq!(echo(&ctx(&[], 0)), 0.0);
    }

    #[test]
    fn test_add_and_add3() {
        assert_eq!(add(&ctx(&[3, 4, 10], 14)), 1.0);
        assert_eq!(add(&ctx(&[3, 4, 10], 6)), 0.0); // 3 + 3 reuses a position
        assert_eq!(add(&ctx(&[7], 14)), 0.0);
        assert_eq!(add3(&ctx(&[3, 4, 10], 17)), 1.0);
        assert_eq!(add3(&ctx(&[3, 4], 7)), 0.0);
    }

    #[test]
    fn test_operands_come_from_latest_three_inputs() {
        // 20 is four inputs back and no longer an operand
        assert_eq!(add(&ctx(&[20, 1, 2, 3], 23)), 0.0);
        assert_eq!(sub(&ctx(&[20, 1, 2, 3], 17)), 0.0);
        assert_eq!(add(&ctx(&[20, 1, 2, 3], 5)), 1.0);
        assert_eq!(sub(&ctx(&[20, 1, 2, 3], -1)), 1.0);
    }

    #[test]
    fn test_add_wraps() {
        assert_eq!(add(&ctx(&[i32::MAX, 1], i32::MIN)), 1.0);
    }

    #[test]
    fn test_sub_is_ordered() {
        assert_eq!(sub(&ctx(&[10, 3], 7)), 1.0);
        assert_eq!(sub(&ctx(&[10, 3], -7)), 1.0);
        assert_eq!(sub(&ctx(&[10, 3], 13)), 0.0);
    }

    #[test]
    fn test_xor_max() {
        // 1^2 = 3, 1^4 = 5, 2^4 = 6
        assert_eq!(xor_max(&ctx(&[1, 2, 4], 6)), 1.0);
        assert_eq!(xor_max(&ctx(&[1, 2, 4], 5)), 0.0);
        assert_eq!(xor_max(&ctx(&[1], 0)), 0.0);
    }

    #[test]
    fn test_mult_exact_by_default() {
        let args = DecayArgs::default();
        assert_eq!(mult(&ctx(&[6, 7], 42), &args), 1.0);
        assert_eq!(mult(&ctx(&[6, 7], 43), &args), 0.0);
        assert_eq!(mult(&ctx(&[i32::MAX, i32::MAX], 1), &args), 0.0);
    }

    #[test]
    fn test_mult_partial_within_threshold() {
        let args = DecayArgs {
            threshold: 4.0,
            halflife: 2.0,
        };
        // Distance 2 is one halflife
        assert!((mult(&ctx(&[6, 7], 44), &args) - 0.5).abs() < 1e-12);
        assert_eq!(mult(&ctx(&[6, 7], 50), &args), 0.0);
    }

    #[test]
    fn test_div_skips_zero_divisors() {
        let args = DecayArgs::default();
        assert_eq!(div(&ctx(&[0, 0], 0), &args), 0.0);
        assert_eq!(div(&ctx(&[0, 5], 0), &args), 1.0);
        assert_eq!(div(&ctx(&[17, 5], 3), &args), 1.0);
        assert_eq!(div(&ctx(&[i32::MIN, -1], i32::MIN), &args), 0.0);
    }
}
