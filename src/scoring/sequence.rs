//! Sequence tasks: Fibonacci terms, the Fibonacci prefix and sorting.

use std::sync::LazyLock;

use super::produced;
use crate::task::params::{FibonacciArgs, SortArgs, SortDirection, MAX_FIBONACCI_TERMS};
use crate::task::reward::{all_or_nothing, fractional_reward};
use crate::task::TaskContext;

/// F(1) through F(46); every term fits in an `i32`.
static FIBONACCI: LazyLock<Vec<i32>> = LazyLock::new(|| {
    let mut terms = vec![1i32, 1];
    while terms.len() < MAX_FIBONACCI_TERMS as usize {
        let next = terms[terms.len() - 1] + terms[terms.len() - 2];
        terms.push(next);
    }
    terms
});

/// The `n`th Fibonacci number, one-based (F(1) = F(2) = 1).
///
/// `None` for `n == 0` or `n > 46`.
pub fn fibonacci(n: u32) -> Option<i32> {
    let index = usize::try_from(n).ok()?.checked_sub(1)?;
    FIBONACCI.get(index).copied()
}

pub(crate) fn fib_term(ctx: &TaskContext<'_>, n: u32) -> f64 {
    all_or_nothing(fibonacci(n) == Some(ctx.output()))
}

/// Credit for the leading run of the history that spells F(1), F(2), ...
///
/// A history that completes the target prefix and keeps going loses
/// `penalty` per extra output.
pub(crate) fn fibonacci_sequence(ctx: &TaskContext<'_>, args: &FibonacciArgs) -> f64 {
    let output = ctx.output();
    let history = produced(ctx, &output);
    let matched = history
        .iter()
        .zip(FIBONACCI.iter())
        .take_while(|(got, expected)| got == expected)
        .count() as u32;

    let target = args.target;
    let reward = fractional_reward(target, matched.min(target));
    if matched < target {
        return reward;
    }
    let overrun = history.len().saturating_sub(target as usize) as f64;
    (reward - args.penalty * overrun).max(0.0)
}

/// Credit for the most recent outputs reproducing the input window in
/// sorted order, position by position.
pub(crate) fn sort_inputs(ctx: &TaskContext<'_>, args: &SortArgs) -> f64 {
    let inputs = ctx.inputs();
    let size = match args.size {
        0 => inputs.len(),
        n => n.min(inputs.len()),
    };
    if size == 0 {
        return 0.0;
    }
    let mut window = inputs[inputs.len() - size..].to_vec();
    window.sort_unstable();

    let output = ctx.output();
    let history = produced(ctx, &output);
    let recent = &history[history.len().saturating_sub(size)..];
    let ascending = agreements(recent, window.iter());
    let descending = agreements(recent, window.iter().rev());
    let correct = match args.direction {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => descending,
        SortDirection::Any => ascending.max(descending),
    };
    fractional_reward(size as u32, correct)
}

fn agreements<'a>(recent: &[i32], expected: impl Iterator<Item = &'a i32>) -> u32 {
    recent
        .iter()
        .zip(expected)
        .filter(|(got, want)| got == want)
        .count() as u32
}
