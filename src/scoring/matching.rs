//! Bit pattern matching tasks.
//!
//! All of these compare the output, read as a 32-bit pattern, against a
//! target fixed at registration time and award partial credit per agreeing
//! bit (or per complete block for the royal road tasks).

use super::produced;
use crate::task::params::{BlockArgs, MatchNumberArgs, PatternArgs, PatternBit, VALUE_BITS};
use crate::task::reward::{all_or_nothing, fractional_reward};
use crate::task::TaskContext;

fn bit(value: i32, position: u32) -> bool {
    (value as u32 >> position) & 1 == 1
}

/// Mask selecting the low `bits` bits.
fn low_mask(bits: u32) -> u32 {
    if bits >= VALUE_BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

fn pattern_reward(args: &PatternArgs, correct: u32) -> f64 {
    let supplied = args.cared();
    if args.partial {
        fractional_reward(supplied, correct)
    } else {
        all_or_nothing(supplied > 0 && correct == supplied)
    }
}

/// The pattern read left to right against the output's bits from high to
/// low: the leftmost character is bit `len - 1`.
pub(crate) fn match_str(ctx: &TaskContext<'_>, args: &PatternArgs) -> f64 {
    let len = args.bits.len() as u32;
    let correct = args
        .bits
        .iter()
        .enumerate()
        .filter(|(i, expected)| {
            let position = len - 1 - *i as u32;
            **expected != PatternBit::DontCare && expected.accepts(bit(ctx.output(), position))
        })
        .count() as u32;
    pattern_reward(args, correct)
}

/// The pattern compared against the low bit of each produced output, oldest
/// first. Only the most recent `len` outputs count.
pub(crate) fn match_prod_str(ctx: &TaskContext<'_>, args: &PatternArgs) -> f64 {
    let output = ctx.output();
    let history = produced(ctx, &output);
    let recent = &history[history.len().saturating_sub(args.bits.len())..];
    let correct = recent
        .iter()
        .zip(&args.bits)
        .filter(|(value, expected)| {
            **expected != PatternBit::DontCare && expected.accepts(bit(**value, 0))
        })
        .count() as u32;
    pattern_reward(args, correct)
}

/// Agreeing low bits of output and target.
pub(crate) fn match_number(ctx: &TaskContext<'_>, args: &MatchNumberArgs) -> f64 {
    let differing = ((ctx.output() ^ args.target) as u32 & low_mask(args.bits)).count_ones();
    fractional_reward(args.bits, args.bits - differing)
}

/// Set bits among the low `length` bits.
pub(crate) fn all_ones(ctx: &TaskContext<'_>, args: &BlockArgs) -> f64 {
    let set = (ctx.output() as u32 & low_mask(args.length)).count_ones();
    fractional_reward(args.length, set)
}

/// Completeness of each block, lowest block first.
fn complete_blocks(output: i32, args: &BlockArgs) -> impl Iterator<Item = bool> {
    let block_mask = low_mask(args.block);
    let block = args.block;
    (0..args.block_count()).map(move |index| {
        let shifted = (output as u32).checked_shr(index * block).unwrap_or(0);
        shifted & block_mask == block_mask
    })
}

pub(crate) fn royal_road(ctx: &TaskContext<'_>, args: &BlockArgs) -> f64 {
    let complete = complete_blocks(ctx.output(), args).filter(|c| *c).count() as u32;
    fractional_reward(args.block_count(), complete)
}

/// Only the run of complete blocks up to the first incomplete one counts.
pub(crate) fn royal_road_with_ditches(ctx: &TaskContext<'_>, args: &BlockArgs) -> f64 {
    let run = complete_blocks(ctx.output(), args)
        .take_while(|c| *c)
        .count() as u32;
    fractional_reward(args.block_count(), run)
}
