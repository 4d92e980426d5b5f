//! Scoring routines and the dispatcher that routes an entry to them.
//!
//! Every routine reads a [`TaskContext`] and returns a reward in `[0, 1]`.
//! Routines never fail: a context that cannot satisfy a task scores `0.0`.
//!
//! # Invariants
//! - `Scorer::score` output is always clamped to `[0, 1]`
//! - Parameterized scorers read their arguments from the bound entry only

mod arithmetic;
mod comm;
pub mod logic;
pub mod math;
mod matching;
mod resource;
mod sequence;

use std::ops::ControlFlow;

use tracing::error;

pub use logic::{Logic3Class, LogicMask, LogicOp};
pub use math::{MathFormula, Transcendental};
pub use resource::TargetGate;
pub use sequence::fibonacci;

use crate::task::params::TaskArgs;
use crate::task::reward::clamp_reward;
use crate::task::{TaskContext, LOGIC_INPUTS};

/// How an entry is scored.
///
/// Fixed-form variants carry everything they need; parameterized variants
/// read their [`TaskArgs`] from the entry bound to the context.
#[derive(Debug, Clone, Copy)]
pub enum Scorer {
    DontCare,
    Echo,
    Add,
    Add3,
    Sub,
    XorMax,
    Mult,
    Div,
    Logic(LogicMask),
    Transcendental(Transcendental),
    Math(&'static MathFormula),
    FibTerm(u32),
    FibonacciSequence,
    SortInputs,
    MatchStr,
    MatchProdStr,
    MatchNumber,
    AllOnes,
    RoyalRoad,
    RoyalRoadWithDitches,
    ConsumeTarget(TargetGate),
    Optimize,
    CollectOddCell,
    CommEcho,
    CommNot,
    CommRelay,
}

impl Scorer {
    /// Score the context. The context must be bound to the entry that owns
    /// this scorer when the scorer is parameterized.
    pub(crate) fn score(&self, ctx: &TaskContext<'_>) -> f64 {
        let reward = match (*self, ctx.arguments()) {
            (Scorer::DontCare, _) => 0.0,
            (Scorer::Echo, _) => arithmetic::echo(ctx),
            (Scorer::Add, _) => arithmetic::add(ctx),
            (Scorer::Add3, _) => arithmetic::add3(ctx),
            (Scorer::Sub, _) => arithmetic::sub(ctx),
            (Scorer::XorMax, _) => arithmetic::xor_max(ctx),
            (Scorer::Mult, Some(TaskArgs::Decay(args))) => arithmetic::mult(ctx, args),
            (Scorer::Div, Some(TaskArgs::Decay(args))) => arithmetic::div(ctx, args),
            (Scorer::Logic(mask), _) => logic::score(ctx, mask),
            (Scorer::Transcendental(f), Some(TaskArgs::Decay(args))) => {
                math::transcendental(ctx, f, args)
            }
            (Scorer::Math(formula), _) => math::formula(ctx, formula),
            (Scorer::FibTerm(n), _) => sequence::fib_term(ctx, n),
            (Scorer::FibonacciSequence, Some(TaskArgs::FibonacciSequence(args))) => {
                sequence::fibonacci_sequence(ctx, args)
            }
            (Scorer::SortInputs, Some(TaskArgs::SortInputs(args))) => {
                sequence::sort_inputs(ctx, args)
            }
            (Scorer::MatchStr, Some(TaskArgs::Pattern(args))) => matching::match_str(ctx, args),
            (Scorer::MatchProdStr, Some(TaskArgs::Pattern(args))) => {
                matching::match_prod_str(ctx, args)
            }
            (Scorer::MatchNumber, Some(TaskArgs::MatchNumber(args))) => {
                matching::match_number(ctx, args)
            }
            (Scorer::AllOnes, Some(TaskArgs::Blocks(args))) => matching::all_ones(ctx, args),
            (Scorer::RoyalRoad, Some(TaskArgs::Blocks(args))) => matching::royal_road(ctx, args),
            (Scorer::RoyalRoadWithDitches, Some(TaskArgs::Blocks(args))) => {
                matching::royal_road_with_ditches(ctx, args)
            }
            (Scorer::ConsumeTarget(gate), Some(TaskArgs::Target(args))) => {
                resource::consume_target(ctx, gate, args)
            }
            (Scorer::Optimize, Some(TaskArgs::Optimize(args))) => resource::optimize(ctx, args),
            (Scorer::CollectOddCell, Some(TaskArgs::Cell(args))) => {
                resource::collect_odd_cell(ctx, args)
            }
            (Scorer::CommEcho, _) => comm::comm_echo(ctx),
            (Scorer::CommNot, _) => comm::comm_not(ctx),
            (Scorer::CommRelay, _) => comm::comm_relay(ctx),
            (scorer, args) => {
                error!(?scorer, ?args, "Scorer invoked without matching arguments");
                0.0
            }
        };
        clamp_reward(reward)
    }
}

/// Output history to score, falling back to the current output alone when
/// the caller supplied no history.
pub(crate) fn produced<'a>(ctx: &TaskContext<'a>, output: &'a i32) -> &'a [i32] {
    match ctx.output_history() {
        [] => std::slice::from_ref(output),
        history => history,
    }
}

// ============================================================================
// Operand selection
// ============================================================================

/// The most recent inputs that operand-selecting tasks may draw from.
///
/// Same window logic ids are derived over; it bounds the number of
/// selections regardless of how many inputs the caller kept.
pub(crate) fn operand_window<'a>(ctx: &TaskContext<'a>) -> &'a [i32] {
    let inputs = ctx.inputs();
    &inputs[inputs.len().saturating_sub(LOGIC_INPUTS)..]
}

/// Visit every ordered tuple of `k` distinct positions in `0..len`.
///
/// Stops early when the visitor breaks.
fn visit_selections<B>(
    len: usize,
    k: usize,
    visit: &mut impl FnMut(&[usize]) -> ControlFlow<B>,
) -> ControlFlow<B> {
    fn recurse<B>(
        len: usize,
        k: usize,
        chosen: &mut Vec<usize>,
        visit: &mut impl FnMut(&[usize]) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        if chosen.len() == k {
            return visit(chosen.as_slice());
        }
        for position in 0..len {
            if chosen.contains(&position) {
                continue;
            }
            chosen.push(position);
            recurse(len, k, chosen, visit)?;
            chosen.pop();
        }
        ControlFlow::Continue(())
    }

    if k == 0 || k > len {
        return ControlFlow::Continue(());
    }
    recurse(len, k, &mut Vec::with_capacity(k), visit)
}

/// Whether `pred` holds for some ordered choice of `k` distinct positions.
pub(crate) fn any_selection(
    len: usize,
    k: usize,
    mut pred: impl FnMut(&[usize]) -> bool,
) -> bool {
    visit_selections(len, k, &mut |p| {
        if pred(p) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}

/// Smallest value `f` yields over every ordered choice of `k` distinct
/// positions; `None` when `f` never yields. Stops at the first zero.
pub(crate) fn min_over_selections(
    len: usize,
    k: usize,
    mut f: impl FnMut(&[usize]) -> Option<f64>,
) -> Option<f64> {
    let mut best: Option<f64> = None;
    let _: ControlFlow<()> = visit_selections(len, k, &mut |p| {
        if let Some(value) = f(p) {
            let value = best.map_or(value, |b: f64| b.min(value));
            best = Some(value);
            if value <= 0.0 {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    });
    best
}
