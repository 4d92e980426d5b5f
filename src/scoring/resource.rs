//! Tasks scored against the environment rather than the input window:
//! resource consumption, optimization toward a fixed optimum, and spatial
//! parity.

use super::{arithmetic, logic};
use crate::scoring::LogicOp;
use crate::task::params::{CellArgs, OptimizeArgs, OptimizeShape, TargetArgs};
use crate::task::TaskContext;

/// Extra condition a consume-target task places on the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetGate {
    /// Consuming the target is enough
    Plain,
    /// The output must also echo the latest input
    Echo,
    /// The output must also realize this logic operator
    Logic(LogicOp),
}

impl TargetGate {
    fn passes(self, ctx: &TaskContext<'_>) -> bool {
        match self {
            TargetGate::Plain => true,
            TargetGate::Echo => arithmetic::echo(ctx) >= 1.0,
            TargetGate::Logic(op) => logic::score(ctx, op.mask()) >= 1.0,
        }
    }
}

pub(crate) fn consume_target(ctx: &TaskContext<'_>, gate: TargetGate, args: &TargetArgs) -> f64 {
    let consumed = ctx.consumed_resource() == Some(args.target);
    if consumed && gate.passes(ctx) {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn optimize(ctx: &TaskContext<'_>, args: &OptimizeArgs) -> f64 {
    let distance = (f64::from(ctx.output()) - args.target).abs() / args.scale;
    match args.shape {
        OptimizeShape::Exponential => 2f64.powf(-distance),
        OptimizeShape::Linear => (1.0 - distance).max(0.0),
        OptimizeShape::Gaussian => (-(distance * distance) / 2.0).exp(),
    }
}

/// Reward for reporting the cell the agent occupies, weighted by parity.
pub(crate) fn collect_odd_cell(ctx: &TaskContext<'_>, args: &CellArgs) -> f64 {
    match ctx.cell_id() {
        Some(cell) if cell == ctx.output() => {
            if cell % 2 != 0 {
                args.odd
            } else {
                args.even
            }
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: i32 = 0b1010_1010;
    const B: i32 = 0b1100_1100;
    const C: i32 = 0b1111_0000;

    #[test]
    fn test_consume_target_plain() {
        let args = TargetArgs { target: 3 };
        let fed = TaskContext::builder(0).consumed_resource(3).build();
        let wrong = TaskContext::builder(0).consumed_resource(4).build();
        let hungry = TaskContext::builder(0).build();
        assert_eq!(consume_target(&fed, TargetGate::Plain, &args), 1.0);
        assert_eq!(consume_target(&wrong, TargetGate::Plain, &args), 0.0);
        assert_eq!(consume_target(&hungry, TargetGate::Plain, &args), 0.0);
    }

    #[test]
    fn test_consume_target_gated_by_logic() {
        let args = TargetArgs { target: 1 };
        let inputs = [C, B, A];
        let nand = TaskContext::builder(!(A & B))
            .inputs(&inputs)
            .consumed_resource(1)
            .build();
        assert_eq!(consume_target(&nand, TargetGate::Logic(LogicOp::Nand), &args), 1.0);
        assert_eq!(consume_target(&nand, TargetGate::Logic(LogicOp::Xor), &args), 0.0);
        assert_eq!(consume_target(&nand, TargetGate::Echo, &args), 0.0);
    }

    #[test]
    fn test_optimize_shapes() {
        let ctx = TaskContext::builder(12).build();
        let args = |shape| OptimizeArgs {
            target: 10.0,
            scale: 2.0,
            shape,
        };
        assert!((optimize(&ctx, &args(OptimizeShape::Exponential)) - 0.5).abs() < 1e-12);
        assert_eq!(optimize(&ctx, &args(OptimizeShape::Linear)), 0.0);
        let gaussian = optimize(&ctx, &args(OptimizeShape::Gaussian));
        assert!((gaussian - (-0.5f64).exp()).abs() < 1e-12);

        let at_optimum = TaskContext::builder(10).build();
        assert_eq!(optimize(&at_optimum, &args(OptimizeShape::Linear)), 1.0);
    }

    #[test]
    fn test_collect_odd_cell_parity() {
        let args = CellArgs {
            odd: 1.0,
            even: 0.25,
        };
        let odd = TaskContext::builder(7).cell_id(7).build();
        let even = TaskContext::builder(-4).cell_id(-4).build();
        let elsewhere = TaskContext::builder(7).cell_id(8).build();
        let unknown = TaskContext::builder(7).build();
        assert_eq!(collect_odd_cell(&odd, &args), 1.0);
        assert_eq!(collect_odd_cell(&even, &args), 0.25);
        assert_eq!(collect_odd_cell(&elsewhere, &args), 0.0);
        assert_eq!(collect_odd_cell(&unknown, &args), 0.0);
    }
}
