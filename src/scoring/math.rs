//! Real-valued math tasks.
//!
//! Two kinds live here:
//! - Transcendental tasks (Log, Sqrt, Sine, ...) scored by the distance of
//!   the output from `f(input)` with threshold/halflife decay.
//! - The `Math1in`, `Math2in` and `Math3in` formula tables: exact match
//!   (within [`FLOAT_TOLERANCE`]) against a declarative formula applied to any
//!   ordered choice of distinct inputs.
//!
//! [`FLOAT_TOLERANCE`]: crate::task::reward::FLOAT_TOLERANCE

use std::fmt;

use super::{any_selection, min_over_selections, operand_window};
use crate::task::params::DecayArgs;
use crate::task::reward::{all_or_nothing, decayed_quality, matches_value, FLOAT_TOLERANCE};
use crate::task::TaskContext;

// ============================================================================
// Transcendental tasks
// ============================================================================

/// Unary functions scored with distance decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transcendental {
    Log,
    Log2,
    Log10,
    Sqrt,
    Sine,
    Cosine,
}

impl Transcendental {
    pub const ALL: [Transcendental; 6] = [
        Transcendental::Log,
        Transcendental::Log2,
        Transcendental::Log10,
        Transcendental::Sqrt,
        Transcendental::Sine,
        Transcendental::Cosine,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transcendental::Log => "Log",
            Transcendental::Log2 => "Log2",
            Transcendental::Log10 => "Log10",
            Transcendental::Sqrt => "Sqrt",
            Transcendental::Sine => "Sine",
            Transcendental::Cosine => "Cosine",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Transcendental::Log => "ln(|X|)",
            Transcendental::Log2 => "log2(|X|)",
            Transcendental::Log10 => "log10(|X|)",
            Transcendental::Sqrt => "sqrt(|X|)",
            Transcendental::Sine => "sin(X)",
            Transcendental::Cosine => "cos(X)",
        }
    }

    /// Apply the function; non-finite results mean "undefined here".
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Transcendental::Log => x.abs().ln(),
            Transcendental::Log2 => x.abs().log2(),
            Transcendental::Log10 => x.abs().log10(),
            Transcendental::Sqrt => x.abs().sqrt(),
            Transcendental::Sine => x.sin(),
            Transcendental::Cosine => x.cos(),
        }
    }
}

pub(crate) fn transcendental(ctx: &TaskContext<'_>, f: Transcendental, args: &DecayArgs) -> f64 {
    let inputs = operand_window(ctx);
    let output = f64::from(ctx.output());
    let distance = min_over_selections(inputs.len(), 1, |p| {
        let expected = f.apply(f64::from(inputs[p[0]]));
        expected.is_finite().then(|| (output - expected).abs())
    });
    match distance {
        Some(d) if d <= FLOAT_TOLERANCE => 1.0,
        Some(d) => decayed_quality(d, args.threshold, args.halflife),
        None => 0.0,
    }
}

// ============================================================================
// Formula tables
// ============================================================================

/// One entry of the Math1in/2in/3in tables.
pub struct MathFormula {
    /// Canonical task name, e.g. `Math2in_AB`
    pub name: &'static str,
    pub description: &'static str,
    /// Number of distinct inputs the formula reads (X, Y, Z)
    pub arity: usize,
    /// `None` where the formula is undefined (zero divisor, log of zero)
    pub eval: fn(&[f64]) -> Option<f64>,
}

impl fmt::Debug for MathFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathFormula")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

fn int_div(a: f64, b: f64) -> Option<f64> {
    (b != 0.0).then(|| (a / b).trunc())
}

fn int_mod(a: f64, b: f64) -> Option<f64> {
    (b != 0.0).then(|| a % b)
}

fn ln_abs(x: f64) -> Option<f64> {
    (x != 0.0).then(|| x.abs().ln())
}

fn sqrt_abs(x: f64) -> f64 {
    x.abs().sqrt()
}

pub static MATH_FORMULAS: &[MathFormula] = &[
    // One input
    MathFormula { name: "Math1in_AA", description: "2X", arity: 1, eval: |v| Some(2.0 * v[0]) },
    MathFormula { name: "Math1in_AB", description: "2X/3", arity: 1, eval: |v| int_div(2.0 * v[0], 3.0) },
    MathFormula { name: "Math1in_AC", description: "5X/4", arity: 1, eval: |v| int_div(5.0 * v[0], 4.0) },
    MathFormula { name: "Math1in_AD", description: "X^2", arity: 1, eval: |v| Some(v[0].powi(2)) },
    MathFormula { name: "Math1in_AE", description: "X^3", arity: 1, eval: |v| Some(v[0].powi(3)) },
    MathFormula { name: "Math1in_AF", description: "sqrt(X)", arity: 1, eval: |v| Some(sqrt_abs(v[0]).trunc()) },
    MathFormula { name: "Math1in_AG", description: "log(X)", arity: 1, eval: |v| ln_abs(v[0]).map(f64::trunc) },
    MathFormula { name: "Math1in_AH", description: "X^2+X^3", arity: 1, eval: |v| Some(v[0].powi(2) + v[0].powi(3)) },
    MathFormula { name: "Math1in_AI", description: "X^2+sqrt(X)", arity: 1, eval: |v| Some((v[0].powi(2) + sqrt_abs(v[0])).trunc()) },
    MathFormula { name: "Math1in_AJ", description: "abs(X)", arity: 1, eval: |v| Some(v[0].abs()) },
    MathFormula { name: "Math1in_AK", description: "X-5", arity: 1, eval: |v| Some(v[0] - 5.0) },
    MathFormula { name: "Math1in_AL", description: "10-X", arity: 1, eval: |v| Some(10.0 - v[0]) },
    MathFormula { name: "Math1in_AM", description: "3X", arity: 1, eval: |v| Some(3.0 * v[0]) },
    MathFormula { name: "Math1in_AN", description: "4X", arity: 1, eval: |v| Some(4.0 * v[0]) },
    MathFormula { name: "Math1in_AO", description: "X/4", arity: 1, eval: |v| int_div(v[0], 4.0) },
    MathFormula { name: "Math1in_AP", description: "X/6", arity: 1, eval: |v| int_div(v[0], 6.0) },
    MathFormula { name: "Math1in_AS", description: "X-6", arity: 1, eval: |v| Some(v[0] - 6.0) },
    // Two inputs
    MathFormula { name: "Math2in_AA", description: "sqrt(X+Y)", arity: 2, eval: |v| Some(sqrt_abs(v[0] + v[1]).trunc()) },
    MathFormula { name: "Math2in_AB", description: "(X+Y)^2", arity: 2, eval: |v| Some((v[0] + v[1]).powi(2)) },
    MathFormula { name: "Math2in_AC", description: "X%Y", arity: 2, eval: |v| int_mod(v[0], v[1]) },
    MathFormula { name: "Math2in_AD", description: "3X/2+5Y/4", arity: 2, eval: |v| Some(int_div(3.0 * v[0], 2.0)? + int_div(5.0 * v[1], 4.0)?) },
    MathFormula { name: "Math2in_AE", description: "abs((X-5)*(Y-6))", arity: 2, eval: |v| Some(((v[0] - 5.0) * (v[1] - 6.0)).abs()) },
    MathFormula { name: "Math2in_AF", description: "(X-Y)^2", arity: 2, eval: |v| Some((v[0] - v[1]).powi(2)) },
    MathFormula { name: "Math2in_AG", description: "X^2+Y^2", arity: 2, eval: |v| Some(v[0].powi(2) + v[1].powi(2)) },
    MathFormula { name: "Math2in_AH", description: "X^2+Y^3", arity: 2, eval: |v| Some(v[0].powi(2) + v[1].powi(3)) },
    MathFormula { name: "Math2in_AI", description: "(sqrt(X)+Y)/(X-7)", arity: 2, eval: |v| int_div(sqrt_abs(v[0]).trunc() + v[1], v[0] - 7.0) },
    MathFormula { name: "Math2in_AJ", description: "log(|X/Y|)", arity: 2, eval: |v| ln_abs(int_div(v[0], v[1])?).map(f64::trunc) },
    MathFormula { name: "Math2in_AK", description: "log(|X|)/Y", arity: 2, eval: |v| int_div(ln_abs(v[0])?.trunc(), v[1]) },
    MathFormula { name: "Math2in_AL", description: "X/log(|Y|)", arity: 2, eval: |v| int_div(v[0], ln_abs(v[1])?.trunc()) },
    MathFormula { name: "Math2in_AM", description: "X+Y", arity: 2, eval: |v| Some(v[0] + v[1]) },
    MathFormula { name: "Math2in_AN", description: "X-Y", arity: 2, eval: |v| Some(v[0] - v[1]) },
    MathFormula { name: "Math2in_AO", description: "X/Y", arity: 2, eval: |v| int_div(v[0], v[1]) },
    MathFormula { name: "Math2in_AP", description: "XY", arity: 2, eval: |v| Some(v[0] * v[1]) },
    MathFormula { name: "Math2in_AQ", description: "sqrt(X)+sqrt(Y)", arity: 2, eval: |v| Some(sqrt_abs(v[0]).trunc() + sqrt_abs(v[1]).trunc()) },
    MathFormula { name: "Math2in_AR", description: "X+2Y", arity: 2, eval: |v| Some(v[0] + 2.0 * v[1]) },
    MathFormula { name: "Math2in_AS", description: "X+3Y", arity: 2, eval: |v| Some(v[0] + 3.0 * v[1]) },
    MathFormula { name: "Math2in_AT", description: "2X+3Y", arity: 2, eval: |v| Some(2.0 * v[0] + 3.0 * v[1]) },
    MathFormula { name: "Math2in_AU", description: "XY^2", arity: 2, eval: |v| Some(v[0] * v[1].powi(2)) },
    MathFormula { name: "Math2in_AV", description: "X^2-Y^2", arity: 2, eval: |v| Some(v[0].powi(2) - v[1].powi(2)) },
    MathFormula { name: "Math2in_AX", description: "2X-Y", arity: 2, eval: |v| Some(2.0 * v[0] - v[1]) },
    MathFormula { name: "Math2in_AY", description: "X^2+XY", arity: 2, eval: |v| Some(v[0].powi(2) + v[0] * v[1]) },
    MathFormula { name: "Math2in_AZ", description: "(X+Y)/2", arity: 2, eval: |v| int_div(v[0] + v[1], 2.0) },
    MathFormula { name: "Math2in_AAA", description: "X^3+Y^3", arity: 2, eval: |v| Some(v[0].powi(3) + v[1].powi(3)) },
    // Three inputs
    MathFormula { name: "Math3in_AA", description: "X^2+Y^2+Z^2", arity: 3, eval: |v| Some(v[0].powi(2) + v[1].powi(2) + v[2].powi(2)) },
    MathFormula { name: "Math3in_AB", description: "sqrt(X)+sqrt(Y)+sqrt(Z)", arity: 3, eval: |v| Some(sqrt_abs(v[0]).trunc() + sqrt_abs(v[1]).trunc() + sqrt_abs(v[2]).trunc()) },
    MathFormula { name: "Math3in_AC", description: "X+2Y+3Z", arity: 3, eval: |v| Some(v[0] + 2.0 * v[1] + 3.0 * v[2]) },
    MathFormula { name: "Math3in_AD", description: "XY^2+Z^3", arity: 3, eval: |v| Some(v[0] * v[1].powi(2) + v[2].powi(3)) },
    MathFormula { name: "Math3in_AE", description: "(X%Y)*Z", arity: 3, eval: |v| Some(int_mod(v[0], v[1])? * v[2]) },
    MathFormula { name: "Math3in_AF", description: "(X+Y)^2+sqrt(Y+Z)", arity: 3, eval: |v| Some((v[0] + v[1]).powi(2) + sqrt_abs(v[1] + v[2]).trunc()) },
    MathFormula { name: "Math3in_AG", description: "(XY)%(YZ)", arity: 3, eval: |v| int_mod(v[0] * v[1], v[1] * v[2]) },
    MathFormula { name: "Math3in_AH", description: "X+Y+Z", arity: 3, eval: |v| Some(v[0] + v[1] + v[2]) },
    MathFormula { name: "Math3in_AI", description: "-X-Y-Z", arity: 3, eval: |v| Some(-v[0] - v[1] - v[2]) },
    MathFormula { name: "Math3in_AJ", description: "(X-Y)^2+(Y-Z)^2+(Z-X)^2", arity: 3, eval: |v| Some((v[0] - v[1]).powi(2) + (v[1] - v[2]).powi(2) + (v[2] - v[0]).powi(2)) },
    MathFormula { name: "Math3in_AK", description: "(X+Y)^2+(Y+Z)^2+(Z+X)^2", arity: 3, eval: |v| Some((v[0] + v[1]).powi(2) + (v[1] + v[2]).powi(2) + (v[2] + v[0]).powi(2)) },
    MathFormula { name: "Math3in_AL", description: "(X+Y)*Z", arity: 3, eval: |v| Some((v[0] + v[1]) * v[2]) },
    MathFormula { name: "Math3in_AM", description: "(X+Y+Z)/3", arity: 3, eval: |v| int_div(v[0] + v[1] + v[2], 3.0) },
];

/// Full credit iff the formula, applied to some ordered choice of distinct
/// inputs, equals the output.
pub(crate) fn formula(ctx: &TaskContext<'_>, formula: &MathFormula) -> f64 {
    let inputs = operand_window(ctx);
    let mut operands = [0.0f64; 3];
    all_or_nothing(any_selection(inputs.len(), formula.arity, |p| {
        for (slot, position) in p.iter().enumerate() {
            operands[slot] = f64::from(inputs[*position]);
        }
        (formula.eval)(&operands[..formula.arity]).is_some_and(|v| matches_value(ctx.output(), v))
    }))
}
