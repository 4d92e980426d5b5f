//! Parameter blocks for the parameterized task families.
//!
//! Each family owns one small parser from argument text to its parameter
//! block. Parsers are pure and independent of the registry, so they can be
//! exercised directly.

use serde::Serialize;

use super::args::ArgSchema;
use super::error::ArgError;

/// Largest Fibonacci index whose term fits in an `i32` output.
pub const MAX_FIBONACCI_TERMS: u32 = 46;

/// Number of bits in an agent value.
pub const VALUE_BITS: u32 = 32;

/// Parsed arguments attached to a task entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskArgs {
    Decay(DecayArgs),
    FibonacciSequence(FibonacciArgs),
    SortInputs(SortArgs),
    Pattern(PatternArgs),
    MatchNumber(MatchNumberArgs),
    Blocks(BlockArgs),
    Target(TargetArgs),
    Optimize(OptimizeArgs),
    Cell(CellArgs),
}

// ============================================================================
// Distance decay (Mult, Div, Log, Sqrt, Sine, ...)
// ============================================================================

/// Threshold and halflife for tasks scored by distance from the exact answer.
///
/// # Invariants
/// - `halflife > 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayArgs {
    /// Largest distance still rewarded; negative means unbounded.
    pub threshold: f64,
    pub halflife: f64,
}

impl Default for DecayArgs {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            halflife: 0.1,
        }
    }
}

/// Parse `threshold` (integer) and `halflife` for integer-valued tasks.
pub fn parse_integer_decay(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .int("threshold", Some(0))
        .float("halflife", Some(0.1))
        .parse(text)?;
    let args = DecayArgs {
        threshold: values.int("threshold")? as f64,
        halflife: positive(values.float("halflife")?, "halflife")?,
    };
    Ok(TaskArgs::Decay(args))
}

/// Parse `threshold` (real) and `halflife` for real-valued tasks.
pub fn parse_real_decay(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .float("threshold", Some(0.0))
        .float("halflife", Some(0.1))
        .parse(text)?;
    let args = DecayArgs {
        threshold: values.float("threshold")?,
        halflife: positive(values.float("halflife")?, "halflife")?,
    };
    Ok(TaskArgs::Decay(args))
}

// ============================================================================
// Sequences
// ============================================================================

/// Target length and overrun penalty for the Fibonacci sequence task.
///
/// # Invariants
/// - `1 <= target <= MAX_FIBONACCI_TERMS`
/// - `penalty >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciArgs {
    pub target: u32,
    pub penalty: f64,
}

pub fn parse_fibonacci_sequence(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .int("target", Some(10))
        .float("penalty", Some(0.0))
        .parse(text)?;
    let target = values.int("target")?;
    if !(1..=i64::from(MAX_FIBONACCI_TERMS)).contains(&target) {
        return Err(ArgError::out_of_range(
            "target",
            format!("{target} not in 1..={MAX_FIBONACCI_TERMS}"),
        ));
    }
    let penalty = values.float("penalty")?;
    if penalty < 0.0 {
        return Err(ArgError::out_of_range("penalty", "must not be negative"));
    }
    Ok(TaskArgs::FibonacciSequence(FibonacciArgs {
        target: target as u32,
        penalty,
    }))
}

/// Order the sort task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
    /// Whichever order the agent matches better
    Any,
}

/// Window size and direction for the sort task.
///
/// `size == 0` sorts the whole input window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortArgs {
    pub size: usize,
    pub direction: SortDirection,
}

pub fn parse_sort_inputs(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .int("size", Some(0))
        .text("direction", Some("ascending"))
        .parse(text)?;
    let size = values.int("size")?;
    if size < 0 {
        return Err(ArgError::out_of_range("size", "must not be negative"));
    }
    let direction = match values.text("direction")?.to_ascii_lowercase().as_str() {
        "ascending" | "asc" | "1" => SortDirection::Ascending,
        "descending" | "desc" | "-1" => SortDirection::Descending,
        "any" | "0" => SortDirection::Any,
        other => {
            return Err(ArgError::out_of_range(
                "direction",
                format!("'{other}' is not ascending, descending or any"),
            ))
        }
    };
    Ok(TaskArgs::SortInputs(SortArgs {
        size: size as usize,
        direction,
    }))
}

// ============================================================================
// String and number matching
// ============================================================================

/// One position of a match pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternBit {
    Zero,
    One,
    DontCare,
}

impl PatternBit {
    /// Whether a produced bit satisfies this position.
    pub fn accepts(self, bit: bool) -> bool {
        match self {
            PatternBit::Zero => !bit,
            PatternBit::One => bit,
            PatternBit::DontCare => true,
        }
    }
}

/// Target bit pattern for the string matching tasks.
///
/// # Invariants
/// - `1 <= bits.len() <= VALUE_BITS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternArgs {
    pub bits: Vec<PatternBit>,
    /// Award partial credit; when false only a full match scores.
    pub partial: bool,
}

impl PatternArgs {
    /// Number of positions that are not don't-care.
    pub fn cared(&self) -> u32 {
        self.bits
            .iter()
            .filter(|b| **b != PatternBit::DontCare)
            .count() as u32
    }
}

/// Parse a pattern of `0`, `1` and `?` characters.
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternBit>, ArgError> {
    let malformed = |reason: &str| ArgError::MalformedPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };
    if pattern.is_empty() {
        return Err(malformed("pattern is empty"));
    }
    if pattern.chars().count() > VALUE_BITS as usize {
        return Err(malformed("pattern is longer than 32 bits"));
    }
    pattern
        .chars()
        .map(|c| match c {
            '0' => Ok(PatternBit::Zero),
            '1' => Ok(PatternBit::One),
            '?' => Ok(PatternBit::DontCare),
            _ => Err(malformed("only 0, 1 and ? are allowed")),
        })
        .collect()
}

pub fn parse_match_str(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .text("pattern", None)
        .int("partial", Some(1))
        .parse(text)?;
    Ok(TaskArgs::Pattern(PatternArgs {
        bits: parse_pattern(values.text("pattern")?)?,
        partial: values.int("partial")? != 0,
    }))
}

/// Target number for the number matching task.
///
/// # Invariants
/// - `1 <= bits <= VALUE_BITS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchNumberArgs {
    pub target: i32,
    /// Number of low bits compared
    pub bits: u32,
}

pub fn parse_match_number(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .int("target", None)
        .int("bits", Some(i64::from(VALUE_BITS)))
        .parse(text)?;
    Ok(TaskArgs::MatchNumber(MatchNumberArgs {
        target: to_i32(values.int("target")?, "target")?,
        bits: bit_width(values.int("bits")?, "bits")?,
    }))
}

/// Length and block size for the all-ones and royal road tasks.
///
/// # Invariants
/// - `1 <= length <= VALUE_BITS`
/// - `block >= 1` and `length % block == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockArgs {
    pub length: u32,
    pub block: u32,
}

impl BlockArgs {
    pub fn block_count(&self) -> u32 {
        self.length / self.block
    }
}

pub fn parse_all_ones(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .int("length", Some(i64::from(VALUE_BITS)))
        .parse(text)?;
    let length = bit_width(values.int("length")?, "length")?;
    Ok(TaskArgs::Blocks(BlockArgs { length, block: 1 }))
}

pub fn parse_royal_road(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .int("length", Some(i64::from(VALUE_BITS)))
        .int("block", Some(8))
        .parse(text)?;
    let length = bit_width(values.int("length")?, "length")?;
    let block = values.int("block")?;
    if block < 1 || block > i64::from(length) || i64::from(length) % block != 0 {
        return Err(ArgError::out_of_range(
            "block",
            format!("{block} does not evenly divide length {length}"),
        ));
    }
    Ok(TaskArgs::Blocks(BlockArgs {
        length,
        block: block as u32,
    }))
}

// ============================================================================
// Feeding, optimization, spatial
// ============================================================================

/// Resource the agent is asked to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetArgs {
    pub target: i32,
}

pub fn parse_consume_target(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new().int("target", None).parse(text)?;
    Ok(TaskArgs::Target(TargetArgs {
        target: to_i32(values.int("target")?, "target")?,
    }))
}

/// Shape of the optimization reward curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeShape {
    Exponential,
    Linear,
    Gaussian,
}

/// Optimum and curve for the optimization task.
///
/// # Invariants
/// - `scale > 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizeArgs {
    pub target: f64,
    pub scale: f64,
    pub shape: OptimizeShape,
}

pub fn parse_optimize(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .float("target", None)
        .float("scale", Some(1.0))
        .text("shape", Some("exponential"))
        .parse(text)?;
    let shape = match values.text("shape")?.to_ascii_lowercase().as_str() {
        "exponential" | "exp" => OptimizeShape::Exponential,
        "linear" => OptimizeShape::Linear,
        "gaussian" => OptimizeShape::Gaussian,
        other => {
            return Err(ArgError::out_of_range(
                "shape",
                format!("'{other}' is not exponential, linear or gaussian"),
            ))
        }
    };
    Ok(TaskArgs::Optimize(OptimizeArgs {
        target: values.float("target")?,
        scale: positive(values.float("scale")?, "scale")?,
        shape,
    }))
}

/// Rewards for reporting an odd or even cell.
///
/// # Invariants
/// - both rewards in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellArgs {
    pub odd: f64,
    pub even: f64,
}

pub fn parse_collect_odd_cell(text: &str) -> Result<TaskArgs, ArgError> {
    let values = ArgSchema::new()
        .float("odd", Some(1.0))
        .float("even", Some(0.0))
        .parse(text)?;
    Ok(TaskArgs::Cell(CellArgs {
        odd: unit(values.float("odd")?, "odd")?,
        even: unit(values.float("even")?, "even")?,
    }))
}

// ============================================================================
// Range checks
// ============================================================================

fn positive(value: f64, key: &str) -> Result<f64, ArgError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ArgError::out_of_range(key, "must be greater than zero"))
    }
}

fn unit(value: f64, key: &str) -> Result<f64, ArgError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ArgError::out_of_range(key, "must be within [0, 1]"))
    }
}

fn to_i32(value: i64, key: &str) -> Result<i32, ArgError> {
    i32::try_from(value).map_err(|_| ArgError::out_of_range(key, "does not fit in 32 bits"))
}

fn bit_width(value: i64, key: &str) -> Result<u32, ArgError> {
    if (1..=i64::from(VALUE_BITS)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ArgError::out_of_range(
            key,
            format!("{value} not in 1..={VALUE_BITS}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_number_positional_target() {
        let args = parse_match_number("42").unwrap();
        assert_eq!(
            args,
            TaskArgs::MatchNumber(MatchNumberArgs {
                target: 42,
                bits: 32
            })
        );
    }

    #[test]
    fn test_match_number_rejects_non_numeric() {
        assert!(matches!(
            parse_match_number("forty-two"),
            Err(ArgError::NotNumeric { .. })
        ));
        assert!(matches!(parse_match_number(""), Err(ArgError::Missing(_))));
        assert!(matches!(
            parse_match_number("99999999999"),
            Err(ArgError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_decay_defaults() {
        assert_eq!(
            parse_integer_decay("").unwrap(),
            TaskArgs::Decay(DecayArgs::default())
        );
        assert!(matches!(
            parse_real_decay("halflife=0"),
            Err(ArgError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_fibonacci_target_range() {
        assert!(parse_fibonacci_sequence("46").is_ok());
        assert!(parse_fibonacci_sequence("0").is_err());
        assert!(parse_fibonacci_sequence("47").is_err());
        assert!(parse_fibonacci_sequence("5, penalty=-1").is_err());
    }

    #[test]
    fn test_sort_direction_spellings() {
        let dir = |text: &str| match parse_sort_inputs(text).unwrap() {
            TaskArgs::SortInputs(args) => args.direction,
            other => panic!("unexpected args {:?}", other),
        };
        assert_eq!(dir(""), SortDirection::Ascending);
        assert_eq!(dir("direction=-1"), SortDirection::Descending);
        assert_eq!(dir("3, any"), SortDirection::Any);
        assert!(parse_sort_inputs("direction=sideways").is_err());
    }

    #[test]
    fn test_pattern_parsing() {
        assert_eq!(
            parse_pattern("10?").unwrap(),
            vec![PatternBit::One, PatternBit::Zero, PatternBit::DontCare]
        );
        assert!(parse_pattern("").is_err());
        assert!(parse_pattern("102").is_err());
        assert!(parse_pattern(&"1".repeat(33)).is_err());
    }

    #[test]
    fn test_royal_road_block_must_divide_length() {
        assert!(parse_royal_road("length=16, block=4").is_ok());
        assert!(parse_royal_road("length=16, block=5").is_err());
        assert!(parse_royal_road("block=0").is_err());
        assert!(parse_royal_road("length=33").is_err());
    }

    #[test]
    fn test_cell_rewards_bounded() {
        assert!(parse_collect_odd_cell("odd=1.0, even=0.25").is_ok());
        assert!(parse_collect_odd_cell("odd=1.5").is_err());
    }

    #[test]
    fn test_optimize_requires_target() {
        assert!(matches!(parse_optimize(""), Err(ArgError::Missing(_))));
        let args = parse_optimize("10, scale=2, shape=linear").unwrap();
        assert_eq!(
            args,
            TaskArgs::Optimize(OptimizeArgs {
                target: 10.0,
                scale: 2.0,
                shape: OptimizeShape::Linear
            })
        );
    }
}
