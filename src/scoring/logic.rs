//! Bitwise logic tasks.
//!
//! Every logic task is an exact-match test on the context's logic id: the
//! task accepts a fixed set of 8-bit truth tables and awards full credit iff
//! the agent's output realizes one of them.
//!
//! # Truth table layout
//! ```text
//!  Logic ID Bit: 7 6 5 4 3 2 1 0
//!       Input C: 1 1 1 1 0 0 0 0
//!       Input B: 1 1 0 0 1 1 0 0
//!       Input A: 1 0 1 0 1 0 1 0
//! ```
//!
//! The one- and two-input operators accept the operator applied to any
//! variable (or ordered pair of distinct variables). The three-input family
//! covers every function that depends on all three inputs, grouped into
//! classes of functions that differ only by a relabelling of the inputs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::task::reward::all_or_nothing;
use crate::task::TaskContext;

/// Number of logic variables.
const VARIABLES: usize = 3;

/// Every relabelling of the three variables.
const PERMUTATIONS: [[usize; VARIABLES]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Set of accepted logic ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogicMask([u64; 4]);

impl LogicMask {
    pub fn from_ids(ids: impl IntoIterator<Item = u8>) -> Self {
        let mut words = [0u64; 4];
        for id in ids {
            words[usize::from(id) / 64] |= 1 << (id % 64);
        }
        Self(words)
    }

    pub fn contains(&self, id: u8) -> bool {
        self.0[usize::from(id) / 64] & (1 << (id % 64)) != 0
    }

    /// Accepted ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|id| self.contains(*id))
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }
}

impl fmt::Debug for LogicMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ids()).finish()
    }
}

/// Bit `var` of a truth table index.
fn variable(index: usize, var: usize) -> bool {
    (index >> var) & 1 == 1
}

/// Build a logic id from a function of the three variables.
fn truth_table(f: impl Fn([bool; VARIABLES]) -> bool) -> u8 {
    (0..8).fold(0u8, |id, index| {
        let vars = [variable(index, 0), variable(index, 1), variable(index, 2)];
        id | (u8::from(f(vars)) << index)
    })
}

// ============================================================================
// One- and two-input operators
// ============================================================================

/// Named one- and two-input operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    Not,
    Nand,
    And,
    OrNot,
    Or,
    AndNot,
    Nor,
    Xor,
    Equ,
}

impl LogicOp {
    pub const ALL: [LogicOp; 9] = [
        LogicOp::Not,
        LogicOp::Nand,
        LogicOp::And,
        LogicOp::OrNot,
        LogicOp::Or,
        LogicOp::AndNot,
        LogicOp::Nor,
        LogicOp::Xor,
        LogicOp::Equ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LogicOp::Not => "Not",
            LogicOp::Nand => "Nand",
            LogicOp::And => "And",
            LogicOp::OrNot => "OrNot",
            LogicOp::Or => "Or",
            LogicOp::AndNot => "AndNot",
            LogicOp::Nor => "Nor",
            LogicOp::Xor => "Xor",
            LogicOp::Equ => "Equ",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LogicOp::Not => "~A",
            LogicOp::Nand => "~(A & B)",
            LogicOp::And => "A & B",
            LogicOp::OrNot => "A | ~B",
            LogicOp::Or => "A | B",
            LogicOp::AndNot => "A & ~B",
            LogicOp::Nor => "~(A | B)",
            LogicOp::Xor => "A ^ B",
            LogicOp::Equ => "~(A ^ B)",
        }
    }

    fn arity(self) -> usize {
        match self {
            LogicOp::Not => 1,
            _ => 2,
        }
    }

    fn apply(self, x: bool, y: bool) -> bool {
        match self {
            LogicOp::Not => !x,
            LogicOp::Nand => !(x && y),
            LogicOp::And => x && y,
            LogicOp::OrNot => x || !y,
            LogicOp::Or => x || y,
            LogicOp::AndNot => x && !y,
            LogicOp::Nor => !(x || y),
            LogicOp::Xor => x ^ y,
            LogicOp::Equ => x == y,
        }
    }

    /// Logic ids of this operator over every choice of operand variables.
    pub fn mask(self) -> LogicMask {
        let mut ids = Vec::new();
        for x in 0..VARIABLES {
            if self.arity() == 1 {
                ids.push(truth_table(|v| self.apply(v[x], false)));
                continue;
            }
            for y in (0..VARIABLES).filter(|y| *y != x) {
                ids.push(truth_table(|v| self.apply(v[x], v[y])));
            }
        }
        LogicMask::from_ids(ids)
    }
}

// ============================================================================
// Three-input family
// ============================================================================

/// One class of three-input functions equal up to input relabelling.
#[derive(Debug, Clone)]
pub struct Logic3Class {
    /// Two-letter suffix: AA, AB, ... CP
    pub suffix: String,
    pub mask: LogicMask,
}

impl Logic3Class {
    /// Smallest logic id in the class.
    pub fn representative(&self) -> u8 {
        self.mask.ids().next().unwrap_or(0)
    }
}

static LOGIC3_CLASSES: LazyLock<Vec<Logic3Class>> = LazyLock::new(build_logic3_classes);

/// The three-input classes, ordered by smallest member.
pub fn logic3_classes() -> &'static [Logic3Class] {
    &LOGIC3_CLASSES
}

/// Whether the function's output ever changes when `var` flips.
pub fn depends_on(id: u8, var: usize) -> bool {
    (0..8).any(|index| ((id >> index) & 1) != ((id >> (index ^ (1 << var))) & 1))
}

/// Relabel the inputs of a function: variable `j` of the result reads
/// variable `perm[j]` of `id`.
pub fn permute(id: u8, perm: [usize; VARIABLES]) -> u8 {
    truth_table(|v| {
        let mut source = 0usize;
        for (j, from) in perm.iter().enumerate() {
            source |= usize::from(v[j]) << from;
        }
        (id >> source) & 1 == 1
    })
}

fn class_suffix(position: usize) -> String {
    let first = char::from(b'A' + (position / 26) as u8);
    let second = char::from(b'A' + (position % 26) as u8);
    format!("{first}{second}")
}

fn build_logic3_classes() -> Vec<Logic3Class> {
    let mut classes: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
    for id in 0..=u8::MAX {
        if !(0..VARIABLES).all(|var| depends_on(id, var)) {
            continue;
        }
        let canonical = PERMUTATIONS
            .iter()
            .map(|perm| permute(id, *perm))
            .min()
            .unwrap_or(id);
        classes.entry(canonical).or_default().push(id);
    }
    classes
        .into_values()
        .enumerate()
        .map(|(position, ids)| Logic3Class {
            suffix: class_suffix(position),
            mask: LogicMask::from_ids(ids),
        })
        .collect()
}

// ============================================================================
// Scoring
// ============================================================================

/// Full credit iff the context's logic id is in `mask`.
pub(crate) fn score(ctx: &TaskContext<'_>, mask: LogicMask) -> f64 {
    all_or_nothing(ctx.logic_id().is_some_and(|id| mask.contains(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(op: LogicOp) -> Vec<u8> {
        op.mask().ids().collect()
    }

    #[test]
    fn test_two_input_operator_ids() {
        assert_eq!(ids(LogicOp::Not), vec![15, 51, 85]);
        assert_eq!(ids(LogicOp::Nand), vec![63, 95, 119]);
        assert_eq!(ids(LogicOp::And), vec![136, 160, 192]);
        assert_eq!(ids(LogicOp::OrNot), vec![175, 187, 207, 221, 243, 245]);
        assert_eq!(ids(LogicOp::Or), vec![238, 250, 252]);
        assert_eq!(ids(LogicOp::AndNot), vec![10, 12, 34, 48, 68, 80]);
        assert_eq!(ids(LogicOp::Nor), vec![3, 5, 17]);
        assert_eq!(ids(LogicOp::Xor), vec![60, 90, 102]);
        assert_eq!(ids(LogicOp::Equ), vec![153, 165, 195]);
    }

    #[test]
    fn test_three_input_class_count_and_names() {
        let classes = logic3_classes();
        assert_eq!(classes.len(), 68);
        assert_eq!(classes[0].suffix, "AA");
        assert_eq!(classes[25].suffix, "AZ");
        assert_eq!(classes[26].suffix, "BA");
        assert_eq!(classes[67].suffix, "CP");
    }

    #[test]
    fn test_three_input_classes_partition_full_dependency_functions() {
        let mut seen = [false; 256];
        for class in logic3_classes() {
            for id in class.mask.ids() {
                assert!(!seen[usize::from(id)], "id {id} in two classes");
                seen[usize::from(id)] = true;
            }
        }
        for id in 0..=u8::MAX {
            let full = (0..3).all(|v| depends_on(id, v));
            assert_eq!(seen[usize::from(id)], full, "id {id}");
        }
        assert_eq!(seen.iter().filter(|s| **s).count(), 218);
    }

    #[test]
    fn test_three_input_classes_ordered_by_smallest_member() {
        let reps: Vec<u8> = logic3_classes().iter().map(|c| c.representative()).collect();
        assert!(reps.windows(2).all(|w| w[0] < w[1]));
        // Three-input NOR: output set only when every input is clear.
        assert_eq!(logic3_classes()[0].mask.ids().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_classes_are_closed_under_relabelling() {
        for class in logic3_classes() {
            for id in class.mask.ids() {
                for perm in PERMUTATIONS {
                    assert!(class.mask.contains(permute(id, perm)));
                }
            }
        }
    }

    #[test]
    fn test_truth_tables_match_boolean_functions() {
        // Majority is symmetric: a class of its own.
        let majority = truth_table(|v| (v[0] && v[1]) || (v[1] && v[2]) || (v[0] && v[2]));
        assert_eq!(majority, 232);
        let class = logic3_classes()
            .iter()
            .find(|c| c.mask.contains(majority))
            .unwrap();
        assert_eq!(class.mask.len(), 1);

        // A & ~B & ~C is not symmetric: its class holds all three relabellings.
        let lone_a = truth_table(|v| v[0] && !v[1] && !v[2]);
        let class = logic3_classes()
            .iter()
            .find(|c| c.mask.contains(lone_a))
            .unwrap();
        assert_eq!(class.mask.ids().collect::<Vec<_>>(), vec![2, 4, 16]);
    }

    #[test]
    fn test_permute_identity_and_swap() {
        let a_and_not_b = truth_table(|v| v[0] && !v[1]);
        assert_eq!(permute(a_and_not_b, [0, 1, 2]), a_and_not_b);
        assert_eq!(permute(a_and_not_b, [1, 0, 2]), truth_table(|v| v[1] && !v[0]));
    }

    #[test]
    fn test_mask_set_operations() {
        let mask = LogicMask::from_ids([0, 63, 64, 255]);
        assert_eq!(mask.len(), 4);
        assert!(mask.contains(64));
        assert!(!mask.contains(65));
        assert!(LogicMask::default().is_empty());
    }
}
