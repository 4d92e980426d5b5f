//! Name-to-loader catalog of every known task.
//!
//! Each catalog entry says how to build a [`TaskEntry`](crate::task::TaskEntry)
//! for one task name: which scorer to use, what neighbor data it needs, and,
//! for parameterized families, how to parse the argument text.
//!
//! Lookup is forgiving about spelling: names compare case-insensitively with
//! `_`, `-` and spaces ignored. The three-input logic and math families also
//! answer to their legacy short forms (`logic_3AA`, `math_1AA`).

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::scoring::logic::logic3_classes;
use crate::scoring::math::MATH_FORMULAS;
use crate::scoring::{LogicOp, Scorer, TargetGate, Transcendental};
use crate::task::params::{self, TaskArgs};
use crate::task::{ArgError, Requirements};

/// Parser from argument text to a family's parameter block.
pub type ArgParser = fn(&str) -> Result<TaskArgs, ArgError>;

/// How a task's arguments are handled at registration.
#[derive(Clone, Copy)]
pub enum Loader {
    /// Takes no arguments; any argument text is ignored
    Fixed,
    /// Parses its argument text into a parameter block
    Parameterized(ArgParser),
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loader::Fixed => f.write_str("Fixed"),
            Loader::Parameterized(_) => f.write_str("Parameterized"),
        }
    }
}

/// One known task.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Canonical spelling of the name
    pub name: String,
    pub description: String,
    pub scorer: Scorer,
    pub requirements: Requirements,
    pub loader: Loader,
}

struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    fn insert(&mut self, entry: CatalogEntry) {
        self.index.insert(normalize(&entry.name), self.entries.len());
        self.entries.push(entry);
    }

    fn fixed(&mut self, name: impl Into<String>, description: impl Into<String>, scorer: Scorer) {
        self.insert(CatalogEntry {
            name: name.into(),
            description: description.into(),
            scorer,
            requirements: Requirements::empty(),
            loader: Loader::Fixed,
        });
    }

    fn parameterized(&mut self, name: &str, description: &str, scorer: Scorer, parse: ArgParser) {
        self.insert(CatalogEntry {
            name: name.to_string(),
            description: description.to_string(),
            scorer,
            requirements: Requirements::empty(),
            loader: Loader::Parameterized(parse),
        });
    }

    fn needing(&mut self, name: &str, description: &str, scorer: Scorer, needs: Requirements) {
        self.insert(CatalogEntry {
            name: name.to_string(),
            description: description.to_string(),
            scorer,
            requirements: needs,
            loader: Loader::Fixed,
        });
    }

    /// Point an extra spelling at the most recently inserted entry.
    fn alias(&mut self, alias: &str) {
        if let Some(last) = self.entries.len().checked_sub(1) {
            self.index.insert(normalize(alias), last);
        }
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(build_catalog);

/// Lookup key for a task name.
///
/// # Pure Function
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the catalog entry for a task name.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    let catalog: &'static Catalog = &CATALOG;
    catalog
        .index
        .get(&normalize(name))
        .map(|i| &catalog.entries[*i])
}

/// Canonical name of every known task, in catalog order.
pub fn task_names() -> impl Iterator<Item = &'static str> {
    let catalog: &'static Catalog = &CATALOG;
    catalog.entries.iter().map(|e| e.name.as_str())
}

/// Every catalog entry, in catalog order.
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG.entries
}

fn build_catalog() -> Catalog {
    let mut catalog = Catalog {
        entries: Vec::new(),
        index: HashMap::new(),
    };

    // Basics
    catalog.fixed("DontCare", "Always scores zero", Scorer::DontCare);
    catalog.fixed("Echo", "Output the most recent input", Scorer::Echo);
    catalog.fixed("Add", "A + B", Scorer::Add);
    catalog.fixed("Add3", "A + B + C", Scorer::Add3);
    catalog.fixed("Sub", "A - B", Scorer::Sub);
    catalog.fixed("XorMax", "Largest A ^ B over the inputs", Scorer::XorMax);
    catalog.parameterized("Mult", "A * B", Scorer::Mult, params::parse_integer_decay);
    catalog.parameterized("Div", "A / B", Scorer::Div, params::parse_integer_decay);

    // One- and two-input logic
    for op in LogicOp::ALL {
        catalog.fixed(op.name(), op.description(), Scorer::Logic(op.mask()));
    }

    // Three-input logic
    for class in logic3_classes() {
        let name = format!("Logic3in_{}", class.suffix);
        let description = format!("3-input logic class with ids {:?}", class.mask);
        catalog.fixed(name, description, Scorer::Logic(class.mask));
        catalog.alias(&format!("logic_3{}", class.suffix));
    }

    // Real-valued math
    for f in Transcendental::ALL {
        catalog.parameterized(
            f.name(),
            f.description(),
            Scorer::Transcendental(f),
            params::parse_real_decay,
        );
    }
    for formula in MATH_FORMULAS {
        catalog.fixed(formula.name, formula.description, Scorer::Math(formula));
        catalog.alias(&formula.name.replacen("in_", "_", 1).replacen("Math", "math_", 1));
    }

    // Sequences
    for n in 1..=10 {
        catalog.fixed(
            format!("Fib{n}"),
            format!("Fibonacci term {n}"),
            Scorer::FibTerm(n),
        );
    }
    catalog.parameterized(
        "FibonacciSequence",
        "Produce the Fibonacci sequence in order",
        Scorer::FibonacciSequence,
        params::parse_fibonacci_sequence,
    );
    catalog.parameterized(
        "SortInputs",
        "Output the input window in sorted order",
        Scorer::SortInputs,
        params::parse_sort_inputs,
    );

    // Bit pattern matching
    catalog.parameterized(
        "MatchStr",
        "Output matches a bit pattern",
        Scorer::MatchStr,
        params::parse_match_str,
    );
    catalog.parameterized(
        "MatchProdStr",
        "Produced outputs spell a bit pattern",
        Scorer::MatchProdStr,
        params::parse_match_str,
    );
    catalog.parameterized(
        "MatchNumber",
        "Output matches a number bit by bit",
        Scorer::MatchNumber,
        params::parse_match_number,
    );
    catalog.parameterized(
        "AllOnes",
        "Set every low bit",
        Scorer::AllOnes,
        params::parse_all_ones,
    );
    catalog.parameterized(
        "RoyalRoad",
        "Complete all-ones blocks",
        Scorer::RoyalRoad,
        params::parse_royal_road,
    );
    catalog.parameterized(
        "RoyalRoadWithDitches",
        "Complete all-ones blocks from the lowest block up",
        Scorer::RoyalRoadWithDitches,
        params::parse_royal_road,
    );

    // Resources and environment
    catalog.parameterized(
        "ConsumeTarget",
        "Consume the target resource",
        Scorer::ConsumeTarget(TargetGate::Plain),
        params::parse_consume_target,
    );
    let gated = [
        ("ConsumeTargetEcho", TargetGate::Echo),
        ("ConsumeTargetNand", TargetGate::Logic(LogicOp::Nand)),
        ("ConsumeTargetAnd", TargetGate::Logic(LogicOp::And)),
        ("ConsumeTargetOrn", TargetGate::Logic(LogicOp::OrNot)),
        ("ConsumeTargetOr", TargetGate::Logic(LogicOp::Or)),
        ("ConsumeTargetAndn", TargetGate::Logic(LogicOp::AndNot)),
        ("ConsumeTargetNor", TargetGate::Logic(LogicOp::Nor)),
        ("ConsumeTargetXor", TargetGate::Logic(LogicOp::Xor)),
        ("ConsumeTargetEqu", TargetGate::Logic(LogicOp::Equ)),
    ];
    for (name, gate) in gated {
        catalog.parameterized(
            name,
            "Consume the target resource while performing a task",
            Scorer::ConsumeTarget(gate),
            params::parse_consume_target,
        );
    }
    catalog.parameterized(
        "Optimize",
        "Output close to an optimum",
        Scorer::Optimize,
        params::parse_optimize,
    );
    catalog.parameterized(
        "CollectOddCell",
        "Report the occupied cell, rewarded by parity",
        Scorer::CollectOddCell,
        params::parse_collect_odd_cell,
    );

    // Communication
    catalog.needing(
        "CommEcho",
        "Output a value a neighbor received",
        Scorer::CommEcho,
        Requirements::NEIGHBOR_INPUT,
    );
    catalog.needing(
        "CommNot",
        "Output the complement of a value a neighbor received",
        Scorer::CommNot,
        Requirements::NEIGHBOR_INPUT,
    );
    catalog.needing(
        "CommRelay",
        "Relay a neighbor's latest output",
        Scorer::CommRelay,
        Requirements::NEIGHBOR_OUTPUT,
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ignores_case_and_separators() {
        assert_eq!(normalize("MatchNumber"), "matchnumber");
        assert_eq!(normalize("match_number"), "matchnumber");
        assert_eq!(normalize("Match-Number "), "matchnumber");
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut keys: Vec<String> = entries().iter().map(|e| normalize(&e.name)).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_catalog_size() {
        // 8 basics, 9 logic, 68 three-input logic, 6 transcendental,
        // 56 formulas, 10 Fibonacci terms, 2 sequences, 6 matching,
        // 10 consume-target, 2 environment, 3 communication
        assert_eq!(entries().len(), 180);
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(lookup("logic_3AA").unwrap().name, "Logic3in_AA");
        assert_eq!(lookup("logic3in_cp").unwrap().name, "Logic3in_CP");
        assert_eq!(lookup("math_1AA").unwrap().name, "Math1in_AA");
        assert_eq!(lookup("math_2AAA").unwrap().name, "Math2in_AAA");
        assert!(lookup("logic_3CQ").is_none());
        assert!(lookup("UnknownFamily").is_none());
    }

    #[test]
    fn test_loader_kinds() {
        assert!(matches!(lookup("Echo").unwrap().loader, Loader::Fixed));
        assert!(matches!(
            lookup("MatchNumber").unwrap().loader,
            Loader::Parameterized(_)
        ));
        assert_eq!(
            lookup("CommRelay").unwrap().requirements,
            Requirements::NEIGHBOR_OUTPUT
        );
    }

    #[test]
    fn test_fibonacci_terms_are_contiguous() {
        for n in 1..=10 {
            let entry = lookup(&format!("Fib{n}")).unwrap();
            assert!(matches!(entry.scorer, Scorer::FibTerm(term) if term == n));
        }
        assert!(lookup("Fib11").is_none());
    }

    #[test]
    fn test_task_names_start_with_basics() {
        let names: Vec<&str> = task_names().take(3).collect();
        assert_eq!(names, vec!["DontCare", "Echo", "Add"]);
    }
}
