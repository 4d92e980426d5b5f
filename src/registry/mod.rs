//! Task registry: registration, dispatch, aggregation.
//!
//! A [`TaskLib`] is configured once by registering task names (with optional
//! argument text) and is then evaluated many times, possibly from several
//! threads at once.
//!
//! # Invariants
//! - `entries[i].id() == i`
//! - `requirements()` is the union of every entry's requirements
//! - A failed registration leaves the registry unchanged

pub mod catalog;

use tracing::{debug, info, trace, warn};

use crate::task::{Requirements, TaskContext, TaskEntry, TaskError};
use catalog::Loader;

/// Ordered collection of registered tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskLib {
    entries: Vec<TaskEntry>,
    requirements: Requirements,
}

impl TaskLib {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task by name.
    ///
    /// Fixed-form tasks ignore `args`; parameterized families parse it and
    /// reject it with [`TaskError::InvalidTaskArgument`] when malformed.
    ///
    /// # Postcondition
    /// On success the new entry is last and its id is the previous `len()`.
    pub fn register(&mut self, name: &str, args: &str) -> Result<&TaskEntry, TaskError> {
        let Some(found) = catalog::lookup(name.trim()) else {
            return Err(TaskError::UnknownTaskName(name.to_string()));
        };

        let arguments = match found.loader {
            Loader::Fixed => {
                if !args.trim().is_empty() {
                    warn!(task = name, args, "Ignoring arguments for fixed-form task");
                }
                None
            }
            Loader::Parameterized(parse) => {
                Some(parse(args).map_err(|e| TaskError::invalid_argument(name, e))?)
            }
        };

        let id = self.entries.len();
        self.entries.push(TaskEntry::new(
            id,
            name,
            found.description.clone(),
            found.scorer,
            found.requirements,
            arguments,
        ));
        self.requirements = self
            .entries
            .iter()
            .fold(Requirements::empty(), |acc, e| acc | e.requirements());

        let entry = &self.entries[id];
        debug!(
            id,
            task = entry.name(),
            family = %found.name,
            requirements = ?entry.requirements(),
            "Registered task"
        );
        Ok(entry)
    }

    /// Register a batch of `(name, args)` pairs, stopping at the first error.
    ///
    /// Entries registered before the failing one stay registered.
    pub fn register_all<'d>(
        &mut self,
        directives: impl IntoIterator<Item = (&'d str, &'d str)>,
    ) -> Result<usize, TaskError> {
        let before = self.len();
        for (name, args) in directives {
            self.register(name, args)?;
        }
        info!(
            registered = self.len() - before,
            total = self.len(),
            neighbor_input = self.uses_neighbor_input(),
            neighbor_output = self.uses_neighbor_output(),
            "Task library configured"
        );
        Ok(self.len() - before)
    }

    /// Score one entry against a context.
    ///
    /// # Panics
    /// If the entry needs neighbor data the context does not carry. Callers
    /// gather that data according to [`TaskLib::requirements`] beforehand.
    pub fn evaluate(&self, entry: &TaskEntry, ctx: &TaskContext<'_>) -> f64 {
        assert!(
            ctx.provides(entry.requirements()),
            "task '{}' needs {:?} which the context does not provide",
            entry.name(),
            entry.requirements()
        );
        let bound = ctx.with_entry(entry);
        let reward = entry.scorer().score(&bound);
        trace!(id = entry.id(), task = entry.name(), reward, "Evaluated task");
        reward
    }

    /// Score every entry, in registration order.
    ///
    /// # Panics
    /// Same as [`TaskLib::evaluate`].
    pub fn evaluate_all(&self, ctx: &TaskContext<'_>) -> Vec<f64> {
        self.entries.iter().map(|e| self.evaluate(e, ctx)).collect()
    }

    /// Union of the neighbor data every registered task needs.
    pub fn requirements(&self) -> Requirements {
        self.requirements
    }

    pub fn uses_neighbor_input(&self) -> bool {
        self.requirements.needs_neighbor_input()
    }

    pub fn uses_neighbor_output(&self) -> bool {
        self.requirements.needs_neighbor_output()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&TaskEntry> {
        self.entries.get(id)
    }

    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TaskLib {
    type Item = &'a TaskEntry;
    type IntoIter = std::slice::Iter<'a, TaskEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{ArgError, NeighborBuffers};

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut lib = TaskLib::new();
        assert!(lib.is_empty());
        assert_eq!(lib.register("Echo", "").unwrap().id(), 0);
        assert_eq!(lib.register("Not", "").unwrap().id(), 1);
        assert_eq!(lib.register("Echo", "").unwrap().id(), 2);
        assert_eq!(lib.len(), 3);
    }

    #[test]
    fn test_register_keeps_display_name() {
        let mut lib = TaskLib::new();
        let entry = lib.register("match_number", "7").unwrap();
        assert_eq!(entry.name(), "match_number");
        assert!(entry.arguments().is_some());
    }

    #[test]
    fn test_unknown_name_leaves_registry_unchanged() {
        let mut lib = TaskLib::new();
        lib.register("Echo", "").unwrap();
        let err = lib.register("UnknownFamily", "").unwrap_err();
        assert_eq!(err, TaskError::UnknownTaskName("UnknownFamily".to_string()));
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn test_invalid_argument_leaves_registry_unchanged() {
        let mut lib = TaskLib::new();
        let err = lib.register("MatchNumber", "forty-two").unwrap_err();
        assert!(matches!(
            err,
            TaskError::InvalidTaskArgument {
                source: ArgError::NotNumeric { .. },
                ..
            }
        ));
        assert!(lib.is_empty());
        assert_eq!(lib.requirements(), Requirements::empty());
    }

    #[test]
    fn test_fixed_task_ignores_arguments() {
        let mut lib = TaskLib::new();
        let entry = lib.register("Echo", "size=3").unwrap();
        assert!(entry.arguments().is_none());
    }

    #[test]
    fn test_requirements_fold() {
        let mut lib = TaskLib::new();
        lib.register("Echo", "").unwrap();
        assert!(!lib.uses_neighbor_input());
        lib.register("CommEcho", "").unwrap();
        assert!(lib.uses_neighbor_input());
        assert!(!lib.uses_neighbor_output());
        lib.register("CommRelay", "").unwrap();
        assert_eq!(
            lib.requirements(),
            Requirements::NEIGHBOR_INPUT | Requirements::NEIGHBOR_OUTPUT
        );
    }

    #[test]
    fn test_evaluate_all_in_registration_order() {
        let mut lib = TaskLib::new();
        lib.register_all([("Echo", ""), ("Not", ""), ("Add", "")])
            .unwrap();
        let inputs = [2, 5];
        let ctx = TaskContext::builder(7).inputs(&inputs).build();
        assert_eq!(lib.evaluate_all(&ctx), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_register_all_stops_at_first_error() {
        let mut lib = TaskLib::new();
        let result = lib.register_all([("Echo", ""), ("Bogus", ""), ("Not", "")]);
        assert!(result.is_err());
        assert_eq!(lib.len(), 1);
    }

    #[test]
    #[should_panic(expected = "CommEcho")]
    fn test_evaluate_panics_without_neighbor_data() {
        let mut lib = TaskLib::new();
        lib.register("CommEcho", "").unwrap();
        let ctx = TaskContext::builder(0).build();
        lib.evaluate_all(&ctx);
    }

    #[test]
    fn test_evaluate_with_neighbor_data() {
        let mut lib = TaskLib::new();
        lib.register("CommEcho", "").unwrap();
        let neighbors: NeighborBuffers = [(1, vec![4])].into_iter().collect();
        let ctx = TaskContext::builder(4).neighbor_inputs(&neighbors).build();
        assert_eq!(lib.evaluate_all(&ctx), vec![1.0]);
    }
}
