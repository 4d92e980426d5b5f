//! Registered task descriptor.
//!
//! # Invariants
//! - Entries are created only by the registry and never mutated afterwards
//! - `id` equals the entry's position in the registry

use serde::Serialize;

use super::params::TaskArgs;
use crate::scoring::Scorer;

bitflags::bitflags! {
    /// Extra per-episode data a task needs before it can be scored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Requirements: u8 {
        /// Neighboring agents' input buffers
        const NEIGHBOR_INPUT = 1 << 0;
        /// Neighboring agents' output buffers
        const NEIGHBOR_OUTPUT = 1 << 1;
    }
}

impl Requirements {
    pub fn needs_neighbor_input(&self) -> bool {
        self.contains(Requirements::NEIGHBOR_INPUT)
    }

    pub fn needs_neighbor_output(&self) -> bool {
        self.contains(Requirements::NEIGHBOR_OUTPUT)
    }
}

impl Serialize for Requirements {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Requirements", 2)?;
        state.serialize_field("needs_neighbor_input", &self.needs_neighbor_input())?;
        state.serialize_field("needs_neighbor_output", &self.needs_neighbor_output())?;
        state.end()
    }
}

/// One registered task: what it is called, how it is scored, what it needs.
///
/// Display names are not unique; registering the same name twice yields two
/// independent entries.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    id: usize,
    name: String,
    description: String,
    scorer: Scorer,
    requirements: Requirements,
    arguments: Option<TaskArgs>,
}

impl TaskEntry {
    pub(crate) fn new(
        id: usize,
        name: impl Into<String>,
        description: impl Into<String>,
        scorer: Scorer,
        requirements: Requirements,
        arguments: Option<TaskArgs>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            scorer,
            requirements,
            arguments,
        }
    }

    /// Position of this entry in registration order.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scorer(&self) -> Scorer {
        self.scorer
    }

    pub fn requirements(&self) -> Requirements {
        self.requirements
    }

    /// Parsed parameter block; `None` for fixed-form tasks.
    pub fn arguments(&self) -> Option<&TaskArgs> {
        self.arguments.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_union() {
        let both = Requirements::NEIGHBOR_INPUT | Requirements::NEIGHBOR_OUTPUT;
        assert!(both.needs_neighbor_input());
        assert!(both.needs_neighbor_output());
        assert!(!Requirements::empty().needs_neighbor_input());
        assert!(!Requirements::NEIGHBOR_INPUT.needs_neighbor_output());
    }

    #[test]
    fn test_requirements_serialize_as_flags() {
        let json = serde_json::to_value(Requirements::NEIGHBOR_OUTPUT).unwrap();
        assert_eq!(json["needs_neighbor_input"], false);
        assert_eq!(json["needs_neighbor_output"], true);
    }
}
