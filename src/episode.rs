//! Owned episode record, as read from JSON.
//!
//! An [`Episode`] owns the buffers a [`TaskContext`] borrows, so a caller
//! that receives episode data over the wire can deserialize once and lend
//! contexts from it.

use serde::{Deserialize, Serialize};

use crate::task::{NeighborBuffers, TaskContext};

/// Everything observed about one agent during one scoring window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Inputs received, oldest first
    #[serde(default)]
    pub inputs: Vec<i32>,
    /// Outputs produced, oldest first; the last one is scored
    pub outputs: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbor_inputs: Option<NeighborBuffers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbor_outputs: Option<NeighborBuffers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_resource: Option<i32>,
}

impl Episode {
    /// The output being scored: the most recent one.
    pub fn output(&self) -> Option<i32> {
        self.outputs.last().copied()
    }

    /// Context borrowing this episode's buffers.
    ///
    /// `None` when the episode has produced no output yet.
    pub fn context(&self) -> Option<TaskContext<'_>> {
        let mut builder = TaskContext::builder(self.output()?)
            .inputs(&self.inputs)
            .output_history(&self.outputs);
        if let Some(buffers) = &self.neighbor_inputs {
            builder = builder.neighbor_inputs(buffers);
        }
        if let Some(buffers) = &self.neighbor_outputs {
            builder = builder.neighbor_outputs(buffers);
        }
        if let Some(cell) = self.cell_id {
            builder = builder.cell_id(cell);
        }
        if let Some(resource) = self.consumed_resource {
            builder = builder.consumed_resource(resource);
        }
        Some(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Requirements;

    #[test]
    fn test_episode_from_json() {
        let json = r#"{
            "inputs": [3, 4],
            "outputs": [1, 7],
            "neighbor_inputs": { "12": [5, 6] },
            "cell_id": 9
        }"#;
        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.output(), Some(7));
        assert_eq!(episode.neighbor_inputs.as_ref().unwrap()[&12], vec![5, 6]);

        let ctx = episode.context().unwrap();
        assert_eq!(ctx.inputs(), &[3, 4]);
        assert_eq!(ctx.output_history(), &[1, 7]);
        assert_eq!(ctx.cell_id(), Some(9));
        assert_eq!(ctx.consumed_resource(), None);
        assert!(ctx.provides(Requirements::NEIGHBOR_INPUT));
        assert!(!ctx.provides(Requirements::NEIGHBOR_OUTPUT));
    }

    #[test]
    fn test_episode_without_output_has_no_context() {
        let episode: Episode = serde_json::from_str(r#"{"outputs": []}"#).unwrap();
        assert!(episode.context().is_none());
    }

    #[test]
    fn test_episode_requires_outputs_field() {
        assert!(serde_json::from_str::<Episode>(r#"{"inputs": [1]}"#).is_err());
    }
}
