//! Per-episode view handed to scoring routines.
//!
//! # Invariants
//! - A context is immutable once built; scoring routines only read it
//! - `logic_id` is derived once, at build time, from `inputs` and `output`
//! - Buffers are ordered oldest first
//!
//! The context borrows every buffer from the caller, so building one per
//! evaluation costs nothing beyond the logic id derivation.

use std::collections::BTreeMap;

use super::entry::{Requirements, TaskEntry};
use super::params::TaskArgs;

/// Identity of a neighboring agent.
pub type NeighborId = u64;

/// Neighbor identity to that neighbor's buffer (oldest first).
pub type NeighborBuffers = BTreeMap<NeighborId, Vec<i32>>;

/// Number of most recent inputs the logic id is derived from.
pub const LOGIC_INPUTS: usize = 3;

/// Read-only data for one scoring call.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext<'a> {
    inputs: &'a [i32],
    output: i32,
    output_history: &'a [i32],
    neighbor_inputs: Option<&'a NeighborBuffers>,
    neighbor_outputs: Option<&'a NeighborBuffers>,
    cell_id: Option<i32>,
    consumed_resource: Option<i32>,
    logic_id: Option<u8>,
    entry: Option<&'a TaskEntry>,
}

impl<'a> TaskContext<'a> {
    /// Start building a context around the output being scored.
    pub fn builder(output: i32) -> ContextBuilder<'a> {
        ContextBuilder {
            inputs: &[],
            output,
            output_history: &[],
            neighbor_inputs: None,
            neighbor_outputs: None,
            cell_id: None,
            consumed_resource: None,
        }
    }

    /// Copy of this context bound to the entry being scored.
    pub fn with_entry<'b>(&self, entry: &'b TaskEntry) -> TaskContext<'b>
    where
        'a: 'b,
    {
        let base: TaskContext<'b> = *self;
        TaskContext {
            entry: Some(entry),
            ..base
        }
    }

    /// Inputs received in the current window, oldest first.
    pub fn inputs(&self) -> &'a [i32] {
        self.inputs
    }

    /// Most recently received input.
    pub fn latest_input(&self) -> Option<i32> {
        self.inputs.last().copied()
    }

    pub fn output(&self) -> i32 {
        self.output
    }

    /// Every output produced so far, oldest first.
    pub fn output_history(&self) -> &'a [i32] {
        self.output_history
    }

    pub fn neighbor_inputs(&self) -> Option<&'a NeighborBuffers> {
        self.neighbor_inputs
    }

    pub fn neighbor_outputs(&self) -> Option<&'a NeighborBuffers> {
        self.neighbor_outputs
    }

    pub fn cell_id(&self) -> Option<i32> {
        self.cell_id
    }

    /// Resource the agent consumed during this episode, if any.
    pub fn consumed_resource(&self) -> Option<i32> {
        self.consumed_resource
    }

    /// Truth table relating the last three inputs to the output.
    ///
    /// `None` when the output is not a consistent bitwise function of the
    /// inputs, or when some input combination never occurs.
    pub fn logic_id(&self) -> Option<u8> {
        self.logic_id
    }

    /// Entry currently being scored.
    pub fn entry(&self) -> Option<&'a TaskEntry> {
        self.entry
    }

    /// Parsed arguments of the entry currently being scored.
    pub fn arguments(&self) -> Option<&'a TaskArgs> {
        self.entry.and_then(|e| e.arguments())
    }

    /// Whether this context carries the neighbor data `requirements` ask for.
    pub fn provides(&self, requirements: Requirements) -> bool {
        (!requirements.needs_neighbor_input() || self.neighbor_inputs.is_some())
            && (!requirements.needs_neighbor_output() || self.neighbor_outputs.is_some())
    }
}

/// Builder for [`TaskContext`].
#[derive(Debug, Clone)]
pub struct ContextBuilder<'a> {
    inputs: &'a [i32],
    output: i32,
    output_history: &'a [i32],
    neighbor_inputs: Option<&'a NeighborBuffers>,
    neighbor_outputs: Option<&'a NeighborBuffers>,
    cell_id: Option<i32>,
    consumed_resource: Option<i32>,
}

impl<'a> ContextBuilder<'a> {
    pub fn inputs(mut self, inputs: &'a [i32]) -> Self {
        self.inputs = inputs;
        self
    }

    /// Output history, oldest first; expected to end with the current output.
    pub fn output_history(mut self, history: &'a [i32]) -> Self {
        self.output_history = history;
        self
    }

    pub fn neighbor_inputs(mut self, buffers: &'a NeighborBuffers) -> Self {
        self.neighbor_inputs = Some(buffers);
        self
    }

    pub fn neighbor_outputs(mut self, buffers: &'a NeighborBuffers) -> Self {
        self.neighbor_outputs = Some(buffers);
        self
    }

    pub fn cell_id(mut self, cell_id: i32) -> Self {
        self.cell_id = Some(cell_id);
        self
    }

    pub fn consumed_resource(mut self, resource: i32) -> Self {
        self.consumed_resource = Some(resource);
        self
    }

    pub fn build(self) -> TaskContext<'a> {
        TaskContext {
            inputs: self.inputs,
            output: self.output,
            output_history: self.output_history,
            neighbor_inputs: self.neighbor_inputs,
            neighbor_outputs: self.neighbor_outputs,
            cell_id: self.cell_id,
            consumed_resource: self.consumed_resource,
            logic_id: derive_logic_id(self.inputs, self.output),
            entry: None,
        }
    }
}

/// Derive the 8-bit truth table of `output` as a function of the three most
/// recent inputs.
///
/// Table index `a | b << 1 | c << 2` (A = most recent input) holds the output
/// bit. Every one of the 32 bit positions contributes one observation.
/// Missing inputs are don't-care: the table is mirrored across them.
///
/// # Pure Function
pub fn derive_logic_id(inputs: &[i32], output: i32) -> Option<u8> {
    let available = inputs.len().min(LOGIC_INPUTS);
    let mut operands = [0u32; LOGIC_INPUTS];
    for (slot, value) in inputs.iter().rev().take(LOGIC_INPUTS).enumerate() {
        operands[slot] = *value as u32;
    }
    let output = output as u32;

    let mut table: [Option<bool>; 8] = [None; 8];
    for bit in 0..32 {
        let index = operands
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, v)| acc | ((((v >> bit) & 1) as usize) << i));
        let out = (output >> bit) & 1 == 1;
        match table[index] {
            Some(seen) if seen != out => return None,
            _ => table[index] = Some(out),
        }
    }

    // Mirror the table across variables that were never supplied.
    for var in available..LOGIC_INPUTS {
        let stride = 1 << var;
        for index in 0..8 {
            if index & stride != 0 {
                table[index] = table[index & !stride];
            }
        }
    }

    table
        .iter()
        .enumerate()
        .try_fold(0u8, |id, (i, bit)| bit.map(|b| id | (u8::from(b) << i)))
}
