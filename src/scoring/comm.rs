//! Communication tasks, scored against neighboring agents' buffers.
//!
//! A missing neighbor map scores nothing here; the registry refuses to
//! evaluate these tasks without the data in the first place.

use crate::task::reward::all_or_nothing;
use crate::task::{NeighborBuffers, TaskContext};

fn any_value(buffers: Option<&NeighborBuffers>, pred: impl Fn(i32) -> bool) -> bool {
    buffers.is_some_and(|map| map.values().flatten().any(|v| pred(*v)))
}

/// Output repeats some value a neighbor received.
pub(crate) fn comm_echo(ctx: &TaskContext<'_>) -> f64 {
    all_or_nothing(any_value(ctx.neighbor_inputs(), |v| v == ctx.output()))
}

/// Output is the complement of some value a neighbor received.
pub(crate) fn comm_not(ctx: &TaskContext<'_>) -> f64 {
    all_or_nothing(any_value(ctx.neighbor_inputs(), |v| !v == ctx.output()))
}

/// Output relays the most recent output of some neighbor.
pub(crate) fn comm_relay(ctx: &TaskContext<'_>) -> f64 {
    let relayed = ctx.neighbor_outputs().is_some_and(|map| {
        map.values()
            .filter_map(|buffer| buffer.last())
            .any(|v| *v == ctx.output())
    });
    all_or_nothing(relayed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffers(entries: &[(u64, &[i32])]) -> NeighborBuffers {
        entries
            .iter()
            .map(|(id, values)| (*id, values.to_vec()))
            .collect()
    }

    #[test]
    fn test_comm_echo_and_not() {
        let neighbors = buffers(&[(1, &[4, 5]), (2, &[9])]);
        let echo = TaskContext::builder(9).neighbor_inputs(&neighbors).build();
        let not = TaskContext::builder(!5).neighbor_inputs(&neighbors).build();
        assert_eq!(comm_echo(&echo), 1.0);
        assert_eq!(comm_not(&echo), 0.0);
        assert_eq!(comm_not(&not), 1.0);
    }

    #[test]
    fn test_comm_relay_uses_latest_neighbor_output() {
        let neighbors = buffers(&[(7, &[1, 2, 3]), (8, &[])]);
        let latest = TaskContext::builder(3).neighbor_outputs(&neighbors).build();
        let stale = TaskContext::builder(1).neighbor_outputs(&neighbors).build();
        assert_eq!(comm_relay(&latest), 1.0);
        assert_eq!(comm_relay(&stale), 0.0);
    }

    #[test]
    fn test_comm_without_neighbors_scores_zero() {
        let ctx = TaskContext::builder(0).build();
        assert_eq!(comm_echo(&ctx), 0.0);
        assert_eq!(comm_relay(&ctx), 0.0);
    }
}
