//! Run-length encoding of partition statuses.

use std::collections::BTreeMap;

use crate::types::{PartitionState, RunStatus, Span};

/// Compress a per-partition status sequence into maximal spans.
///
/// A single left-to-right scan opens a new span whenever the status changes.
/// The result covers every index exactly once and no two adjacent spans
/// share a status. An empty name list gives no spans.
pub fn to_spans<N, S, F>(partition_names: &[N], mut status_of: F) -> Vec<Span<S>>
where
    S: PartialEq,
    F: FnMut(&N, usize) -> S,
{
    let mut spans: Vec<Span<S>> = Vec::new();

    for (idx, name) in partition_names.iter().enumerate() {
        let status = status_of(name, idx);
        match spans.last_mut() {
            Some(last) if last.status == status => last.end_idx = idx,
            _ => spans.push(Span::new(idx, idx, status)),
        }
    }

    spans
}

/// Partition state shown for the latest run targeting a partition.
pub fn partition_state_for_run_status(status: RunStatus) -> PartitionState {
    match status {
        RunStatus::Canceled | RunStatus::Canceling | RunStatus::Failure => PartitionState::Failure,
        RunStatus::Started => PartitionState::Started,
        RunStatus::Success => PartitionState::Success,
        RunStatus::Queued => PartitionState::Queued,
        _ => PartitionState::Missing,
    }
}

/// Number of partitions in each state.
pub fn count_by_state(spans: &[Span<PartitionState>]) -> BTreeMap<PartitionState, usize> {
    let mut counts = BTreeMap::new();
    for span in spans {
        *counts.entry(span.status).or_insert(0) += span.len();
    }
    counts
}
