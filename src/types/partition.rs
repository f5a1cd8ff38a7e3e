//! Partition status types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single partition.
///
/// The `*_missing` variants mark multi-dimensional partitions where only
/// some of the inner partitions are in the outer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionState {
    /// Never materialized.
    Missing,
    /// Materialized successfully.
    Success,
    /// Partly materialized, rest missing.
    SuccessMissing,
    /// Last run failed.
    Failure,
    /// Partly failed, rest missing.
    FailureMissing,
    /// Waiting for a run.
    Queued,
    /// Being materialized.
    Started,
}

impl Default for PartitionState {
    fn default() -> Self {
        Self::Missing
    }
}

impl fmt::Display for PartitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Success => write!(f, "success"),
            Self::SuccessMissing => write!(f, "success_missing"),
            Self::Failure => write!(f, "failure"),
            Self::FailureMissing => write!(f, "failure_missing"),
            Self::Queued => write!(f, "queued"),
            Self::Started => write!(f, "started"),
        }
    }
}

/// Maximal run of consecutive partitions sharing one status.
///
/// `start_idx` and `end_idx` are inclusive indexes into the partition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<S = PartitionState> {
    /// First index covered.
    pub start_idx: usize,
    /// Last index covered.
    pub end_idx: usize,
    /// Shared status.
    pub status: S,
}

impl<S> Span<S> {
    /// Create a span.
    pub fn new(start_idx: usize, end_idx: usize, status: S) -> Self {
        Self {
            start_idx,
            end_idx,
            status,
        }
    }

    /// Number of partitions covered.
    pub fn len(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    /// Spans always cover at least one partition.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `idx` falls inside this span.
    pub fn contains(&self, idx: usize) -> bool {
        (self.start_idx..=self.end_idx).contains(&idx)
    }
}

/// In-progress drag selection, by partition name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Partition under the pointer when the drag began.
    pub start: String,
    /// Partition currently under the pointer.
    pub end: String,
}

impl SelectionRange {
    /// Range covering a single partition.
    pub fn at(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            start: name.clone(),
            end: name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_missing() {
        assert_eq!(PartitionState::default(), PartitionState::Missing);
    }

    #[test]
    fn test_state_display_matches_serde() {
        for state in [
            PartitionState::Missing,
            PartitionState::SuccessMissing,
            PartitionState::FailureMissing,
            PartitionState::Started,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }

    #[test]
    fn test_span_bounds_are_inclusive() {
        let span = Span::new(3, 5, PartitionState::Success);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert!(span.contains(3));
        assert!(span.contains(5));
        assert!(!span.contains(6));
        assert!(!span.contains(2));
    }

    #[test]
    fn test_selection_range_at() {
        let range = SelectionRange::at("2023-01-01");
        assert_eq!(range.start, "2023-01-01");
        assert_eq!(range.end, "2023-01-01");
    }
}
