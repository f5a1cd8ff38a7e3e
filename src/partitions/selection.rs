//! Drag-to-select over a partition strip.
//!
//! A drag opens a [`DragSelection`] that mutably borrows the selection for
//! as long as the pointer is held. Pointer moves update the range end;
//! [`DragSelection::finish`] applies the range. Dropping the guard without
//! finishing discards the drag and leaves the selection untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::spans::to_spans;
use crate::types::{SelectionRange, Span};

/// Outcome of applying a dragged range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeToggle {
    /// Every partition in the range was added.
    Selected,
    /// The whole range was already selected and was removed.
    Deselected,
}

/// Set of selected partition names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSelection {
    selected: BTreeSet<String>,
}

impl PartitionSelection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection pre-populated with names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a partition is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Number of selected partitions.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected names in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected.iter().map(String::as_str)
    }

    /// Toggle the closed index interval between `a` and `b`.
    ///
    /// If every partition in the interval is already selected they are all
    /// removed; otherwise they are all added. Indexes past the end of
    /// `partition_names` are clamped.
    pub fn apply_range(&mut self, partition_names: &[String], a: usize, b: usize) -> RangeToggle {
        let Some(last) = partition_names.len().checked_sub(1) else {
            return RangeToggle::Selected;
        };
        let (lo, hi) = (a.min(b).min(last), a.max(b).min(last));
        let range = &partition_names[lo..=hi];

        if range.iter().all(|name| self.selected.contains(name)) {
            for name in range {
                self.selected.remove(name);
            }
            RangeToggle::Deselected
        } else {
            self.selected.extend(range.iter().cloned());
            RangeToggle::Selected
        }
    }

    /// Start a drag at partition index `idx`.
    ///
    /// Returns `None` when `idx` is not a valid partition index.
    pub fn begin_drag<'a>(
        &'a mut self,
        partition_names: &'a [String],
        idx: usize,
    ) -> Option<DragSelection<'a>> {
        let name = partition_names.get(idx)?;
        Some(DragSelection {
            selection: self,
            partition_names,
            range: SelectionRange::at(name.as_str()),
            start_idx: idx,
            end_idx: idx,
        })
    }

    /// Selected partitions as runs over `partition_names`.
    pub fn ranges(&self, partition_names: &[String]) -> Vec<Span<bool>> {
        to_spans(partition_names, |name, _| self.selected.contains(name))
            .into_iter()
            .filter(|span| span.status)
            .collect()
    }
}

/// An active drag over the partition strip.
#[derive(Debug)]
pub struct DragSelection<'a> {
    selection: &'a mut PartitionSelection,
    partition_names: &'a [String],
    range: SelectionRange,
    start_idx: usize,
    end_idx: usize,
}

impl<'a> DragSelection<'a> {
    /// Current range, by partition name.
    pub fn range(&self) -> &SelectionRange {
        &self.range
    }

    /// Pointer moved to partition `idx`, or off the strip when `None`.
    ///
    /// Indexes past the end clamp to the last partition; leaving the strip
    /// keeps the last known end.
    pub fn pointer_move(&mut self, idx: Option<usize>) {
        let Some(idx) = idx else {
            return;
        };
        let idx = idx.min(self.partition_names.len() - 1);
        self.end_idx = idx;
        self.range.end = self.partition_names[idx].clone();
    }

    /// Pointer released: apply the dragged range to the selection.
    pub fn finish(self) -> RangeToggle {
        let toggle = self
            .selection
            .apply_range(self.partition_names, self.start_idx, self.end_idx);
        tracing::trace!(
            start = %self.range.start,
            end = %self.range.end,
            ?toggle,
            "applied partition drag selection"
        );
        toggle
    }
}
