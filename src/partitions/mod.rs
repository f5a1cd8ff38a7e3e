//! Partition status compression and interactive range selection.
//!
//! ```text
//! partition names + status lookup → to_spans → Vec<Span>
//!                                        ↓
//!            pointer down/move/up → DragSelection → PartitionSelection
//! ```

pub mod spans;
pub mod selection;

pub use spans::{count_by_state, partition_state_for_run_status, to_spans};
pub use selection::{DragSelection, PartitionSelection, RangeToggle};
