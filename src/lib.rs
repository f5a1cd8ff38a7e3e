//! # asset-graph-kernel
//!
//! In-memory asset dependency graphs for data platforms.
//!
//! The kernel answers questions about already-fetched snapshots:
//!
//! > Which assets depend on which, is the graph sound, what is each asset's
//! > current status, and which partitions are in which state?
//!
//! ## Core Contract
//!
//! 1. Build a symmetric upstream/downstream graph from flat asset definitions
//! 2. Detect dependency cycles before any layout or traversal
//! 3. Merge live run/materialization snapshots into per-node status records
//! 4. Answer range queries for shift-click selection over the graph
//! 5. Run-length encode partition statuses and manage drag selection
//!
//! ## Architecture
//!
//! ```text
//! AssetDefinition[] → build_graph_data → GraphData → graph_has_cycles
//!                                           ↓
//!                       direction_between / ops_in_range / GraphFingerprint
//!
//! LiveAssetSnapshot[] + LatestRunInfo[] → build_live_data → GraphId → LiveDataForNode
//!
//! partition names + status → to_spans → Span[] ; DragSelection → PartitionSelection
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Every operation is a pure function of its inputs
//! - Graph indexes are ordered by GraphId
//! - Graph ids are the compact JSON encoding of the asset key path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod canonical;
pub mod graph;
pub mod cycles;
pub mod live;
pub mod topology;
pub mod partitions;
pub mod snapshot;

// Re-exports
pub use types::{
    AssetDefinition, AssetKey, FreshnessInfo, FreshnessPolicy, GraphId, GraphIdError, LatestRun,
    LatestRunInfo, LiveAssetSnapshot, LiveDataForNode, Materialization, Observation,
    PartitionState, RunId, RunStatus, SelectionRange, Span,
};
pub use canonical::{canonical_hash, canonical_hash_hex, encode_path, to_canonical_bytes};
pub use graph::{build_graph_data, GraphData, GraphError, GraphNode};
pub use cycles::{ensure_acyclic, graph_has_cycles};
pub use live::{build_live_data, build_live_data_for_node};
pub use topology::{direction_between, ops_in_range, GraphDirection};
pub use partitions::{
    count_by_state, partition_state_for_run_status, to_spans, DragSelection,
    PartitionSelection, RangeToggle,
};
pub use snapshot::GraphFingerprint;

/// Schema version for all asset graph types.
/// Increment on breaking changes to any schema type.
pub const GRAPH_KERNEL_SCHEMA_VERSION: &str = "1.0.0";
