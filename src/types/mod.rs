//! Core types for the asset graph kernel.

pub mod asset_key;
pub mod definition;
pub mod run;
pub mod live_data;
pub mod partition;

pub use asset_key::{AssetKey, GraphId, GraphIdError};
pub use definition::{AssetDefinition, FreshnessPolicy};
pub use run::{
    FreshnessInfo, LatestRun, LatestRunInfo, Materialization, Observation, RunId, RunStatus,
};
pub use live_data::{LiveAssetSnapshot, LiveDataForNode};
pub use partition::{PartitionState, SelectionRange, Span};
