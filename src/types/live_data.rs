//! Live status snapshots and the per-node record derived from them.

use serde::{Deserialize, Serialize};

use super::asset_key::AssetKey;
use super::definition::FreshnessPolicy;
use super::run::{FreshnessInfo, LatestRun, Materialization, Observation, RunId, RunStatus};

/// Runtime snapshot of one asset, as fetched by the live-status layer.
///
/// Materializations and observations are newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveAssetSnapshot {
    /// Asset this snapshot describes.
    pub asset_key: AssetKey,
    /// Ops computing the asset.
    #[serde(default)]
    pub op_names: Vec<String>,
    /// Recent materializations, newest first.
    #[serde(default)]
    pub materializations: Vec<Materialization>,
    /// Recent observations, newest first.
    #[serde(default)]
    pub observations: Vec<Observation>,
    /// Declared freshness policy.
    #[serde(default)]
    pub freshness_policy: Option<FreshnessPolicy>,
    /// Evaluated freshness.
    #[serde(default)]
    pub freshness_info: Option<FreshnessInfo>,
    /// Logical version of the stored data.
    #[serde(default)]
    pub current_logical_version: Option<String>,
    /// Logical version a fresh materialization would produce.
    #[serde(default)]
    pub projected_logical_version: Option<String>,
}

impl LiveAssetSnapshot {
    /// Empty snapshot for a key.
    pub fn new(asset_key: AssetKey) -> Self {
        Self {
            asset_key,
            op_names: Vec::new(),
            materializations: Vec::new(),
            observations: Vec::new(),
            freshness_policy: None,
            freshness_info: None,
            current_logical_version: None,
            projected_logical_version: None,
        }
    }
}

/// Per-node status merged from a live snapshot and latest-run info.
///
/// Rebuilt on every refresh; never persisted. Every optional field is `None`
/// when its source is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveDataForNode {
    /// First op computing the asset, or empty.
    pub step_key: String,
    /// Queued runs targeting the asset.
    pub unstarted_run_ids: Vec<RunId>,
    /// Executing runs targeting the asset.
    pub in_progress_run_ids: Vec<RunId>,
    /// Latest run, when it failed without producing the last materialization.
    pub run_which_failed_to_materialize: Option<LatestRun>,
    /// Newest materialization.
    pub last_materialization: Option<Materialization>,
    /// Status of the latest run, when it produced the last materialization.
    pub last_materialization_run_status: Option<RunStatus>,
    /// Declared freshness policy.
    pub freshness_policy: Option<FreshnessPolicy>,
    /// Evaluated freshness.
    pub freshness_info: Option<FreshnessInfo>,
    /// Newest observation.
    pub last_observation: Option<Observation>,
    /// Logical version of the stored data.
    pub current_logical_version: Option<String>,
    /// Logical version a fresh materialization would produce.
    pub projected_logical_version: Option<String>,
}

impl LiveDataForNode {
    /// Whether the stored data lags its projected logical version.
    pub fn is_stale(&self) -> bool {
        match (&self.current_logical_version, &self.projected_logical_version) {
            (Some(current), Some(projected)) => current != projected,
            (None, Some(_)) => true,
            _ => false,
        }
    }

    /// Whether any run targeting the asset is executing.
    pub fn is_running(&self) -> bool {
        !self.in_progress_run_ids.is_empty()
    }

    /// Whether any run targeting the asset is waiting to start.
    pub fn is_queued(&self) -> bool {
        !self.unstarted_run_ids.is_empty()
    }

    /// Whether the asset is past its freshness deadline.
    pub fn is_overdue(&self) -> bool {
        self.freshness_info
            .as_ref()
            .and_then(|info| info.current_minutes_late)
            .map_or(false, |late| late > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LiveDataForNode {
        LiveDataForNode {
            step_key: String::new(),
            unstarted_run_ids: Vec::new(),
            in_progress_run_ids: Vec::new(),
            run_which_failed_to_materialize: None,
            last_materialization: None,
            last_materialization_run_status: None,
            freshness_policy: None,
            freshness_info: None,
            last_observation: None,
            current_logical_version: None,
            projected_logical_version: None,
        }
    }

    #[test]
    fn test_is_stale() {
        let mut live = record();
        assert!(!live.is_stale());

        live.current_logical_version = Some("v1".to_string());
        assert!(!live.is_stale());

        live.projected_logical_version = Some("v1".to_string());
        assert!(!live.is_stale());

        live.projected_logical_version = Some("v2".to_string());
        assert!(live.is_stale());

        live.current_logical_version = None;
        assert!(live.is_stale());
    }

    #[test]
    fn test_run_flags() {
        let mut live = record();
        assert!(!live.is_running());
        assert!(!live.is_queued());

        live.in_progress_run_ids.push(RunId::new(uuid::Uuid::from_u128(1)));
        live.unstarted_run_ids.push(RunId::new(uuid::Uuid::from_u128(2)));
        assert!(live.is_running());
        assert!(live.is_queued());
    }

    #[test]
    fn test_is_overdue() {
        let mut live = record();
        assert!(!live.is_overdue());

        live.freshness_info = Some(FreshnessInfo {
            current_minutes_late: Some(0.0),
        });
        assert!(!live.is_overdue());

        live.freshness_info = Some(FreshnessInfo {
            current_minutes_late: Some(12.5),
        });
        assert!(live.is_overdue());
    }

    #[test]
    fn test_snapshot_deserialize_with_defaults() {
        let json = r#"{"asset_key":{"path":["orders"]}}"#;
        let snapshot: LiveAssetSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot, LiveAssetSnapshot::new(AssetKey::new(["orders"])));
    }
}
