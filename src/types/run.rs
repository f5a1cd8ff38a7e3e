//! Run, materialization and observation snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::asset_key::AssetKey;

/// Unique identifier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new RunId from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a RunId from a UUID string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RunId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Lifecycle status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Waiting in the run queue.
    Queued,
    /// Created but not yet submitted.
    NotStarted,
    /// Managed by an external system.
    Managed,
    /// Launching.
    Starting,
    /// Executing.
    Started,
    /// Finished successfully.
    Success,
    /// Finished with a failure.
    Failure,
    /// Cancellation requested.
    Canceling,
    /// Cancelled.
    Canceled,
}

impl RunStatus {
    /// Whether the run has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Canceled)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "QUEUED",
            Self::NotStarted => "NOT_STARTED",
            Self::Managed => "MANAGED",
            Self::Starting => "STARTING",
            Self::Started => "STARTED",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Canceling => "CANCELING",
            Self::Canceled => "CANCELED",
        };
        write!(f, "{}", s)
    }
}

/// A run as referenced from latest-run info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestRun {
    /// Run id.
    pub id: RunId,
    /// Current status.
    pub status: RunStatus,
}

impl LatestRun {
    /// Create a new run reference.
    pub fn new(id: RunId, status: RunStatus) -> Self {
        Self { id, status }
    }
}

/// Latest run bookkeeping for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestRunInfo {
    /// Asset this entry describes.
    pub asset_key: AssetKey,
    /// Most recent run targeting the asset.
    #[serde(default)]
    pub latest_run: Option<LatestRun>,
    /// Runs targeting the asset that have not started.
    #[serde(default)]
    pub unstarted_run_ids: Option<Vec<RunId>>,
    /// Runs targeting the asset that are executing.
    #[serde(default)]
    pub in_progress_run_ids: Option<Vec<RunId>>,
}

impl LatestRunInfo {
    /// Entry with no run information.
    pub fn new(asset_key: AssetKey) -> Self {
        Self {
            asset_key,
            latest_run: None,
            unstarted_run_ids: None,
            in_progress_run_ids: None,
        }
    }

    /// Set the latest run.
    pub fn with_latest_run(mut self, run: LatestRun) -> Self {
        self.latest_run = Some(run);
        self
    }
}

/// A recorded production of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materialization {
    /// Run that produced it.
    pub run_id: RunId,
    /// When it was recorded.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Partition materialized, for partitioned assets.
    #[serde(default)]
    pub partition: Option<String>,
}

/// A recorded inspection of an asset without producing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Run that observed it.
    pub run_id: RunId,
    /// When it was recorded.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Observed logical version, if reported.
    #[serde(default)]
    pub logical_version: Option<String>,
}

/// Freshness evaluation reported for an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessInfo {
    /// Minutes past the policy's allowed lag, if known.
    #[serde(default)]
    pub current_minutes_late: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_parse_and_display() {
        let id = RunId::parse("6f1c2a0e-3b7d-4c55-9a1e-0d2f4b6c8e10").unwrap();
        assert_eq!(id.to_string(), "6f1c2a0e-3b7d-4c55-9a1e-0d2f4b6c8e10");
        assert_eq!(RunId::from(id.as_uuid()), id);
        assert!(RunId::parse("not-a-run").is_err());
    }

    #[test]
    fn test_run_status_wire_format() {
        let json = serde_json::to_string(&RunStatus::NotStarted).unwrap();
        assert_eq!(json, r#""NOT_STARTED""#);
        assert_eq!(RunStatus::NotStarted.to_string(), "NOT_STARTED");

        let parsed: RunStatus = serde_json::from_str(r#""CANCELING""#).unwrap();
        assert_eq!(parsed, RunStatus::Canceling);
    }

    #[test]
    fn test_run_status_is_finished() {
        assert!(RunStatus::Success.is_finished());
        assert!(RunStatus::Failure.is_finished());
        assert!(RunStatus::Canceled.is_finished());
        assert!(!RunStatus::Canceling.is_finished());
        assert!(!RunStatus::Queued.is_finished());
    }

    #[test]
    fn test_latest_run_info_missing_fields() {
        let json = r#"{"asset_key":{"path":["orders"]}}"#;
        let info: LatestRunInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info, LatestRunInfo::new(AssetKey::new(["orders"])));
        assert!(info.unstarted_run_ids.is_none());
    }

    #[test]
    fn test_materialization_timestamp_millis() {
        let json = r#"{"run_id":"6f1c2a0e-3b7d-4c55-9a1e-0d2f4b6c8e10","timestamp":1672531200000}"#;
        let materialization: Materialization = serde_json::from_str(json).unwrap();
        assert_eq!(materialization.timestamp.timestamp(), 1_672_531_200);
        assert_eq!(materialization.partition, None);
    }
}
