//! Live data merging.
//!
//! Joins live asset snapshots with latest-run info into one
//! [`LiveDataForNode`] per graph id. This is a pure projection: no caching,
//! no I/O, and missing sources simply leave fields empty.

use std::collections::{BTreeMap, HashMap};

use crate::types::{AssetKey, GraphId, LatestRunInfo, LiveAssetSnapshot, LiveDataForNode, RunStatus};

/// Merge snapshots with latest-run info, keyed by graph id.
///
/// Latest-run entries are matched by exact asset key; when several entries
/// share a key, the first one wins.
pub fn build_live_data(
    nodes: &[LiveAssetSnapshot],
    latest_info: &[LatestRunInfo],
) -> BTreeMap<GraphId, LiveDataForNode> {
    let mut info_by_key: HashMap<&AssetKey, &LatestRunInfo> = HashMap::new();
    for info in latest_info {
        info_by_key.entry(&info.asset_key).or_insert(info);
    }

    let live: BTreeMap<GraphId, LiveDataForNode> = nodes
        .iter()
        .map(|node| {
            let info = info_by_key.get(&node.asset_key).copied();
            (node.asset_key.graph_id(), build_live_data_for_node(node, info))
        })
        .collect();

    tracing::debug!(
        nodes = live.len(),
        latest_info = latest_info.len(),
        "merged live asset data"
    );

    live
}

/// Derive the live record for a single asset.
pub fn build_live_data_for_node(
    node: &LiveAssetSnapshot,
    latest_info: Option<&LatestRunInfo>,
) -> LiveDataForNode {
    let last_materialization = node.materializations.first().cloned();
    let latest_run = latest_info.and_then(|info| info.latest_run.as_ref());

    let produced_last_materialization = match (latest_run, &last_materialization) {
        (Some(run), Some(materialization)) => materialization.run_id == run.id,
        _ => false,
    };

    let run_which_failed_to_materialize = latest_run
        .filter(|run| run.status == RunStatus::Failure && !produced_last_materialization)
        .cloned();

    let last_materialization_run_status = latest_run
        .filter(|_| produced_last_materialization)
        .map(|run| run.status);

    LiveDataForNode {
        step_key: node.op_names.first().cloned().unwrap_or_default(),
        unstarted_run_ids: latest_info
            .and_then(|info| info.unstarted_run_ids.clone())
            .unwrap_or_default(),
        in_progress_run_ids: latest_info
            .and_then(|info| info.in_progress_run_ids.clone())
            .unwrap_or_default(),
        run_which_failed_to_materialize,
        last_materialization,
        last_materialization_run_status,
        freshness_policy: node.freshness_policy.clone(),
        freshness_info: node.freshness_info.clone(),
        last_observation: node.observations.first().cloned(),
        current_logical_version: node.current_logical_version.clone(),
        projected_logical_version: node.projected_logical_version.clone(),
    }
}
