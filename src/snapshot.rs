//! Graph fingerprints.
//!
//! A [`GraphFingerprint`] identifies the topology of a built graph so that
//! callers can tell whether a derived result (layout, live merge, selection)
//! was computed against the graph they currently hold. Refreshes are full
//! recomputations; comparing fingerprints is how a caller discards stale
//! results.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::graph::GraphData;
use crate::GRAPH_KERNEL_SCHEMA_VERSION;

/// A deterministic fingerprint of graph topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFingerprint {
    /// xxh64 over all components below.
    pub fingerprint: String,
    /// Number of loaded nodes.
    pub node_count: u64,
    /// Number of edges in the downstream index.
    pub edge_count: u64,
    /// Schema version used for types.
    pub schema_version: String,
    /// Hash of sorted node ids.
    pub node_id_hash: String,
    /// Hash of sorted (upstream, downstream) pairs.
    pub edge_pair_hash: String,
}

/// Internal struct for computing the fingerprint hash.
#[derive(Serialize)]
struct FingerprintInput<'a> {
    node_count: u64,
    edge_count: u64,
    schema_version: &'a str,
    node_id_hash: &'a str,
    edge_pair_hash: &'a str,
}

impl GraphFingerprint {
    /// Compute the fingerprint of a graph.
    ///
    /// Node definitions are not hashed; only ids and edges are.
    pub fn compute(graph: &GraphData) -> Self {
        // BTreeMap keys are already sorted
        let node_ids: Vec<&str> = graph.nodes.keys().map(|id| id.as_str()).collect();
        let node_id_hash = canonical_hash_hex(&node_ids);

        let edge_pairs: Vec<(&str, &str)> = graph
            .edges()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect();
        let edge_pair_hash = canonical_hash_hex(&edge_pairs);

        let node_count = node_ids.len() as u64;
        let edge_count = edge_pairs.len() as u64;

        let fingerprint = canonical_hash_hex(&FingerprintInput {
            node_count,
            edge_count,
            schema_version: GRAPH_KERNEL_SCHEMA_VERSION,
            node_id_hash: &node_id_hash,
            edge_pair_hash: &edge_pair_hash,
        });

        Self {
            fingerprint,
            node_count,
            edge_count,
            schema_version: GRAPH_KERNEL_SCHEMA_VERSION.to_string(),
            node_id_hash,
            edge_pair_hash,
        }
    }

    /// Whether this fingerprint still describes `graph`.
    pub fn matches(&self, graph: &GraphData) -> bool {
        self.fingerprint == Self::compute(graph).fingerprint
    }
}
