//! Asset dependency graph.
//!
//! Edges are kept as a symmetric pair of indexes: `downstream[u]` contains
//! `d` iff `upstream[d]` contains `u`. Index keys and values may reference
//! ids with no entry in `nodes` (assets outside the loaded set); traversal
//! treats those as terminal.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{AssetDefinition, AssetKey, GraphId, GraphIdError};

/// Error type for graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The dependency graph contains a cycle; op ordering is undefined.
    #[error("Asset graph contains a cycle ({node_count} nodes loaded)")]
    CycleDetected {
        /// Number of nodes in the graph that was checked.
        node_count: usize,
    },
    /// A graph id could not be decoded.
    #[error(transparent)]
    InvalidGraphId(#[from] GraphIdError),
}

/// A node in the asset graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Canonical id.
    pub id: GraphId,
    /// Asset key.
    pub asset_key: AssetKey,
    /// Source definition.
    pub definition: AssetDefinition,
}

impl GraphNode {
    /// Wrap a definition.
    pub fn new(definition: AssetDefinition) -> Self {
        Self {
            id: definition.graph_id(),
            asset_key: definition.asset_key.clone(),
            definition,
        }
    }

    /// Ops computing this asset.
    pub fn op_names(&self) -> &[String] {
        &self.definition.op_names
    }
}

/// Adjacency-map graph of assets.
///
/// Uses BTreeMap/BTreeSet for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Nodes by id.
    pub nodes: BTreeMap<GraphId, GraphNode>,
    /// Upstream id -> downstream ids.
    pub downstream: BTreeMap<GraphId, BTreeSet<GraphId>>,
    /// Downstream id -> upstream ids.
    pub upstream: BTreeMap<GraphId, BTreeSet<GraphId>>,
}

impl GraphData {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge into both indexes. Returns false for self-edges,
    /// which are never stored.
    fn add_edge(&mut self, upstream: GraphId, downstream: GraphId) -> bool {
        if upstream == downstream {
            return false;
        }

        self.upstream
            .entry(downstream.clone())
            .or_default()
            .insert(upstream.clone());

        self.downstream
            .entry(upstream)
            .or_default()
            .insert(downstream);

        true
    }

    /// Look up a loaded node.
    pub fn node(&self, id: &GraphId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this id is loaded.
    pub fn contains(&self, id: &GraphId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether an id is referenced by an edge but has no loaded node.
    pub fn is_foreign(&self, id: &GraphId) -> bool {
        !self.contains(id) && (self.downstream.contains_key(id) || self.upstream.contains_key(id))
    }

    /// Asset key for an id, decoding it when the node is not loaded.
    pub fn asset_key_for(&self, id: &GraphId) -> Result<AssetKey, GraphError> {
        match self.node(id) {
            Some(node) => Ok(node.asset_key.clone()),
            None => Ok(id.to_asset_key()?),
        }
    }

    /// Direct downstream neighbours, in id order.
    pub fn downstream_of<'a>(&'a self, id: &GraphId) -> impl Iterator<Item = &'a GraphId> + 'a {
        self.downstream.get(id).into_iter().flatten()
    }

    /// Direct upstream neighbours, in id order.
    pub fn upstream_of<'a>(&'a self, id: &GraphId) -> impl Iterator<Item = &'a GraphId> + 'a {
        self.upstream.get(id).into_iter().flatten()
    }

    /// All edges as canonical (upstream, downstream) pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphId, &GraphId)> + '_ {
        self.downstream
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (from, to)))
    }

    /// Get number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get number of edges.
    pub fn num_edges(&self) -> usize {
        self.downstream.values().map(BTreeSet::len).sum()
    }

    /// Nodes defined as source assets.
    pub fn source_nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.values().filter(|n| n.definition.is_source)
    }

    /// Nodes defined as observable.
    pub fn observable_nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.values().filter(|n| n.definition.is_observable)
    }
}

/// Build a graph from a flat list of definitions.
///
/// Edge insertion is idempotent and self-edges are dropped. Node entries are
/// written after all edges, so the last definition supplied for an id wins.
pub fn build_graph_data(definitions: &[AssetDefinition]) -> GraphData {
    let mut data = GraphData::new();
    let mut dropped_self_edges = 0usize;

    for definition in definitions {
        let id = definition.graph_id();

        for upstream in &definition.depends_on {
            if !data.add_edge(upstream.graph_id(), id.clone()) {
                dropped_self_edges += 1;
            }
        }
        for downstream in &definition.depended_by {
            if !data.add_edge(id.clone(), downstream.graph_id()) {
                dropped_self_edges += 1;
            }
        }
    }

    for definition in definitions {
        let node = GraphNode::new(definition.clone());
        data.nodes.insert(node.id.clone(), node);
    }

    tracing::debug!(
        nodes = data.num_nodes(),
        edges = data.num_edges(),
        dropped_self_edges,
        "built asset graph"
    );

    data
}
