//! Topology queries backing shift-click range selection.
//!
//! Both queries walk only the downstream index with an explicit stack, so
//! deep graphs do not grow the call stack.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{GraphData, GraphNode};
use crate::types::GraphId;

/// Which way one node lies from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphDirection {
    /// `to` is reachable from `from` along downstream edges.
    Downstream,
    /// Anything else, including unrelated nodes.
    Upstream,
}

impl fmt::Display for GraphDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downstream => write!(f, "downstream"),
            Self::Upstream => write!(f, "upstream"),
        }
    }
}

/// Direction of `to` relative to `from`.
///
/// Reports [`GraphDirection::Downstream`] as soon as `to` shows up among the
/// downstream neighbours of a node reachable from `from`. If the search is
/// exhausted the answer is [`GraphDirection::Upstream`], even when the two
/// nodes are unrelated.
pub fn direction_between(graph: &GraphData, from: &GraphId, to: &GraphId) -> GraphDirection {
    let mut stack = vec![from];
    let mut seen: BTreeSet<&GraphId> = BTreeSet::from([from]);

    while let Some(id) = stack.pop() {
        for next in graph.downstream_of(id) {
            if next == to {
                return GraphDirection::Downstream;
            }
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }

    GraphDirection::Upstream
}

/// One level of the ops-in-range traversal.
struct RangeFrame<'a> {
    id: &'a GraphId,
    neighbors: Vec<&'a GraphId>,
    next: usize,
    /// Length of the shared output before this frame's ops were appended.
    start: usize,
    reached: bool,
}

impl<'a> RangeFrame<'a> {
    /// Enter `node`, appending its ops to `out`.
    fn enter(graph: &'a GraphData, node: &'a GraphNode, out: &mut Vec<String>) -> Self {
        let start = out.len();
        out.extend(node.op_names().iter().cloned());
        Self {
            id: &node.id,
            neighbors: graph.downstream_of(&node.id).collect(),
            next: 0,
            start,
            reached: false,
        }
    }
}

/// Op names of every node on a downstream path between `from` and `to`.
///
/// The search always runs downstream: when `to` lies upstream of `from` the
/// endpoints are swapped first. Results are unique and in discovery order.
/// A missing `from`, or endpoints with no connecting path, give an empty
/// list.
///
/// Branches do not share a visited set, so a node reachable along several
/// branches (a diamond) is walked once per branch and its ops are
/// de-duplicated afterwards. A node already on the current path, including
/// the one the branch came from, is never re-entered, which keeps cyclic
/// input from looping.
pub fn ops_in_range(graph: &GraphData, from: Option<&GraphId>, to: &GraphId) -> Vec<String> {
    let Some(from) = from else {
        return Vec::new();
    };
    if from == to {
        return graph
            .node(to)
            .map(|node| node.op_names().to_vec())
            .unwrap_or_default();
    }

    let (from, to) = match direction_between(graph, from, to) {
        GraphDirection::Downstream => (from, to),
        GraphDirection::Upstream => {
            tracing::trace!(from = %from, to = %to, "swapping range endpoints to walk downstream");
            (to, from)
        }
    };
    let Some(root) = graph.node(from) else {
        return Vec::new();
    };

    // Ops of the current path plus every branch that has reached `to`.
    // A frame that finishes without reaching `to` truncates back to its start.
    let mut out: Vec<String> = Vec::new();
    let mut stack = vec![RangeFrame::enter(graph, root, &mut out)];
    let mut on_path: HashSet<&GraphId> = HashSet::from([&root.id]);

    while let Some(frame) = stack.last_mut() {
        let Some(&next) = frame.neighbors.get(frame.next) else {
            let Some(done) = stack.pop() else {
                break;
            };
            on_path.remove(done.id);
            if !done.reached {
                out.truncate(done.start);
            } else if let Some(parent) = stack.last_mut() {
                parent.reached = true;
            }
            if stack.is_empty() && done.reached {
                return dedupe(out);
            }
            continue;
        };
        frame.next += 1;

        if on_path.contains(next) {
            continue;
        }
        let Some(node) = graph.node(next) else {
            continue;
        };

        if next == to {
            out.extend(node.op_names().iter().cloned());
            frame.reached = true;
            continue;
        }

        on_path.insert(&node.id);
        stack.push(RangeFrame::enter(graph, node, &mut out));
    }

    Vec::new()
}

/// Remove repeated values, keeping first occurrences in order.
fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
