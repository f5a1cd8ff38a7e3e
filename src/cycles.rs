//! Cycle detection over the downstream index.
//!
//! Every loaded node starts in an unvisited pool. A depth-first search is
//! rooted at an arbitrary unvisited node; each node leaves the pool the first
//! time the search enters it and is never used as a root again. Revisiting a
//! node that is still on the active path is a cycle. Total work is O(V + E).

use std::collections::{BTreeSet, HashSet};

use crate::graph::{GraphData, GraphError};
use crate::types::GraphId;

/// One level of the explicit DFS stack.
struct Frame<'a> {
    neighbors: Vec<&'a GraphId>,
    next: usize,
}

/// Whether the graph contains at least one cycle.
///
/// Returns as soon as the first cycle is found. Ids referenced by edges but
/// absent from `nodes` are never entered.
pub fn graph_has_cycles(graph: &GraphData) -> bool {
    let mut unvisited: BTreeSet<&GraphId> = graph.nodes.keys().collect();

    while let Some(root) = unvisited.pop_first() {
        if path_has_cycle(graph, root, &mut unvisited) {
            tracing::warn!(
                root = %root,
                nodes = graph.num_nodes(),
                "cycle detected in asset graph"
            );
            return true;
        }
    }

    false
}

/// Run one DFS from `root`, draining entered nodes from `unvisited`.
fn path_has_cycle<'a>(
    graph: &'a GraphData,
    root: &'a GraphId,
    unvisited: &mut BTreeSet<&'a GraphId>,
) -> bool {
    let mut on_path: HashSet<&'a GraphId> = HashSet::from([root]);
    let mut path: Vec<&'a GraphId> = vec![root];
    let mut stack: Vec<Frame<'a>> = vec![Frame {
        neighbors: graph.downstream_of(root).collect(),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&next) = frame.neighbors.get(frame.next) else {
            stack.pop();
            if let Some(done) = path.pop() {
                on_path.remove(done);
            }
            continue;
        };
        frame.next += 1;

        if on_path.contains(&next) {
            return true;
        }
        if unvisited.remove(next) {
            on_path.insert(next);
            path.push(next);
            stack.push(Frame {
                neighbors: graph.downstream_of(next).collect(),
                next: 0,
            });
        }
    }

    false
}

/// Fail with [`GraphError::CycleDetected`] if the graph has a cycle.
///
/// Callers should stop layout and traversal on error.
pub fn ensure_acyclic(graph: &GraphData) -> Result<(), GraphError> {
    if graph_has_cycles(graph) {
        return Err(GraphError::CycleDetected {
            node_count: graph.num_nodes(),
        });
    }
    Ok(())
}
