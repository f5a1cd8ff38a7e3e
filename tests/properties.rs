//! Property tests for graph and span invariants.

use asset_graph_kernel::{
    build_graph_data, graph_has_cycles, ops_in_range, to_spans, AssetDefinition, AssetKey,
    PartitionSelection, PartitionState, RangeToggle,
};
use proptest::prelude::*;

fn key(i: usize) -> AssetKey {
    AssetKey::new([format!("asset_{}", i)])
}

/// Definitions whose dependencies only point at lower indexes (a DAG).
fn dag_definitions(n: usize, edges: &[(usize, usize)]) -> Vec<AssetDefinition> {
    (0..n)
        .map(|i| {
            let deps = edges
                .iter()
                .filter(|(to, from)| *to % n == i && *from % n < i)
                .map(|(_, from)| key(*from % n));
            AssetDefinition::new(key(i))
                .depends_on(deps)
                .with_ops([format!("op_{}", i)])
        })
        .collect()
}

fn state_strategy() -> impl Strategy<Value = PartitionState> {
    prop_oneof![
        Just(PartitionState::Missing),
        Just(PartitionState::Success),
        Just(PartitionState::Failure),
        Just(PartitionState::Queued),
    ]
}

proptest! {
    #[test]
    fn graph_id_equality_matches_path_equality(
        a in prop::collection::vec("[a-z,\"]{0,4}", 0..4),
        b in prop::collection::vec("[a-z,\"]{0,4}", 0..4),
    ) {
        let ka = AssetKey::new(a.clone());
        let kb = AssetKey::new(b.clone());
        prop_assert_eq!(ka.graph_id() == kb.graph_id(), a == b);
    }

    #[test]
    fn declared_edges_appear_in_both_indexes(
        n in 1usize..12,
        up_edges in prop::collection::vec((0usize..12, 0usize..12), 0..30),
        down_edges in prop::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        let definitions: Vec<AssetDefinition> = (0..n)
            .map(|i| {
                let deps = up_edges
                    .iter()
                    .filter(|(to, _)| *to % n == i)
                    .map(|(_, from)| key(*from % n));
                let dependents = down_edges
                    .iter()
                    .filter(|(from, _)| *from % n == i)
                    .map(|(_, to)| key(*to % n));
                AssetDefinition::new(key(i)).depends_on(deps).depended_by(dependents)
            })
            .collect();
        let graph = build_graph_data(&definitions);

        let mut declared = Vec::new();
        for definition in &definitions {
            let id = definition.graph_id();
            for upstream in &definition.depends_on {
                declared.push((upstream.graph_id(), id.clone()));
            }
            for downstream in &definition.depended_by {
                declared.push((id.clone(), downstream.graph_id()));
            }
        }

        for (up, down) in declared {
            if up == down {
                prop_assert!(graph.downstream.get(&up).map_or(true, |d| !d.contains(&up)));
                prop_assert!(graph.upstream.get(&up).map_or(true, |u| !u.contains(&up)));
            } else {
                prop_assert!(graph.downstream[&up].contains(&down));
                prop_assert!(graph.upstream[&down].contains(&up));
            }
        }

        for (up, down) in graph.edges() {
            prop_assert!(graph.upstream[down].contains(up));
        }
    }

    #[test]
    fn dags_have_no_cycles(
        n in 1usize..15,
        edges in prop::collection::vec((0usize..15, 0usize..15), 0..40),
    ) {
        let graph = build_graph_data(&dag_definitions(n, &edges));
        prop_assert!(!graph_has_cycles(&graph));
    }

    #[test]
    fn back_edge_creates_cycle(
        n in 2usize..15,
        edges in prop::collection::vec((0usize..15, 0usize..15), 0..40),
        a in 0usize..15,
        b in 0usize..15,
    ) {
        let (lo, hi) = ((a % n).min(b % n), (a % n).max(b % n));
        prop_assume!(lo < hi);

        // Chain lo -> lo+1 -> ... -> hi, then close it with hi -> lo
        let mut definitions = dag_definitions(n, &edges);
        for i in lo + 1..=hi {
            definitions[i] = definitions[i].clone().depends_on([key(i - 1)]);
        }
        definitions[lo] = definitions[lo].clone().depends_on([key(hi)]);

        let graph = build_graph_data(&definitions);
        prop_assert!(graph_has_cycles(&graph));
    }

    #[test]
    fn ops_in_range_is_symmetric_and_unique(
        n in 2usize..10,
        edges in prop::collection::vec((0usize..10, 0usize..10), 0..25),
        a in 0usize..10,
        b in 0usize..10,
    ) {
        let graph = build_graph_data(&dag_definitions(n, &edges));
        let (a, b) = (key(a % n).graph_id(), key(b % n).graph_id());

        let forward = ops_in_range(&graph, Some(&a), &b);
        let backward = ops_in_range(&graph, Some(&b), &a);

        let mut unique = forward.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), forward.len());

        let mut f = forward;
        let mut r = backward;
        f.sort();
        r.sort();
        prop_assert_eq!(f, r);
    }

    #[test]
    fn spans_cover_every_index_and_are_maximal(
        states in prop::collection::vec(state_strategy(), 0..60),
    ) {
        let names: Vec<String> = (0..states.len()).map(|i| format!("p{}", i)).collect();
        let spans = to_spans(&names, |_, idx| states[idx]);

        let mut expected_start = 0;
        for span in &spans {
            prop_assert_eq!(span.start_idx, expected_start);
            prop_assert!(span.end_idx >= span.start_idx);
            for idx in span.start_idx..=span.end_idx {
                prop_assert_eq!(states[idx], span.status);
            }
            expected_start = span.end_idx + 1;
        }
        prop_assert_eq!(expected_start, states.len());

        for pair in spans.windows(2) {
            prop_assert_ne!(pair[0].status, pair[1].status);
        }
    }

    #[test]
    fn drag_toggles_or_unions(
        selected in prop::collection::btree_set(0usize..20, 0..20),
        a in 0usize..20,
        b in 0usize..20,
    ) {
        let names: Vec<String> = (0..20).map(|i| format!("p{:02}", i)).collect();
        let mut selection =
            PartitionSelection::from_names(selected.iter().map(|i| names[*i].clone()));
        let before = selection.clone();
        let (lo, hi) = (a.min(b), a.max(b));

        let toggle = selection.apply_range(&names, a, b);
        let all_selected = (lo..=hi).all(|i| selected.contains(&i));

        for (i, name) in names.iter().enumerate() {
            let in_range = (lo..=hi).contains(&i);
            let expected = match (in_range, toggle) {
                (true, RangeToggle::Deselected) => false,
                (true, RangeToggle::Selected) => true,
                (false, _) => before.contains(name),
            };
            prop_assert_eq!(selection.contains(name), expected);
        }
        prop_assert_eq!(toggle == RangeToggle::Deselected, all_selected);
    }
}
