//! Property-based tests for graph mutation and persistence.

use std::collections::BTreeSet;

use digraph_core::{count_simple_paths, is_reachable, persist, Graph, GraphError, VertexId, Weight};
use proptest::prelude::*;

/// Strategy for a graph over ids `0..n` with arbitrary (possibly parallel,
/// possibly zero-weight) edge requests.
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|n| {
        let id = 0..n as VertexId;
        prop::collection::vec((id.clone(), id, -20i32..20), 0..30).prop_map(move |edges| {
            let mut g = Graph::new(n).expect("capacity is positive");
            for v in 0..n as VertexId {
                g.add_vertex(v).expect("ids are unique");
            }
            for (from, to, w) in edges {
                g.insert_edge(from, to, w).expect("endpoints exist");
            }
            g
        })
    })
}

fn sorted_edges(g: &Graph) -> Vec<(VertexId, VertexId, Weight)> {
    let mut edges: Vec<_> = g.edges().collect();
    edges.sort_unstable();
    edges
}

proptest! {
    #[test]
    fn unique_inserts_stay_sorted(ids in prop::collection::btree_set(-1000i32..1000, 0..60)) {
        let mut shuffled: Vec<VertexId> = ids.iter().copied().collect();
        shuffled.reverse();
        let mid = shuffled.len() / 2;
        shuffled.rotate_left(mid);

        let mut g = Graph::new(1).unwrap();
        for id in &shuffled {
            g.add_vertex(*id).unwrap();
        }

        let stored: Vec<VertexId> = g.vertex_ids().collect();
        let expected: Vec<VertexId> = ids.into_iter().collect();
        prop_assert_eq!(g.vertex_count(), stored.len());
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn duplicate_insert_leaves_graph_unchanged(g in arb_graph(), pick in any::<prop::sample::Index>()) {
        let ids: Vec<VertexId> = g.vertex_ids().collect();
        let id = ids[pick.index(ids.len())];
        let mut mutated = g.clone();
        let result = mutated.add_vertex(id);
        prop_assert!(matches!(result, Err(GraphError::DuplicateVertex(d)) if d == id));
        prop_assert_eq!(mutated, g);
    }

    #[test]
    fn zero_weight_edges_never_stored(g in arb_graph()) {
        prop_assert!(g.edges().all(|(_, _, w)| w != 0));
    }

    #[test]
    fn delete_vertex_leaves_no_dangling_targets(g in arb_graph(), pick in any::<prop::sample::Index>()) {
        let ids: Vec<VertexId> = g.vertex_ids().collect();
        let victim = ids[pick.index(ids.len())];
        let mut g = g;
        let before = g.vertex_count();

        g.delete_vertex(victim).unwrap();

        prop_assert!(!g.exists(victim));
        prop_assert_eq!(g.vertex_count(), before - 1);
        prop_assert!(g.edges().all(|(from, to, _)| from != victim && to != victim));
        let live: BTreeSet<VertexId> = g.vertex_ids().collect();
        prop_assert!(g.edges().all(|(_, to, _)| live.contains(&to)));
    }

    #[test]
    fn save_load_roundtrip(g in arb_graph()) {
        let mut buf = Vec::new();
        persist::encode(&g, &mut buf).unwrap();
        let loaded = persist::decode(&mut buf.as_slice()).unwrap();

        prop_assert_eq!(loaded.vertex_ids().collect::<Vec<_>>(), g.vertex_ids().collect::<Vec<_>>());
        prop_assert_eq!(sorted_edges(&loaded), sorted_edges(&g));
    }

    #[test]
    fn path_count_implies_reachability(
        g in arb_graph(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let ids: Vec<VertexId> = g.vertex_ids().collect();
        let (a, b) = (ids[a.index(ids.len())], ids[b.index(ids.len())]);
        let paths = count_simple_paths(&g, a, b);
        prop_assert_eq!(paths > 0, is_reachable(&g, a, b));
    }
}
