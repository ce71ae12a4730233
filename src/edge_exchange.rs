//! Edge-exchange proposer (C5): degree-preserving 2-opt rewiring with
//! rejection sampling against self-incidence and multigraph outcomes
//! (`spec.md` §4.5).
use crate::error::{Error, NoValidProposalSnafu};
use crate::graph::{Edge, Graph};
use crate::rng::RngStream;

/// The broadcast payload for one proposal: three integers, exactly as
/// `spec.md` §4.5/§6 specifies. `swap_type` is carried as `u8` (0 or 1)
/// rather than `bool` so the struct has a stable scalar layout for the
/// messaging facade (C6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProposalDescriptor {
    pub a: u32,
    pub b: u32,
    pub swap_type: u8,
}

impl ProposalDescriptor {
    fn swap_type_bool(&self) -> bool {
        self.swap_type != 0
    }
}

/// Computes the two 2-opt variants for edges A = (a1,a2), B = (b1,b2)
/// (`spec.md` §4.5).
fn compute_variant(a_edge: Edge, b_edge: Edge, swap_type: bool) -> (Edge, Edge) {
    let (a1, a2) = (a_edge.u, a_edge.v);
    let (b1, b2) = (b_edge.u, b_edge.v);
    if !swap_type {
        (Edge::new(a1, b1), Edge::new(a2, b2))
    } else {
        (Edge::new(a1, b2), Edge::new(a2, b1))
    }
}

/// Samples edges `a`, `b` on the root rank, validates, applies the
/// rewiring in place, and returns the descriptor to broadcast. An
/// optional iteration cap raises `NoValidProposal` instead of spinning
/// forever (`spec.md` §4.5 "Failure modes").
pub fn propose(
    graph: &mut Graph,
    rng: &mut RngStream,
    cap: Option<u64>,
) -> Result<ProposalDescriptor, Error> {
    let m = graph.m();
    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        if let Some(limit) = cap {
            if attempts > limit {
                return NoValidProposalSnafu { attempts }.fail();
            }
        }

        let mut a = rng.next_below(m);
        let mut b = rng.next_below(m);
        while a == b {
            a = rng.next_below(m);
            b = rng.next_below(m);
        }

        let edge_a = graph.edges()[a];
        let edge_b = graph.edges()[b];
        if edge_a.shares_vertex_with(&edge_b) {
            continue;
        }

        let swap_type = rng.next_bool();
        let (new_a, new_b) = compute_variant(edge_a, edge_b, swap_type);
        if graph.edges().iter().any(|e| *e == new_a || *e == new_b) {
            continue;
        }

        apply_rewiring_raw(graph, a, b, edge_a, edge_b, new_a, new_b);
        return Ok(ProposalDescriptor {
            a: a as u32,
            b: b as u32,
            swap_type: swap_type as u8,
        });
    }
}

/// Deterministically reapplies a rewiring already chosen (and validated)
/// on the root rank. Pure function of `(graph, desc)` — no RNG calls —
/// so non-root ranks stay byte-identical to the root after replay
/// (`spec.md` §9 "Replicated-proposer determinism").
pub fn reapply(graph: &mut Graph, desc: &ProposalDescriptor) {
    let a = desc.a as usize;
    let b = desc.b as usize;
    let edge_a = graph.edges()[a];
    let edge_b = graph.edges()[b];
    let (new_a, new_b) = compute_variant(edge_a, edge_b, desc.swap_type_bool());
    apply_rewiring_raw(graph, a, b, edge_a, edge_b, new_a, new_b);
}

/// Given the old and new edge pairs, updates `E` and the four touched
/// adjacency lists. For each original endpoint, find which new edge it
/// landed in and swap its old partner for the new one (`spec.md` §4.5
/// "Correctness of adjacency update").
fn apply_rewiring_raw(
    graph: &mut Graph,
    a_idx: usize,
    b_idx: usize,
    old_a: Edge,
    old_b: Edge,
    new_a: Edge,
    new_b: Edge,
) {
    for endpoint in [old_a.u, old_a.v, old_b.u, old_b.v] {
        let old_edge = if old_a.has_endpoint(endpoint) {
            old_a
        } else {
            old_b
        };
        let old_partner = old_edge.other(endpoint);
        let new_edge = if new_a.has_endpoint(endpoint) {
            new_a
        } else {
            new_b
        };
        let new_partner = new_edge.other(endpoint);
        graph.replace_neighbor(endpoint, old_partner, new_partner);
    }
    graph.set_edge(a_idx, new_a);
    graph.set_edge(b_idx, new_b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::rng::RngStream;

    fn edge_set(g: &Graph) -> Vec<(usize, usize)> {
        let mut v: Vec<(usize, usize)> = g.edges().iter().map(|e| (e.u, e.v)).collect();
        v.sort();
        v
    }

    #[test]
    fn p1_p2_canonical_and_simple_after_many_proposals() {
        let mut g = Graph::from_edges(vec![
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 0),
            (0, 4),
            (1, 5),
        ])
        .unwrap();
        let mut rng = RngStream::from_seed(1);
        for _ in 0..200 {
            propose(&mut g, &mut rng, Some(10_000)).unwrap();
            for e in g.edges() {
                assert!(e.u < e.v, "P1 violated: {:?}", e);
            }
            let set = edge_set(&g);
            let mut dedup = set.clone();
            dedup.dedup();
            assert_eq!(set.len(), dedup.len(), "P2 violated: duplicate edge");
        }
    }

    #[test]
    fn p3_degree_sequence_preserved() {
        let mut g = Graph::from_edges(vec![
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 0),
            (0, 4),
            (1, 5),
        ])
        .unwrap();
        let before: Vec<usize> = (0..g.n()).map(|v| g.degree(v)).collect();
        let mut rng = RngStream::from_seed(2);
        for _ in 0..50 {
            propose(&mut g, &mut rng, Some(10_000)).unwrap();
        }
        let after: Vec<usize> = (0..g.n()).map(|v| g.degree(v)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn p4_adjacency_consistent_with_edge_list() {
        let mut g = Graph::from_edges(vec![
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 0),
            (0, 4),
            (1, 5),
        ])
        .unwrap();
        let mut rng = RngStream::from_seed(3);
        for _ in 0..50 {
            propose(&mut g, &mut rng, Some(10_000)).unwrap();
        }
        for v in 0..g.n() {
            let mut from_adj = g.adj()[v].clone();
            from_adj.sort();
            let mut from_edges: Vec<usize> = g
                .edges()
                .iter()
                .filter_map(|e| {
                    if e.u == v {
                        Some(e.v)
                    } else if e.v == v {
                        Some(e.u)
                    } else {
                        None
                    }
                })
                .collect();
            from_edges.sort();
            assert_eq!(from_adj, from_edges);
        }
    }

    #[test]
    fn p8_reapply_matches_root_proposal() {
        let mut root = Graph::from_edges(vec![
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 0),
            (0, 4),
            (1, 5),
        ])
        .unwrap();
        let mut replica = root.clone();
        let mut rng = RngStream::from_seed(4);
        for _ in 0..20 {
            let desc = propose(&mut root, &mut rng, Some(10_000)).unwrap();
            reapply(&mut replica, &desc);
            assert_eq!(edge_set(&root), edge_set(&replica));
            for v in 0..root.n() {
                let mut ra = root.adj()[v].clone();
                ra.sort();
                let mut rb = replica.adj()[v].clone();
                rb.sort();
                assert_eq!(ra, rb);
            }
        }
    }

    #[test]
    fn triangle_has_no_valid_proposal() {
        let mut g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let mut rng = RngStream::from_seed(5);
        let result = propose(&mut g, &mut rng, Some(1000));
        assert!(result.is_err());
    }
}
