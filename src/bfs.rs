//! Parallel BFS (C3): level-synchronous top-down frontier expansion with
//! atomic first-writer-wins distance claims (`spec.md` §4.3).
use crate::graph::Graph;
use crossbeam::scope;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

/// Work granularity for dynamic scheduling over a frontier, matching the
/// `schedule(dynamic, 2)` of the original OpenMP loop (`spec.md` §5).
const CHUNK: usize = 2;

/// Runs a single-source BFS and returns hop distances, or `-1` for
/// unreached vertices (`spec.md` §4.3 contract).
pub fn parallel_bfs(graph: &Graph, source: usize, threads: usize) -> Vec<i64> {
    let n = graph.n();
    let distance: Vec<AtomicI64> = (0..n).map(|_| AtomicI64::new(-1)).collect();
    distance[source].store(0, Ordering::Relaxed);

    let threads = threads.max(1);
    let mut frontier = vec![source];

    while !frontier.is_empty() {
        let cursor = AtomicUsize::new(0);
        let next = if threads == 1 {
            top_down_step_chunk(graph, &frontier, &distance, &cursor)
        } else {
            scope(|s| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let frontier = &frontier;
                        let distance = &distance;
                        let cursor = &cursor;
                        s.spawn(move |_| top_down_step_chunk(graph, frontier, distance, cursor))
                    })
                    .collect();
                handles
                    .into_iter()
                    .flat_map(|h| h.join().expect("BFS worker thread panicked"))
                    .collect()
            })
            .expect("BFS scope failed")
        };
        frontier = next;
    }

    distance.into_iter().map(AtomicI64::into_inner).collect()
}

/// Pulls chunks of `CHUNK` frontier vertices from a shared cursor,
/// atomically claims their unvisited neighbors, and returns the
/// thread-local next frontier. The CAS is benign because every
/// successful write within one level writes the same `distance[u] + 1`
/// value for a given `u`'s children (`spec.md` §4.3 "Why CAS").
fn top_down_step_chunk(
    graph: &Graph,
    frontier: &[usize],
    distance: &[AtomicI64],
    cursor: &AtomicUsize,
) -> Vec<usize> {
    let mut local_next = Vec::new();
    loop {
        let start = cursor.fetch_add(CHUNK, Ordering::Relaxed);
        if start >= frontier.len() {
            break;
        }
        let end = (start + CHUNK).min(frontier.len());
        for &u in &frontier[start..end] {
            let next_dist = distance[u].load(Ordering::Relaxed) + 1;
            for &nb in &graph.adj()[u] {
                if distance[nb]
                    .compare_exchange(-1, next_dist, Ordering::Relaxed, Ordering::Relaxed)
                    .is_ok()
                {
                    local_next.push(nb);
                }
            }
        }
    }
    local_next
}
