//! ASPL / diameter evaluator (C4): sums BFS distances over a vertex
//! range and detects disconnection (`spec.md` §4.4).
use crate::bfs::parallel_bfs;
use crate::graph::Graph;

/// Partial ASPL/diameter over the half-open range `[start, end)`.
///
/// Dividing each row by `N - 1` before summing (rather than summing raw
/// hop-counts and dividing once at the end) keeps partial sums in
/// double precision without risking overflow on large graphs
/// (`spec.md` §4.4, Rationale).
pub fn partial_aspl(graph: &Graph, start: usize, end: usize, threads: usize) -> (f64, i64) {
    let n = graph.n();
    if n <= 1 {
        return (0.0, 0);
    }
    let div = (n - 1) as f64;
    let mut total = 0.0;
    let mut diameter = 0i64;

    for v in start..end {
        let dist = parallel_bfs(graph, v, threads);
        if dist.iter().any(|&d| d < 0) {
            return (f64::INFINITY, 0);
        }
        let row_sum: i64 = dist.iter().sum();
        total += row_sum as f64 / div;
        if let Some(&m) = dist.iter().max() {
            diameter = diameter.max(m);
        }
    }

    (total, diameter)
}

/// Single-process convenience wrapper equivalent to partitioning over
/// the whole vertex range, used by scenario checks and `main`'s
/// up-front connectivity check.
pub fn full_aspl(graph: &Graph, threads: usize) -> (f64, i64) {
    let (total, diameter) = partial_aspl(graph, 0, graph.n(), threads);
    if total.is_infinite() {
        return (f64::INFINITY, diameter);
    }
    (total / graph.n() as f64, diameter)
}
