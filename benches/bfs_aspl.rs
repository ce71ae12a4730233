use criterion::{black_box, criterion_group, criterion_main, Criterion};
use odp_sa::aspl::full_aspl;
use odp_sa::bfs::parallel_bfs;
use odp_sa::graph::Graph;

/// Builds a ring lattice of `n` vertices, each connected to its `k`
/// nearest neighbors on each side — a standard Order/Degree Problem
/// starting topology.
fn ring_lattice(n: usize, k: usize) -> Graph {
    let mut edges = Vec::new();
    for v in 0..n {
        for d in 1..=k {
            let w = (v + d) % n;
            if v < w {
                edges.push((v, w));
            } else {
                edges.push((w, v));
            }
        }
    }
    edges.sort();
    edges.dedup();
    Graph::from_edges(edges).unwrap()
}

fn bench_bfs(c: &mut Criterion) {
    let g = ring_lattice(256, 4);
    c.bench_function("parallel_bfs n=256 threads=1", |b| {
        b.iter(|| parallel_bfs(black_box(&g), 0, 1))
    });
    c.bench_function("parallel_bfs n=256 threads=4", |b| {
        b.iter(|| parallel_bfs(black_box(&g), 0, 4))
    });
}

fn bench_aspl(c: &mut Criterion) {
    let g = ring_lattice(256, 4);
    c.bench_function("full_aspl n=256 threads=1", |b| {
        b.iter(|| full_aspl(black_box(&g), 1))
    });
    c.bench_function("full_aspl n=256 threads=4", |b| {
        b.iter(|| full_aspl(black_box(&g), 4))
    });
}

criterion_group!(benches, bench_bfs, bench_aspl);
criterion_main!(benches);
