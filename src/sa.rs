//! Distributed Simulated Annealing controller (C7): drives proposals,
//! partitions ASPL work across ranks, evaluates Metropolis acceptance,
//! cools geometrically, and terminates (`spec.md` §4.7).
use crate::aspl::partial_aspl;
use crate::comm::run_world;
use crate::edge_exchange::{propose, reapply, ProposalDescriptor};
use crate::error::Error;
use crate::graph::Graph;
use crate::rng::RngStream;

/// SA parameters; defaults mirror `spec.md` §4.7 exactly.
#[derive(Clone, Copy, Debug)]
pub struct SaParams {
    pub t0: f64,
    pub t_end: f64,
    pub cooling_interval: u64,
    pub max_iters: u64,
    /// Safety cap on the proposer's rejection-sampling loop (`spec.md`
    /// §4.5 "Failure modes" — optional, not in the original source).
    pub proposal_cap: Option<u64>,
    /// Emit one JSON progress line per iteration on rank 0 (C11).
    pub verbose: bool,
}

impl Default for SaParams {
    fn default() -> SaParams {
        SaParams {
            t0: 100.0,
            t_end: 0.22,
            cooling_interval: 1,
            max_iters: 1000,
            proposal_cap: Some(1_000_000),
            verbose: false,
        }
    }
}

/// Splits `[0, n)` across `size` ranks, giving the remainder to rank 0
/// (`spec.md` §4.7 "Partitioning").
pub fn partition_range(n: usize, size: usize, rank: usize) -> (usize, usize) {
    let width = n / size;
    let offset = n - width * (size - 1);
    if rank == 0 {
        (0, offset)
    } else {
        let start = offset + (rank - 1) * width;
        (start, start + width)
    }
}

/// The Metropolis acceptance probability (`spec.md` §4.7, GLOSSARY).
pub fn metropolis(delta_e: f64, t: f64) -> f64 {
    if delta_e < 0.0 {
        1.0
    } else {
        (-delta_e / t).exp()
    }
}

/// Runs the distributed SA loop to completion and returns the final
/// graph held by rank 0 (`spec.md` §4.7 "Observable side effects").
///
/// `size` ranks are simulated as scoped threads (see `comm::run_world`);
/// `threads` controls the intra-process BFS parallelism used by each
/// rank's ASPL evaluation.
pub fn run_sa(
    graph: Graph,
    size: usize,
    threads: usize,
    seed: u64,
    params: SaParams,
) -> Result<Graph, Error> {
    let n = graph.n();
    let k = n as f64 * n.saturating_sub(1) as f64;
    let alpha = if params.max_iters == 0 {
        1.0
    } else {
        (params.t_end / params.t0).powf(params.cooling_interval as f64 / params.max_iters as f64)
    };

    let mut results = run_world(size, move |comm| -> Result<Graph, Error> {
        let (start, end) = partition_range(n, comm.size(), comm.rank());
        let mut rng = RngStream::from_seed(seed);
        let mut current = graph.clone();
        let mut t = params.t0;
        let mut iters: u64 = 0;

        let (partial, _) = partial_aspl(&current, start, end, threads);
        let mut energy = comm.all_reduce_sum(partial)? / n as f64;

        loop {
            let mut trial = current.clone();
            let mut desc = ProposalDescriptor::default();
            if comm.rank() == 0 {
                desc = propose(&mut trial, &mut rng, params.proposal_cap)?;
            }
            comm.broadcast(0, &mut desc)?;
            if comm.rank() != 0 {
                reapply(&mut trial, &desc);
            }

            let (partial_trial, _) = partial_aspl(&trial, start, end, threads);
            let trial_energy = comm.all_reduce_sum(partial_trial)? / n as f64;
            let delta_e = k * (trial_energy - energy);

            let mut accepted: i32 = 0;
            if comm.rank() == 0 {
                let p = metropolis(delta_e, t);
                accepted = (p >= rng.next_prob()) as i32;
            }
            comm.broadcast(0, &mut accepted)?;

            if accepted != 0 {
                current = trial;
                energy = trial_energy;
            }

            if params.verbose && comm.rank() == 0 {
                println!(
                    "{}",
                    serde_json::json!({
                        "iter": iters,
                        "temperature": t,
                        "energy": energy,
                        "accepted": accepted != 0,
                    })
                );
            }

            if iters % params.cooling_interval.max(1) == 0 {
                t *= alpha;
            }
            iters += 1;

            if t <= params.t_end || iters == params.max_iters {
                break;
            }
        }

        Ok(current)
    })?;

    results.remove(0)
}
