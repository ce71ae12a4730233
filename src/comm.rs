//! Distributed messaging facade (C6).
//!
//! The real system treats the transport as an abstract collective
//! interface (`spec.md` §1, §4.6: `rank`, `size`, `broadcast<T>`,
//! `all_reduce_sum`) and leaves the lowest-level primitives external.
//! This crate realizes that interface as an in-process SPMD simulation:
//! each "rank" is a scoped worker thread holding a private copy of the
//! graph (`spec.md` §5 "Shared-resource policy"), and collectives are
//! implemented with a shared barrier plus a small amount of rendezvous
//! state — no message is ever read before its sender has published it,
//! and no sender overwrites its slot before every reader has consumed
//! it, matching the synchronizing-barrier semantics `spec.md` §5
//! requires of every collective.
use crate::error::{Error, TransportFailureSnafu};
use crossbeam::scope;
use std::any::Any;
use std::sync::{Arc, Barrier, Mutex, MutexGuard};

struct WorldState {
    size: usize,
    barrier: Barrier,
    slot: Mutex<Option<Box<dyn Any + Send>>>,
    reduce_acc: Mutex<f64>,
}

impl WorldState {
    fn new(size: usize) -> WorldState {
        WorldState {
            size,
            barrier: Barrier::new(size),
            slot: Mutex::new(None),
            reduce_acc: Mutex::new(0.0),
        }
    }
}

fn lock_or_fail<'a, T>(mutex: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, Error> {
    mutex.lock().map_err(|_| {
        TransportFailureSnafu {
            message: "collective state lock poisoned by a panicked peer rank".to_string(),
        }
        .build()
    })
}

/// A single rank's handle into the shared collective world.
pub struct Comm {
    rank: usize,
    world: Arc<WorldState>,
}

impl Comm {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.world.size
    }

    /// Broadcasts `T` from `root` to every rank, overwriting `value` on
    /// non-root ranks. All ranks must call this in the same program
    /// order (`spec.md` §4.6, §5 "Ordering guarantees").
    pub fn broadcast<T: Clone + Send + 'static>(
        &self,
        root: usize,
        value: &mut T,
    ) -> Result<(), Error> {
        if self.rank == root {
            let mut slot = lock_or_fail(&self.world.slot)?;
            *slot = Some(Box::new(value.clone()));
        }
        self.world.barrier.wait();
        if self.rank != root {
            let slot = lock_or_fail(&self.world.slot)?;
            let boxed = slot
                .as_ref()
                .expect("broadcast: root did not publish a value")
                .downcast_ref::<T>()
                .expect("broadcast: type mismatch across ranks");
            *value = boxed.clone();
        }
        // Second barrier: don't let root race ahead and overwrite the
        // slot on its next broadcast before every rank has read this one.
        self.world.barrier.wait();
        Ok(())
    }

    /// Sums `value` across all ranks and returns the total to every
    /// rank (`spec.md` §4.6).
    pub fn all_reduce_sum(&self, value: f64) -> Result<f64, Error> {
        {
            let mut acc = lock_or_fail(&self.world.reduce_acc)?;
            *acc += value;
        }
        self.world.barrier.wait();
        let total = *lock_or_fail(&self.world.reduce_acc)?;
        self.world.barrier.wait();
        if self.rank == 0 {
            *lock_or_fail(&self.world.reduce_acc)? = 0.0;
        }
        self.world.barrier.wait();
        Ok(total)
    }
}

/// Spawns `size` rank threads, each running `body(comm)`, and collects
/// their results in rank order. A panic in any rank is reported as a
/// single `TransportFailure` for the whole collective run, matching
/// `spec.md` §5 "Fault tolerance: a single worker failure aborts the
/// run."
pub fn run_world<F, R>(size: usize, body: F) -> Result<Vec<R>, Error>
where
    F: Fn(Comm) -> R + Send + Sync,
    R: Send,
{
    let world = Arc::new(WorldState::new(size));
    let outcome = scope(|s| {
        let handles: Vec<_> = (0..size)
            .map(|rank| {
                let comm = Comm {
                    rank,
                    world: world.clone(),
                };
                let body = &body;
                s.spawn(move |_| body(comm))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Vec<_>>()
    });

    let joined = outcome.map_err(|_| {
        TransportFailureSnafu {
            message: "rank thread scope failed".to_string(),
        }
        .build()
    })?;

    joined
        .into_iter()
        .map(|r| {
            r.map_err(|_| {
                TransportFailureSnafu {
                    message: "a rank thread panicked".to_string(),
                }
                .build()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_delivers_root_value_to_all_ranks() {
        let results = run_world(4, |comm| {
            let mut v: i32 = if comm.rank() == 0 { 42 } else { 0 };
            comm.broadcast(0, &mut v).unwrap();
            v
        })
        .unwrap();
        assert_eq!(results, vec![42, 42, 42, 42]);
    }

    #[test]
    fn all_reduce_sum_adds_across_ranks() {
        let results = run_world(5, |comm| comm.all_reduce_sum(comm.rank() as f64).unwrap()).unwrap();
        // 0+1+2+3+4 = 10, every rank sees the same total.
        for r in results {
            assert_eq!(r, 10.0);
        }
    }

    #[test]
    fn repeated_collectives_stay_consistent() {
        let results = run_world(3, |comm| {
            let mut total = 0.0;
            for i in 0..50 {
                let mut bcast: i32 = if comm.rank() == 0 { i } else { -1 };
                comm.broadcast(0, &mut bcast).unwrap();
                total += comm.all_reduce_sum(bcast as f64).unwrap();
            }
            total
        })
        .unwrap();
        for r in &results {
            assert_eq!(*r, results[0]);
        }
    }
}
