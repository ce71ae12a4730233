//! Distributed simulated annealing search for low-ASPL/diameter graph
//! topologies under the Order/Degree Problem.
//!
//! The crate is organized around the seven core components of the
//! design: a graph store (`graph`), a seeded RNG stream (`rng`), a
//! parallel BFS (`bfs`), an ASPL/diameter evaluator (`aspl`), a
//! degree-preserving 2-opt proposer (`edge_exchange`), an in-process
//! collective messaging facade standing in for MPI (`comm`), and the SA
//! controller that ties them together (`sa`). `io` and `error` are the
//! ambient edge-list I/O and error taxonomy every runnable binary needs.

pub mod aspl;
pub mod bfs;
pub mod comm;
pub mod edge_exchange;
pub mod error;
pub mod graph;
pub mod io;
pub mod rng;
pub mod sa;

pub use error::Error;
pub use graph::Graph;
pub use sa::{run_sa, SaParams};
