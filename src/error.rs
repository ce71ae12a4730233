//! Crate-wide error taxonomy (`spec.md` §7).
use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    /// Malformed or missing CLI arguments.
    #[snafu(display("invalid argument: {message}"))]
    InvalidArgument { message: String },

    /// The input edge list was malformed, contained a self-loop, or the
    /// induced graph is disconnected.
    #[snafu(display("invalid edge input: {message}"))]
    InvalidEdgeInput { message: String },

    /// The proposer's optional safety cap was exceeded without finding a
    /// valid 2-opt move.
    #[snafu(display("no valid proposal found after {attempts} attempts"))]
    NoValidProposal { attempts: u64 },

    /// A collective operation (broadcast / all-reduce) could not
    /// complete, e.g. because a peer rank thread panicked.
    #[snafu(display("transport failure: {message}"))]
    TransportFailure { message: String },

    /// Failure reading or writing the edge-list file.
    #[snafu(display("I/O failure on {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
