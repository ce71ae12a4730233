//! Edge-list I/O (C9): the ASCII text format of `spec.md` §6. Reading
//! and writing the file is an "external collaborator" to the core
//! algorithm, but still part of a runnable crate.
use crate::error::{Error, IoSnafu};
use crate::graph::Graph;
use snafu::ResultExt;
use std::fs;
use std::path::Path;

/// Parses whitespace-separated `u v` pairs, one per line. Blank lines
/// (including trailing ones) are skipped.
pub fn read_edge_list(path: &str) -> Result<Vec<(usize, usize)>, Error> {
    let contents = fs::read_to_string(path).context(IoSnafu { path })?;
    let mut edges = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let u = parse_vertex(path, &mut parts)?;
        let v = parse_vertex(path, &mut parts)?;
        edges.push((u, v));
    }
    Ok(edges)
}

fn parse_vertex(
    path: &str,
    parts: &mut std::str::SplitWhitespace,
) -> Result<usize, Error> {
    let token = parts.next().ok_or_else(|| {
        crate::error::InvalidEdgeInputSnafu {
            message: format!("{path}: expected two integers per line"),
        }
        .build()
    })?;
    token.parse::<usize>().map_err(|_| {
        crate::error::InvalidEdgeInputSnafu {
            message: format!("{path}: '{token}' is not a non-negative integer"),
        }
        .build()
    })
}

/// Writes the final edge list, in `E`'s order, one `u v` pair per line.
pub fn write_edge_list(path: &str, graph: &Graph) -> Result<(), Error> {
    let mut buf = String::with_capacity(graph.m() * 8);
    for e in graph.edges() {
        buf.push_str(&e.u.to_string());
        buf.push(' ');
        buf.push_str(&e.v.to_string());
        buf.push('\n');
    }
    fs::write(path, buf).context(IoSnafu { path })
}

/// Derives the output path from the input path: strips a trailing
/// 4-byte extension (iff the 4th-from-last byte is `.`) and appends
/// `.res.txt` (`spec.md` §6).
pub fn derive_output_path(input_path: &str) -> String {
    let stem = if input_path.len() > 4 {
        let bytes = input_path.as_bytes();
        if bytes[input_path.len() - 4] == b'.' {
            &input_path[..input_path.len() - 4]
        } else {
            input_path
        }
    } else {
        input_path
    };
    format!("{stem}.res.txt")
}

/// Used by the CLI to validate the input path up front (`spec.md` §6
/// exit code `-1`).
pub fn is_nonempty_path(path: &str) -> bool {
    !path.is_empty() && Path::new(path).exists()
}
