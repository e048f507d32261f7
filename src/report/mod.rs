//! Plain-text graph output and the console summary.
//!
//! The text format is one node per line followed by one `dependency dependent`
//! line per edge. Names are written verbatim.
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use crate::errors::ScanError;
use crate::graph::{DependencyGraph, LineCounts};

/// Write `graph` in text form to any writer.
///
/// # Errors
/// Propagates writer failures.
pub fn write_graph_text<W: Write>(graph: &DependencyGraph, out: &mut W) -> io::Result<()> {
    for node in &graph.nodes {
        writeln!(out, "{node}")?;
    }
    for edge in &graph.edges {
        writeln!(out, "{} {}", edge.dependency, edge.dependent)?;
    }
    Ok(())
}

#[must_use]
pub fn render_graph_text(graph: &DependencyGraph) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_graph_text(graph, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Truncate or create `path` and write the graph into it.
///
/// # Errors
/// Returns `ScanError::Output` if the file cannot be created or written.
pub fn save_graph_text(graph: &DependencyGraph, path: &Path) -> Result<(), ScanError> {
    let file = File::create(path).map_err(|e| ScanError::output(path, e))?;
    let mut out = BufWriter::new(file);
    write_graph_text(graph, &mut out)
        .and_then(|()| out.flush())
        .map_err(|e| ScanError::output(path, e))
}

#[must_use]
pub fn summary_lines(counts: &LineCounts) -> [String; 4] {
    [
        format!("Header length: {}", counts.header),
        format!("Source length: {}", counts.source),
        format!("Template length: {}", counts.template),
        format!("Combined: {}", counts.combined()),
    ]
}

/// Block until one line (or end of input) arrives on `input`.
///
/// # Errors
/// Propagates read failures.
pub fn wait_for_ack<R: BufRead>(input: &mut R) -> io::Result<()> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
