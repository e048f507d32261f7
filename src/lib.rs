//! include-graph: quoted-include dependency graphs for C/C++ trees
//!
//! Scans the root, `include/` and `src/` folders of a project (direct children
//! only) for `.c`, `.cpp`, `.h` and `.inl` files, records which file includes
//! which, and writes a flat node/edge list that graph viewers accept as-is.
//! Line counts are totalled per category (source, header, template).
//!
//! Include detection is a line heuristic, not a preprocessor: by default any
//! line containing `include` and a double quote yields an edge. Use
//! `IncludeMode::Directive` to only accept `#include "..."` lines.
//!
//! # Quickstart (Library)
//! ```no_run
//! use include_graph::graph::DependencyGraph;
//! use include_graph::utils::config::ScanConfig;
//!
//! let cfg = ScanConfig::with_root("/path/to/project");
//! let graph = DependencyGraph::build(&cfg).expect("scan");
//! println!("nodes: {} edges: {} lines: {}", graph.nodes.len(), graph.edges.len(), graph.counts.combined());
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! include-graph --root . --no-wait
//! include-graph --root . --mode directive --dot deps.dot --no-wait
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod parser;
pub mod report;
pub mod utils;
pub mod visualization;
