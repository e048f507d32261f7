//! Graph model and builder for the crate.
//!
//! `DependencyGraph` holds the node list, the edge list and per-category line
//! counts. It is filled by two passes over the configured directories: the
//! header pass in [`scan::collect_nodes`] and the include/line-count pass in
//! [`scan::scan_files`].
//!
//! Node and edge order is insertion order; nothing here sorts or deduplicates
//! unless `ScanConfig::dedup_nodes` asks for it.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::errors::ScanError;
use crate::utils::config::ScanConfig;

pub mod scan;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Source,
    Header,
    Template,
}

/// `dependent` includes `dependency`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub dependency: String,
    pub dependent: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub source: usize,
    pub header: usize,
    pub template: usize,
}

impl LineCounts {
    pub fn add(&mut self, category: FileCategory, lines: usize) {
        match category {
            FileCategory::Source => self.source += lines,
            FileCategory::Header => self.header += lines,
            FileCategory::Template => self.template += lines,
        }
    }

    #[must_use]
    pub fn combined(&self) -> usize {
        self.header + self.source + self.template
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DependencyGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
    pub counts: LineCounts,
    /// Category of the first scanned file for each name, including templates.
    pub categories: BTreeMap<String, FileCategory>,
}

impl DependencyGraph {
    /// Scan the directories described by `config` without echoing nodes.
    ///
    /// # Errors
    /// Returns `ScanError` if a directory or file cannot be read, or on a
    /// malformed include under `MalformedPolicy::Fail`.
    pub fn build(config: &ScanConfig) -> Result<Self, ScanError> {
        Self::build_with(config, |_| {})
    }

    /// Like [`DependencyGraph::build`], calling `on_node` for every node accepted by
    /// the header pass as soon as it is found.
    ///
    /// # Errors
    /// See [`DependencyGraph::build`].
    pub fn build_with<F>(config: &ScanConfig, on_node: F) -> Result<Self, ScanError>
    where
        F: FnMut(&str),
    {
        let dirs = crate::utils::file_walker::resolve_directories(&config.root, &config.folders);
        let mut graph = Self::default();
        scan::collect_nodes(&mut graph, config, &dirs, on_node)?;
        scan::scan_files(&mut graph, config, &dirs)?;
        if config.dedup_nodes {
            graph.dedup_nodes();
        }
        log::info!(
            "Scanned {}: {} nodes, {} edges, {} lines",
            config.root.display(),
            graph.nodes.len(),
            graph.edges.len(),
            graph.counts.combined()
        );
        Ok(graph)
    }

    pub(crate) fn push_node(&mut self, name: &str, category: FileCategory) {
        self.nodes.push(name.to_string());
        self.categories.entry(name.to_string()).or_insert(category);
    }

    /// Remember the category of a scanned file that gets no node line.
    pub(crate) fn note_category(&mut self, name: &str, category: FileCategory) {
        self.categories.entry(name.to_string()).or_insert(category);
    }

    /// Record `dependent -> dependency` unless both names are equal.
    pub(crate) fn push_edge(&mut self, dependency: String, dependent: &str) -> bool {
        if dependency == dependent {
            return false;
        }
        self.edges.push(Edge { dependency, dependent: dependent.to_string() });
        true
    }

    /// Keep the first occurrence of each node name.
    pub fn dedup_nodes(&mut self) {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.retain(|n| seen.insert(n.clone()));
    }

    /// Node names in first-seen order, without duplicates.
    #[must_use]
    pub fn unique_nodes(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().map(String::as_str).filter(|n| seen.insert(*n)).collect()
    }

    /// # Errors
    /// Returns `ScanError` if serialization or the write fails.
    pub fn save_json(&self, path: &Path) -> Result<(), ScanError> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).map_err(|e| ScanError::output(path, e))
    }

    /// # Errors
    /// Returns `ScanError` if the file cannot be read or decoded.
    pub fn load_json(path: &Path) -> Result<Self, ScanError> {
        let data = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project(entries: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, body) in entries {
            let p = dir.path().join(rel);
            if let Some(par) = p.parent() {
                fs::create_dir_all(par).unwrap();
            }
            fs::write(p, body).unwrap();
        }
        dir
    }

    #[test]
    fn header_only_tree() {
        let dir = project(&[("include/a.h", "#pragma once\nint a();\n")]);
        let graph = DependencyGraph::build(&ScanConfig::with_root(dir.path())).unwrap();
        assert_eq!(graph.nodes, vec!["a"]);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.counts, LineCounts { source: 0, header: 2, template: 0 });
    }

    #[test]
    fn source_include_produces_edge_and_counts() {
        let dir = project(&[
            ("include/a.h", "int a();\n"),
            ("src/b.cpp", "#include \"a.h\"\nint main() { return a(); }\n"),
            ("src/t.inl", "#include \"b.h\"\ninline void t() {}\n\n"),
        ]);
        let graph = DependencyGraph::build(&ScanConfig::with_root(dir.path())).unwrap();
        assert_eq!(graph.nodes, vec!["a", "b"]);
        assert_eq!(
            graph.edges,
            vec![
                Edge { dependency: "a".into(), dependent: "b".into() },
                Edge { dependency: "b".into(), dependent: "t".into() },
            ]
        );
        assert_eq!(graph.counts.header, 1);
        assert_eq!(graph.counts.source, 2);
        assert_eq!(graph.counts.template, 3);
        assert_eq!(graph.counts.combined(), 6);
    }

    #[test]
    fn self_include_is_dropped() {
        let dir = project(&[("src/core.cpp", "#include \"Core.h\"\n#include \"core.h\"\n")]);
        let graph = DependencyGraph::build(&ScanConfig::with_root(dir.path())).unwrap();
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let dir = project(&[("include/a.h", ""), ("include/b.h", ""), ("src/a.cpp", "")]);
        let mut cfg = ScanConfig::with_root(dir.path());
        cfg.dedup_nodes = true;
        let graph = DependencyGraph::build(&cfg).unwrap();
        assert_eq!(graph.nodes, vec!["a", "b"]);
        assert_eq!(graph.categories.get("a"), Some(&FileCategory::Header));
    }

    #[test]
    fn json_roundtrip_preserves_order() {
        let dir = project(&[("src/x.c", "#include \"y.h\"\n")]);
        let graph = DependencyGraph::build(&ScanConfig::with_root(dir.path())).unwrap();
        let out = dir.path().join("g.json");
        graph.save_json(&out).unwrap();
        let back = DependencyGraph::load_json(&out).unwrap();
        assert_eq!(back.nodes, graph.nodes);
        assert_eq!(back.edges, graph.edges);
        assert_eq!(back.counts, graph.counts);
    }
}
