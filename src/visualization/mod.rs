use crate::errors::ScanError;
use crate::graph::{DependencyGraph, FileCategory};
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RankDir {
    #[default]
    #[value(name = "LR")]
    LR,
    #[value(name = "TB")]
    TB,
}

#[derive(Debug, Clone, Copy)]
pub struct DotOptions {
    pub rankdir: RankDir,
    pub legend: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self { rankdir: RankDir::LR, legend: true }
    }
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self { Self {} }

    #[must_use]
    pub fn generate_dot(&self, graph: &DependencyGraph) -> String {
        self.generate_dot_with_options(graph, DotOptions::default())
    }

    /// Nodes are emitted once each in first-seen order, then edge endpoints
    /// missing from the node list (scanned templates, or names never scanned),
    /// then edges in scan order (dependency -> dependent).
    #[must_use]
    pub fn generate_dot_with_options(&self, graph: &DependencyGraph, opts: DotOptions) -> String {
        let mut s = String::new();
        s.push_str("digraph includes\n{\n");
        let rank = match opts.rankdir { RankDir::LR => "LR", RankDir::TB => "TB" };
        let _ = write!(
            s,
            "  rankdir={rank};\n  node [shape=box, fontsize=10, style=\"filled,rounded\"];\n  edge [fontsize=9];\n"
        );

        let nodes = graph.unique_nodes();
        for name in &nodes {
            let fill = fill_for(graph.categories.get(*name).copied());
            let _ = writeln!(s, "  \"{}\" [fillcolor=\"{fill}\"];", escape_label(name));
        }

        // Endpoints without a node line.
        let mut dangling: Vec<&str> = Vec::new();
        for edge in &graph.edges {
            for end in [edge.dependency.as_str(), edge.dependent.as_str()] {
                if !nodes.contains(&end) && !dangling.contains(&end) {
                    dangling.push(end);
                }
            }
        }
        for name in &dangling {
            match graph.categories.get(*name) {
                Some(category) => {
                    let _ = writeln!(s, "  \"{}\" [fillcolor=\"{}\"];", escape_label(name), fill_for(Some(*category)));
                }
                None => {
                    let _ = writeln!(s, "  \"{}\" [fillcolor=\"{}\", style=\"dashed\"];", escape_label(name), fill_for(None));
                }
            }
        }

        for edge in &graph.edges {
            let _ = writeln!(
                s,
                "  \"{}\" -> \"{}\";",
                escape_label(&edge.dependency),
                escape_label(&edge.dependent)
            );
        }

        if opts.legend {
            s.push_str("  subgraph cluster_legend {\n    label=\"Legend\";\n    color=grey;\n");
            let _ = writeln!(s, "    \"legend_header\" [label=\"header\", fillcolor=\"{}\"];", fill_for(Some(FileCategory::Header)));
            let _ = writeln!(s, "    \"legend_source\" [label=\"source\", fillcolor=\"{}\"];", fill_for(Some(FileCategory::Source)));
            let _ = writeln!(s, "    \"legend_template\" [label=\"template\", fillcolor=\"{}\"];", fill_for(Some(FileCategory::Template)));
            let _ = writeln!(s, "    \"legend_unknown\" [label=\"not scanned\", fillcolor=\"{}\", style=\"dashed\"];", fill_for(None));
            s.push_str("  }\n");
        }
        s.push_str("}\n");
        s
    }

    /// # Errors
    /// Returns `ScanError::Output` if the file cannot be written.
    pub fn write_dot(&self, graph: &DependencyGraph, opts: DotOptions, path: &Path) -> Result<(), ScanError> {
        let content = self.generate_dot_with_options(graph, opts);
        std::fs::write(path, content).map_err(|e| ScanError::output(path, e))
    }
}

fn fill_for(category: Option<FileCategory>) -> &'static str {
    match category {
        Some(FileCategory::Header) => "#cfe2f3",
        Some(FileCategory::Source) => "#d9ead3",
        Some(FileCategory::Template) => "#fff2cc",
        None => "#eeeeee",
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
