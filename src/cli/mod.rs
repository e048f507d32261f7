use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::parser::{IncludeMode, MalformedPolicy};
use crate::visualization::RankDir;

#[derive(Debug, Parser)]
#[command(
    name = "include-graph",
    version,
    about = "Extract quoted #include relationships from a C/C++ tree",
    long_about = "Scan the root, include/ and src/ folders of a C/C++ project (direct children only) for .c/.cpp/.h/.inl files, write a node and edge list for graph viewers to _graph.txt in the current directory, and print line counts per file category. Without --root the scan root is the parent of the directory holding this executable.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Suppress the root line, node echo and summary
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,
    #[command(flatten)]
    pub scan: ScanArgs,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Directory whose `.`, `include` and `src` folders are scanned
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Graph text output, relative to the current directory
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Path to a TOML configuration file (default: include-graph.toml in the root)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Include detection: any line with `include` and a quote, or `#include "..."` only
    #[arg(long, value_enum)]
    pub mode: Option<IncludeMode>,
    /// Behaviour on a line with an unterminated quote
    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedPolicy>,
    /// Keep only the first occurrence of each node name
    #[arg(long, default_value_t = false)]
    pub dedup_nodes: bool,
    /// Also write the graph and line counts as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
    /// Also write a Graphviz DOT file
    #[arg(long, value_name = "PATH")]
    pub dot: Option<PathBuf>,
    /// DOT: rank direction
    #[arg(long, value_enum)]
    pub dot_rankdir: Option<RankDir>,
    /// Do not wait for a line on stdin before exiting
    #[arg(long, default_value_t = false)]
    pub no_wait: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_a_scan() {
        let cli = Cli::try_parse_from(["include-graph"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.scan.root.is_none());
        assert!(!cli.scan.no_wait);
    }

    #[test]
    fn enum_flags_parse() {
        let cli = Cli::try_parse_from([
            "include-graph",
            "--mode",
            "directive",
            "--on-malformed",
            "skip",
            "--dot-rankdir",
            "TB",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.scan.mode, Some(IncludeMode::Directive));
        assert_eq!(cli.scan.on_malformed, Some(MalformedPolicy::Skip));
        assert_eq!(cli.scan.dot_rankdir, Some(RankDir::TB));
        assert!(cli.quiet);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["include-graph", "-q", "-v"]).is_err());
    }
}
