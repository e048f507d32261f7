use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ScanError;
use crate::graph::{DependencyGraph, FileCategory};
use crate::parser::IncludeParser;
use crate::utils::config::ScanConfig;
use crate::utils::file_walker;

/// Lowercased file stem, the name a file goes by in the graph.
#[must_use]
pub fn node_name(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_lowercase()).unwrap_or_default()
}

/// Header pass: every non-ignored header becomes a node, reported through `on_node`.
///
/// # Errors
/// Returns `ScanError::Io` if a directory cannot be listed.
pub fn collect_nodes<F>(
    graph: &mut DependencyGraph,
    config: &ScanConfig,
    dirs: &[PathBuf],
    mut on_node: F,
) -> Result<(), ScanError>
where
    F: FnMut(&str),
{
    for dir in dirs {
        for path in file_walker::files_in(dir)? {
            if config.category_of(&path) != Some(FileCategory::Header) {
                continue;
            }
            let name = node_name(&path);
            if config.is_ignored(&name) {
                log::debug!("Ignoring header {}", path.display());
                continue;
            }
            graph.push_node(&name, FileCategory::Header);
            on_node(&name);
        }
    }
    Ok(())
}

/// Include pass: counts lines per category and records include edges.
/// Source and header files are appended to the node list again.
///
/// # Errors
/// Returns `ScanError` on unreadable or non UTF-8 files and on malformed includes
/// under `MalformedPolicy::Fail`.
pub fn scan_files(
    graph: &mut DependencyGraph,
    config: &ScanConfig,
    dirs: &[PathBuf],
) -> Result<(), ScanError> {
    let parser = IncludeParser::new(config.mode, &config.extensions.header);
    for dir in dirs {
        for path in file_walker::files_in(dir)? {
            let Some(category) = config.category_of(&path) else {
                continue;
            };
            let name = node_name(&path);
            if config.is_ignored(&name) {
                continue;
            }
            // Headers were already listed by the header pass.
            match category {
                FileCategory::Source => graph.push_node(&name, category),
                FileCategory::Header | FileCategory::Template => graph.note_category(&name, category),
            }

            let content = read_source(&path)?;
            graph.counts.add(category, count_lines(&content));

            for dependency in parser.dependencies(&content, &path, config.on_malformed)? {
                if !graph.push_edge(dependency, &name) {
                    log::debug!("{}: skipping self include", path.display());
                }
            }
        }
    }
    Ok(())
}

/// Line count with `\n`, `\r\n` and a lone `\r` all ending a line.
/// An unterminated last line still counts.
#[must_use]
pub fn count_lines(content: &str) -> usize {
    let bytes = content.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => count += 1,
            _ => {}
        }
        i += 1;
    }
    if !matches!(bytes.last(), None | Some(b'\n' | b'\r')) {
        count += 1;
    }
    count
}

fn read_source(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path).map_err(|e| ScanError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| ScanError::InvalidUtf8 { file: path.to_path_buf() })
}
