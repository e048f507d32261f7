use crate::errors::ScanError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// How include lines are recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IncludeMode {
    /// Any line containing `include` and a `"` counts; the first quoted run is the dependency.
    #[default]
    Heuristic,
    /// Only `#include "..."` directives count.
    Directive,
}

/// What to do with a line whose opening quote is never closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    #[default]
    Fail,
    Skip,
}

/// Outcome of inspecting a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    NoInclude,
    Dependency(String),
    /// An include with an empty quoted name (`""`).
    Empty,
    Malformed,
}

#[derive(Debug)]
pub struct RegexPatterns {
    pub directive: Regex,
    pub unterminated_directive: Regex,
}

impl RegexPatterns {
    pub fn compile() -> Self {
        let directive = Regex::new(r#"^\s*#\s*include\s*"(?P<name>[^"]*)""#).unwrap();
        let unterminated_directive = Regex::new(r#"^\s*#\s*include\s*"[^"]*$"#).unwrap();
        Self { directive, unterminated_directive }
    }
}

impl Default for RegexPatterns {
    fn default() -> Self { Self::compile() }
}

#[derive(Debug)]
pub struct IncludeParser {
    mode: IncludeMode,
    patterns: RegexPatterns,
    header_suffixes: Vec<String>,
}

impl Default for IncludeParser {
    fn default() -> Self { Self::new(IncludeMode::default(), &["h".to_string()]) }
}

impl IncludeParser {
    /// `header_extensions` are given without the leading dot (`"h"`).
    #[must_use]
    pub fn new(mode: IncludeMode, header_extensions: &[String]) -> Self {
        let header_suffixes = header_extensions.iter().map(|e| format!(".{e}")).collect();
        Self { mode, patterns: RegexPatterns::compile(), header_suffixes }
    }

    #[must_use]
    pub fn mode(&self) -> IncludeMode { self.mode }

    #[must_use]
    pub fn scan_line(&self, line: &str) -> LineMatch {
        match self.mode {
            IncludeMode::Heuristic => self.scan_heuristic(line),
            IncludeMode::Directive => self.scan_directive(line),
        }
    }

    fn scan_heuristic(&self, line: &str) -> LineMatch {
        if !(line.contains("include") && line.contains('"')) {
            return LineMatch::NoInclude;
        }
        let mut parts = line.splitn(3, '"');
        let _before = parts.next();
        let quoted = parts.next().unwrap_or("");
        if parts.next().is_none() {
            return LineMatch::Malformed;
        }
        self.normalize(quoted)
    }

    fn scan_directive(&self, line: &str) -> LineMatch {
        if let Some(cap) = self.patterns.directive.captures(line) {
            let name = cap.name("name").map_or("", |m| m.as_str());
            return self.normalize(name);
        }
        if self.patterns.unterminated_directive.is_match(line) {
            return LineMatch::Malformed;
        }
        LineMatch::NoInclude
    }

    fn normalize(&self, quoted: &str) -> LineMatch {
        let name = strip_header_suffix(quoted, &self.header_suffixes).to_lowercase();
        if name.is_empty() { LineMatch::Empty } else { LineMatch::Dependency(name) }
    }

    /// Collect the dependency names referenced by `content`, in line order.
    ///
    /// # Errors
    /// Returns `ScanError::MalformedInclude` for the first unterminated quote when
    /// `policy` is `MalformedPolicy::Fail`.
    pub fn dependencies(
        &self,
        content: &str,
        file: &Path,
        policy: MalformedPolicy,
    ) -> Result<Vec<String>, ScanError> {
        let mut out = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            match self.scan_line(line) {
                LineMatch::NoInclude => {}
                LineMatch::Dependency(name) => out.push(name),
                LineMatch::Empty => {
                    log::debug!("{}:{}: empty include name, no edge", file.display(), idx + 1);
                }
                LineMatch::Malformed => match policy {
                    MalformedPolicy::Fail => {
                        return Err(ScanError::MalformedInclude {
                            file: file.to_path_buf(),
                            line_number: idx + 1,
                            line: line.to_string(),
                        });
                    }
                    MalformedPolicy::Skip => {
                        log::warn!("{}:{}: skipping malformed include", file.display(), idx + 1);
                    }
                },
            }
        }
        Ok(out)
    }
}

// Only one trailing suffix is removed; the match is case-sensitive.
fn strip_header_suffix<'a>(name: &'a str, suffixes: &[String]) -> &'a str {
    for suffix in suffixes {
        if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
            return stripped;
        }
    }
    name
}
