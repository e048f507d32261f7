use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Invalid UTF-8 in file {file}")]
    InvalidUtf8 { file: PathBuf },

    #[error("Malformed include in {file}:{line_number}: unterminated quote in `{line}`")]
    MalformedInclude { file: PathBuf, line_number: usize, line: String },

    #[error("Failed to write output {path}: {source}")]
    Output { path: PathBuf, source: std::io::Error },

    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("JSON encode error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output { path: path.into(), source }
    }
}
