pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::errors::ScanError;
    use crate::graph::FileCategory;
    use crate::parser::{IncludeMode, MalformedPolicy};

    pub const DEFAULT_CONFIG_NAME: &str = "include-graph.toml";
    pub const DEFAULT_OUTPUT: &str = "_graph.txt";

    /// On-disk configuration. Every key is optional; unset keys keep their defaults.
    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct FileConfig {
        pub root: Option<String>,
        pub folders: Option<Vec<String>>,
        pub ignore: Option<Vec<String>>,
        pub output: Option<String>,
        pub source_extensions: Option<Vec<String>>,
        pub header_extensions: Option<Vec<String>>,
        pub template_extensions: Option<Vec<String>>,
        pub mode: Option<IncludeMode>,
        pub on_malformed: Option<MalformedPolicy>,
        pub dedup_nodes: Option<bool>,
        pub wait_for_ack: Option<bool>,
    }

    /// Extensions per category, lowercase and without the leading dot.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Extensions {
        pub source: Vec<String>,
        pub header: Vec<String>,
        pub template: Vec<String>,
    }

    impl Default for Extensions {
        fn default() -> Self {
            Self {
                source: vec!["c".into(), "cpp".into()],
                header: vec!["h".into()],
                template: vec!["inl".into()],
            }
        }
    }

    /// Settings for one scan. Built once, then only borrowed.
    #[derive(Debug, Clone)]
    pub struct ScanConfig {
        pub root: PathBuf,
        pub folders: Vec<String>,
        pub ignore: Vec<String>,
        pub output: PathBuf,
        pub extensions: Extensions,
        pub mode: IncludeMode,
        pub on_malformed: MalformedPolicy,
        pub dedup_nodes: bool,
        pub wait_for_ack: bool,
    }

    impl ScanConfig {
        #[must_use]
        pub fn with_root(root: impl Into<PathBuf>) -> Self {
            Self {
                root: root.into(),
                folders: vec![".".into(), "include".into(), "src".into()],
                ignore: vec!["memtrace".into(), "gtest_lite".into()],
                output: PathBuf::from(DEFAULT_OUTPUT),
                extensions: Extensions::default(),
                mode: IncludeMode::default(),
                on_malformed: MalformedPolicy::default(),
                dedup_nodes: false,
                wait_for_ack: true,
            }
        }

        /// Overlay values present in `file`.
        #[must_use]
        pub fn merge_file(mut self, file: FileConfig) -> Self {
            if let Some(v) = file.root {
                self.root = PathBuf::from(v);
            }
            if let Some(v) = file.folders {
                self.folders = v;
            }
            if let Some(v) = file.ignore {
                self.ignore = v;
            }
            if let Some(v) = file.output {
                self.output = PathBuf::from(v);
            }
            if let Some(v) = file.source_extensions {
                self.extensions.source = normalize_extensions(v);
            }
            if let Some(v) = file.header_extensions {
                self.extensions.header = normalize_extensions(v);
            }
            if let Some(v) = file.template_extensions {
                self.extensions.template = normalize_extensions(v);
            }
            if let Some(v) = file.mode {
                self.mode = v;
            }
            if let Some(v) = file.on_malformed {
                self.on_malformed = v;
            }
            if let Some(v) = file.dedup_nodes {
                self.dedup_nodes = v;
            }
            if let Some(v) = file.wait_for_ack {
                self.wait_for_ack = v;
            }
            self
        }

        /// Category for `path` by extension, compared case-insensitively.
        #[must_use]
        pub fn category_of(&self, path: &Path) -> Option<FileCategory> {
            let ext = path.extension()?.to_str()?.to_lowercase();
            let has = |list: &[String]| list.iter().any(|e| *e == ext);
            if has(&self.extensions.source) {
                Some(FileCategory::Source)
            } else if has(&self.extensions.header) {
                Some(FileCategory::Header)
            } else if has(&self.extensions.template) {
                Some(FileCategory::Template)
            } else {
                None
            }
        }

        /// Exact, case-sensitive lookup of an already lowercased stem.
        #[must_use]
        pub fn is_ignored(&self, name: &str) -> bool {
            self.ignore.iter().any(|i| i == name)
        }
    }

    fn normalize_extensions(list: Vec<String>) -> Vec<String> {
        list.into_iter().map(|e| e.trim_start_matches('.').to_lowercase()).collect()
    }

    /// # Errors
    /// Returns `ScanError::Config` if the file cannot be read or is not valid TOML for `FileConfig`.
    pub fn load_config_at(path: &Path) -> Result<FileConfig, ScanError> {
        let data = fs::read_to_string(path).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str::<FileConfig>(&data).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Look for `include-graph.toml` directly in `root`.
    ///
    /// # Errors
    /// Propagates parse failures of a config file that exists.
    pub fn load_config_near(root: &Path) -> Result<Option<FileConfig>, ScanError> {
        let p = root.join(DEFAULT_CONFIG_NAME);
        if p.is_file() {
            load_config_at(&p).map(Some)
        } else {
            Ok(None)
        }
    }

}

pub mod file_walker {
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    use crate::errors::ScanError;

    /// Resolve `folders` against `root`, dropping the ones that do not exist.
    #[must_use]
    pub fn resolve_directories(root: &Path, folders: &[String]) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(folders.len());
        for folder in folders {
            let dir = if folder == "." { root.to_path_buf() } else { root.join(folder) };
            if dir.is_dir() {
                out.push(dir);
            } else {
                log::debug!("Skipping missing directory {}", dir.display());
            }
        }
        out
    }

    /// Regular files directly inside `dir`, sorted by file name.
    ///
    /// # Errors
    /// Returns `ScanError::Io` if the directory cannot be listed.
    pub fn files_in(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let mut out = Vec::new();
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ScanError::io(path, e.into())
            })?;
            if entry.file_type().is_file() {
                out.push(entry.into_path());
            }
        }
        Ok(out)
    }

}

pub mod anchor {
    use std::env;
    use std::path::{Path, PathBuf};

    /// Directory holding the running executable.
    #[must_use]
    pub fn executable_dir() -> Option<PathBuf> {
        let exe = env::current_exe().ok()?;
        exe.parent().map(Path::to_path_buf)
    }

    /// The scan root is the anchor's parent; a filesystem root anchors itself.
    #[must_use]
    pub fn scan_root_for(anchor: &Path) -> PathBuf {
        let anchor = anchor.canonicalize().unwrap_or_else(|_| anchor.to_path_buf());
        anchor.parent().map_or_else(|| anchor.clone(), Path::to_path_buf)
    }

    /// Scan root derived from the executable location, falling back to the current directory.
    #[must_use]
    pub fn detect() -> PathBuf {
        match executable_dir() {
            Some(dir) => scan_root_for(&dir),
            None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

}
