//! Directory scanning for markdown sources.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::error::MergeError;

/// A markdown file discovered by [`Scanner::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Full path (the scan root joined with the relative location).
    pub path: PathBuf,
    /// Base file name, e.g. `intro.md`.
    pub name: String,
    pub modified: SystemTime,
    pub size: u64,
}

impl FileRecord {
    /// Path relative to `root`, always `/`-separated.
    ///
    /// Falls back to the full path when the record does not live under `root`.
    pub fn relative_to(&self, root: &Path) -> String {
        let relative = self.path.strip_prefix(root).unwrap_or(&self.path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Include/exclude filter applied to base file names.
///
/// Patterns use shell wildcard syntax (`*`, `?`, `[...]`). A pattern that does
/// not compile never matches.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include: Vec<Pattern>,
    restrict: bool,
    exclude: Vec<Pattern>,
}

impl NameFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: compile(include),
            restrict: !include.is_empty(),
            exclude: compile(exclude),
        }
    }

    /// Returns `true` if `name` is a markdown file name that passes the filter.
    pub fn accepts(&self, name: &str) -> bool {
        if !is_markdown(name) {
            return false;
        }
        if self.restrict && !self.include.iter().any(|p| p.matches(name)) {
            return false;
        }
        !self.exclude.iter().any(|p| p.matches(name))
    }
}

fn compile(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|raw| match Pattern::new(raw) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                warn!(pattern = %raw, "ignoring invalid glob pattern: {err}");
                None
            }
        })
        .collect()
}

fn is_markdown(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".md")
}

/// Walks a directory collecting markdown files.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    recursive: bool,
    filter: NameFilter,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, recursive: bool, filter: NameFilter) -> Self {
        Self {
            root: root.into(),
            recursive,
            filter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns every accepted regular file under the root.
    ///
    /// The order of the result is whatever the walk produced; callers sort.
    pub fn scan(&self) -> Result<Vec<FileRecord>, MergeError> {
        if !self.root.is_dir() {
            return Err(MergeError::DirectoryNotFound(self.root.clone()));
        }

        debug!(root = %self.root.display(), recursive = self.recursive, "scanning");

        let mut walker = WalkDir::new(&self.root);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| MergeError::Scan {
                path: self.root.clone(),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.filter.accepts(&name) {
                continue;
            }

            let metadata = entry.metadata().map_err(|source| MergeError::Scan {
                path: entry.path().to_path_buf(),
                source,
            })?;

            files.push(FileRecord {
                path: entry.into_path(),
                name,
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                size: metadata.len(),
            });
        }

        debug!(count = files.len(), "scan finished");
        Ok(files)
    }
}
