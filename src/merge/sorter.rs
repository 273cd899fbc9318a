//! Ordering of scanned files.

use std::fs;
use std::io;
use std::path::Path;

use clap::ValueEnum;
use tracing::{debug, warn};

use super::error::MergeError;
use super::scanner::FileRecord;

/// Name of the order-definition file read for [`SortOrder::Custom`].
pub const DOC_ORDER_FILE: &str = ".docorder";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Ascending by file name
    #[default]
    #[value(alias = "name")]
    Filename,
    /// Oldest modification time first
    Modified,
    /// Smallest file first
    Size,
    /// Order listed in the directory's .docorder file
    Custom,
}

impl SortOrder {
    /// Parses an order name, falling back to [`SortOrder::Filename`] for
    /// anything unrecognized.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_str(name, true).unwrap_or_else(|_| {
            warn!(order = name, "unknown sort order, using filename ordering");
            Self::Filename
        })
    }
}

/// Entries of a `.docorder` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocOrder {
    entries: Vec<String>,
}

impl DocOrder {
    /// Parses order-file content. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.trim_start_matches("./").to_string())
            .collect();
        Self { entries }
    }

    /// Loads `<root>/.docorder`, returning `Ok(None)` when it does not exist.
    pub fn load(root: &Path) -> Result<Option<Self>, MergeError> {
        let path = root.join(DOC_ORDER_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(MergeError::read(path, err)),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Source of custom ordering for [`sort_files`].
#[derive(Debug, Clone, Copy)]
pub struct CustomOrder<'a> {
    pub root: &'a Path,
    pub order: &'a DocOrder,
}

/// Returns a sorted copy of `files`. The input is left untouched.
///
/// All orderings are stable. `Custom` without an order file behaves like
/// `Filename`.
pub fn sort_files(
    files: &[FileRecord],
    order: SortOrder,
    custom: Option<CustomOrder<'_>>,
) -> Vec<FileRecord> {
    let mut sorted = files.to_vec();

    match order {
        SortOrder::Filename => sort_by_name(&mut sorted),
        SortOrder::Modified => sorted.sort_by_key(|f| f.modified),
        SortOrder::Size => sorted.sort_by_key(|f| f.size),
        SortOrder::Custom => match custom {
            Some(custom) => return sort_custom(sorted, custom),
            None => {
                debug!("no order file available, using filename ordering");
                sort_by_name(&mut sorted);
            }
        },
    }

    sorted
}

fn sort_by_name(files: &mut [FileRecord]) {
    files.sort_by(|a, b| a.name.cmp(&b.name));
}

fn sort_custom(mut remaining: Vec<FileRecord>, custom: CustomOrder<'_>) -> Vec<FileRecord> {
    sort_by_name(&mut remaining);

    let mut ordered = Vec::with_capacity(remaining.len());
    for entry in custom.order.entries() {
        let position = remaining
            .iter()
            .position(|f| f.relative_to(custom.root) == *entry)
            .or_else(|| remaining.iter().position(|f| f.name == *entry));

        match position {
            Some(index) => ordered.push(remaining.remove(index)),
            None => debug!(entry = %entry, "order file entry matched no scanned file"),
        }
    }

    ordered.extend(remaining);
    ordered
}

/// Resolves the custom ordering for `root` when `order` needs one.
pub fn load_custom_order(root: &Path, order: SortOrder) -> Result<Option<DocOrder>, MergeError> {
    if order != SortOrder::Custom {
        return Ok(None);
    }
    let loaded = DocOrder::load(root)?;
    if loaded.is_none() {
        warn!(
            path = %root.join(DOC_ORDER_FILE).display(),
            "custom order requested but no order file found, using filename ordering"
        );
    }
    Ok(loaded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn record(rel: &str, secs: u64, size: u64) -> FileRecord {
        let path = PathBuf::from("/docs").join(rel);
        FileRecord {
            name: path.file_name().unwrap().to_string_lossy().into_owned(),
            path,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
            size,
        }
    }

    fn names(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    fn sample() -> Vec<FileRecord> {
        vec![
            record("c.md", 10, 300),
            record("a.md", 30, 100),
            record("b.md", 20, 200),
        ]
    }

    #[test]
    fn test_sort_by_filename() {
        let sorted = sort_files(&sample(), SortOrder::Filename, None);
        assert_eq!(names(&sorted), vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn test_sort_by_modified() {
        let sorted = sort_files(&sample(), SortOrder::Modified, None);
        assert_eq!(names(&sorted), vec!["c.md", "b.md", "a.md"]);
    }

    #[test]
    fn test_sort_by_size() {
        let sorted = sort_files(&sample(), SortOrder::Size, None);
        assert_eq!(names(&sorted), vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let files = sample();
        let _ = sort_files(&files, SortOrder::Size, None);
        assert_eq!(names(&files), vec!["c.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        for order in SortOrder::value_variants() {
            let once = sort_files(&sample(), *order, None);
            let twice = sort_files(&once, *order, None);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let files = vec![
            record("x/same.md", 5, 10),
            record("y/same.md", 5, 10),
            record("z/same.md", 5, 10),
        ];
        for order in [SortOrder::Filename, SortOrder::Modified, SortOrder::Size] {
            let sorted = sort_files(&files, order, None);
            assert_eq!(sorted, files);
        }
    }

    #[test]
    fn test_custom_without_order_file_falls_back_to_filename() {
        let sorted = sort_files(&sample(), SortOrder::Custom, None);
        assert_eq!(names(&sorted), vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn test_custom_lists_first_then_unlisted_by_name() {
        let order = DocOrder::parse("# book order\n\nc.md\n./b.md\nmissing.md\n");
        let custom = CustomOrder {
            root: Path::new("/docs"),
            order: &order,
        };
        let mut files = sample();
        files.push(record("0-intro.md", 0, 1));
        let sorted = sort_files(&files, SortOrder::Custom, Some(custom));
        assert_eq!(names(&sorted), vec!["c.md", "b.md", "0-intro.md", "a.md"]);
    }

    #[test]
    fn test_custom_matches_relative_paths() {
        let order = DocOrder::parse("part2/same.md\npart1/same.md\n");
        let custom = CustomOrder {
            root: Path::new("/docs"),
            order: &order,
        };
        let files = vec![record("part1/same.md", 0, 1), record("part2/same.md", 0, 1)];
        let sorted = sort_files(&files, SortOrder::Custom, Some(custom));
        assert_eq!(sorted[0].path, PathBuf::from("/docs/part2/same.md"));
        assert_eq!(sorted[1].path, PathBuf::from("/docs/part1/same.md"));
    }

    #[test]
    fn test_doc_order_parse_skips_blanks_and_comments() {
        let order = DocOrder::parse("  intro.md  \n# note\n\n  \nend.md");
        assert_eq!(order.entries(), ["intro.md", "end.md"]);
    }

    #[test]
    fn test_load_custom_order() {
        let dir = TempDir::new().unwrap();
        assert!(load_custom_order(dir.path(), SortOrder::Custom).unwrap().is_none());

        std::fs::write(dir.path().join(DOC_ORDER_FILE), "b.md\n").unwrap();
        let loaded = load_custom_order(dir.path(), SortOrder::Custom).unwrap().unwrap();
        assert_eq!(loaded.entries(), ["b.md"]);

        assert!(load_custom_order(dir.path(), SortOrder::Size).unwrap().is_none());
    }

    #[test]
    fn test_from_name_or_default() {
        assert_eq!(SortOrder::from_name_or_default("size"), SortOrder::Size);
        assert_eq!(SortOrder::from_name_or_default("name"), SortOrder::Filename);
        assert_eq!(SortOrder::from_name_or_default("MODIFIED"), SortOrder::Modified);
        assert_eq!(SortOrder::from_name_or_default("random"), SortOrder::Filename);
    }
}
