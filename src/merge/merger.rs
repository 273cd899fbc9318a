//! Merge orchestration: scan, sort, then write title, metadata, table of
//! contents and bodies into a single markdown file.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::MergeError;
use super::headers::{MAX_LEVEL, extract_headers, rewrite_header_bytes, toc_line};
use super::observer::MergeObserver;
use super::scanner::{FileRecord, NameFilter, Scanner};
use super::sorter::{CustomOrder, SortOrder, load_custom_order, sort_files};
use crate::format::format_file_size;

pub const DEFAULT_OUTPUT: &str = "merged.md";
pub const DEFAULT_SEPARATOR: &str = "\n\n---\n\n";
pub const DEFAULT_TOC_DEPTH: usize = 3;
pub const DEFAULT_BASE_LEVEL: usize = 2;

/// Everything needed for one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub recursive: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub order: SortOrder,
    pub separator: String,
    pub include_metadata: bool,
    pub generate_toc: bool,
    /// Deepest source header level listed in the table of contents (1..=6).
    pub toc_depth: usize,
    pub adjust_headers: bool,
    /// Level that top-level source headers are shifted to (1..=6).
    pub base_level: usize,
    pub dry_run: bool,
    /// Command line recorded in the metadata block.
    pub invocation: Option<String>,
}

impl MergeRequest {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            recursive: false,
            include: Vec::new(),
            exclude: Vec::new(),
            order: SortOrder::Filename,
            separator: DEFAULT_SEPARATOR.to_string(),
            include_metadata: false,
            generate_toc: true,
            toc_depth: DEFAULT_TOC_DEPTH,
            adjust_headers: true,
            base_level: DEFAULT_BASE_LEVEL,
            dry_run: false,
            invocation: None,
        }
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if !(1..=MAX_LEVEL).contains(&self.toc_depth) {
            return Err(MergeError::Validation(format!(
                "TOC depth must be between 1 and {MAX_LEVEL}, got {}",
                self.toc_depth
            )));
        }
        if !(1..=MAX_LEVEL).contains(&self.base_level) {
            return Err(MergeError::Validation(format!(
                "base level must be between 1 and {MAX_LEVEL}, got {}",
                self.base_level
            )));
        }
        Ok(())
    }

    /// Base level the body is actually emitted with.
    const fn effective_base_level(&self) -> usize {
        if self.adjust_headers { self.base_level } else { 1 }
    }
}

/// One line of a dry-run manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub relative_path: String,
    pub size: u64,
}

/// What a dry run would merge, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
    pub output: PathBuf,
}

impl Manifest {
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[DRY RUN] Would process the following files:")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} ({})",
                i + 1,
                entry.relative_path,
                format_file_size(entry.size)
            )?;
        }
        writeln!(f, "[DRY RUN] Output file: {}", self.output.display())?;
        write!(
            f,
            "[DRY RUN] Total size: {}",
            format_file_size(self.total_size())
        )
    }
}

/// Result of a completed live merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub output: PathBuf,
    pub files: usize,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    DryRun(Manifest),
    Written(MergeReport),
}

/// Runs a [`MergeRequest`], reporting progress to an observer.
pub struct Merger<'a> {
    request: &'a MergeRequest,
    observer: &'a dyn MergeObserver,
}

impl<'a> Merger<'a> {
    pub fn new(request: &'a MergeRequest, observer: &'a dyn MergeObserver) -> Self {
        Self { request, observer }
    }

    pub fn run(&self) -> Result<MergeOutcome, MergeError> {
        let result = self.run_inner();
        if let Err(err) = &result {
            self.observer.merge_failed(err);
        }
        result
    }

    fn run_inner(&self) -> Result<MergeOutcome, MergeError> {
        let request = self.request;
        request.validate()?;

        debug!(
            directory = %request.source_dir.display(),
            output = %request.output.display(),
            order = ?request.order,
            recursive = request.recursive,
            "starting merge"
        );

        let files = self.collect_files()?;

        if request.dry_run {
            return Ok(MergeOutcome::DryRun(self.manifest(&files)));
        }

        self.write_document(&files).map(MergeOutcome::Written)
    }

    /// Scans and sorts the source directory.
    fn collect_files(&self) -> Result<Vec<FileRecord>, MergeError> {
        let request = self.request;
        let root = request.source_dir.as_path();

        self.observer.scan_started(root);
        let scanner = Scanner::new(
            root,
            request.recursive,
            NameFilter::new(&request.include, &request.exclude),
        );
        let files = scanner.scan()?;
        if files.is_empty() {
            return Err(MergeError::NoFiles(scanner.root().to_path_buf()));
        }
        self.observer.scan_finished(files.len());
        info!(count = files.len(), "found markdown files");

        let doc_order = load_custom_order(root, request.order)?;
        let custom = doc_order.as_ref().map(|order| CustomOrder { root, order });
        let sorted = sort_files(&files, request.order, custom);

        for (i, file) in sorted.iter().enumerate() {
            debug!("  {}. {} ({} bytes)", i + 1, file.relative_to(root), file.size);
        }

        Ok(sorted)
    }

    fn manifest(&self, files: &[FileRecord]) -> Manifest {
        Manifest {
            entries: files
                .iter()
                .map(|f| ManifestEntry {
                    relative_path: f.relative_to(&self.request.source_dir),
                    size: f.size,
                })
                .collect(),
            output: self.request.output.clone(),
        }
    }

    fn write_document(&self, files: &[FileRecord]) -> Result<MergeReport, MergeError> {
        let request = self.request;
        let output = request.output.as_path();

        let file = File::create(output).map_err(|e| MergeError::write(output, e))?;
        let mut writer = DocumentWriter {
            inner: BufWriter::new(file),
            path: output,
        };

        writer.write(&format!("# {}\n\n", document_title(output)))?;

        if request.include_metadata {
            writer.write(&self.metadata_block(files.len()))?;
        }

        if request.generate_toc {
            writer.write(&self.table_of_contents(files))?;
        }

        let total = files.len();
        for (i, file) in files.iter().enumerate() {
            self.observer.file_started(i + 1, total, file);
            self.write_body(&mut writer, file)?;

            if i + 1 < total {
                writer.write(&request.separator)?;
            }
        }

        writer.finish()?;

        let size = fs::metadata(output)
            .map_err(|e| MergeError::read(output, e))?
            .len();
        self.observer.merge_finished(output, size);

        Ok(MergeReport {
            output: output.to_path_buf(),
            files: total,
            size,
        })
    }

    fn metadata_block(&self, count: usize) -> String {
        let request = self.request;
        let directory = request.source_dir.display();
        let invocation = request
            .invocation
            .clone()
            .unwrap_or_else(|| format!("doc merge {directory}"));
        format!(
            "<!-- Generated by doc merge at {} -->\n\
             <!-- Source directory: {directory} -->\n\
             <!-- Files merged: {count} -->\n\
             <!-- Command: {invocation} -->\n\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        )
    }

    /// Builds the TOC block. Unreadable files contribute no entries; bytes
    /// that are not UTF-8 show up as replacement characters.
    fn table_of_contents(&self, files: &[FileRecord]) -> String {
        let request = self.request;
        let base_level = request.effective_base_level();
        let mut toc = String::from("## Table of Contents\n\n");

        for file in files {
            let content = match fs::read(&file.path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    warn!(path = %file.path.display(), "skipping file in table of contents: {err}");
                    continue;
                }
            };

            for header in extract_headers(&content, request.toc_depth) {
                if let Some(line) = toc_line(&header, base_level, request.toc_depth) {
                    toc.push_str(&line);
                    toc.push('\n');
                }
            }
        }

        toc.push('\n');
        toc
    }

    fn write_body(
        &self,
        writer: &mut DocumentWriter<'_>,
        file: &FileRecord,
    ) -> Result<(), MergeError> {
        let request = self.request;

        if request.include_metadata {
            writer.write(&format!(
                "<!-- Source: {} -->\n",
                file.relative_to(&request.source_dir)
            ))?;
        }

        // Raw bytes, so files in other encodings are merged unchanged.
        let content = fs::read(&file.path).map_err(|e| MergeError::read(&file.path, e))?;
        let content = if request.adjust_headers {
            rewrite_header_bytes(&content, request.base_level)
        } else {
            content
        };

        writer.write_bytes(&content)?;
        if content.last() != Some(&b'\n') {
            writer.write("\n")?;
        }
        Ok(())
    }
}

struct DocumentWriter<'p> {
    inner: BufWriter<File>,
    path: &'p Path,
}

impl DocumentWriter<'_> {
    fn write(&mut self, text: &str) -> Result<(), MergeError> {
        self.write_bytes(text.as_bytes())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), MergeError> {
        self.inner
            .write_all(bytes)
            .map_err(|e| MergeError::write(self.path, e))
    }

    fn finish(mut self) -> Result<(), MergeError> {
        self.inner.flush().map_err(|e| MergeError::write(self.path, e))
    }
}

/// Title for the merged document, derived from the output file name.
///
/// `merged.md` becomes `Document`; otherwise `_` and `-` turn into spaces and
/// every word is capitalized (`api_reference-v2.md` -> `Api Reference V2`).
pub fn document_title(output: &Path) -> String {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem == "merged" {
        return "Document".to_string();
    }

    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::merge::observer::NoopObserver;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn write_files(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            let path = dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    fn request_for(source: &TempDir, out: &TempDir, name: &str) -> MergeRequest {
        let mut request = MergeRequest::new(source.path());
        request.output = out.path().join(name);
        request
    }

    #[test]
    fn test_document_title() {
        assert_eq!(document_title(Path::new("merged.md")), "Document");
        assert_eq!(document_title(Path::new("out/merged.md")), "Document");
        assert_eq!(document_title(Path::new("user_guide.md")), "User Guide");
        assert_eq!(document_title(Path::new("API-reference.md")), "Api Reference");
        assert_eq!(document_title(Path::new("book")), "Book");
    }

    #[test]
    fn test_validate_rejects_out_of_range_levels() {
        let mut request = MergeRequest::new("docs");
        request.toc_depth = 0;
        assert!(matches!(request.validate(), Err(MergeError::Validation(_))));

        let mut request = MergeRequest::new("docs");
        request.base_level = 7;
        assert!(matches!(request.validate(), Err(MergeError::Validation(_))));

        assert!(MergeRequest::new("docs").validate().is_ok());
    }

    #[test]
    fn test_merge_two_files() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("a.md", "# A\nbody"), ("b.md", "## B\nbody")]);

        let request = request_for(&source, &out, "merged.md");
        let outcome = Merger::new(&request, &NoopObserver).run().unwrap();

        let written = fs::read_to_string(&request.output).unwrap();
        assert_eq!(
            written,
            "# Document\n\n\
             ## Table of Contents\n\n\
             - [A](#a)\n\
             \x20\x20- [B](#b)\n\n\
             ## A\nbody\n\
             \n\n---\n\n\
             ### B\nbody\n"
        );

        let MergeOutcome::Written(report) = outcome else {
            panic!("expected a written merge");
        };
        assert_eq!(report.files, 2);
        assert_eq!(report.size, written.len() as u64);
    }

    #[test]
    fn test_no_toc_and_no_adjust() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("a.md", "# A\n")]);

        let mut request = request_for(&source, &out, "notes.md");
        request.generate_toc = false;
        request.adjust_headers = false;
        Merger::new(&request, &NoopObserver).run().unwrap();

        assert_eq!(
            fs::read_to_string(&request.output).unwrap(),
            "# Notes\n\n# A\n"
        );
    }

    #[test]
    fn test_toc_follows_unadjusted_levels() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("a.md", "# A\n## B\n### C\n")]);

        let mut request = request_for(&source, &out, "merged.md");
        request.adjust_headers = false;
        request.toc_depth = 2;
        Merger::new(&request, &NoopObserver).run().unwrap();

        let written = fs::read_to_string(&request.output).unwrap();
        assert!(written.contains("- [A](#a)\n- [B](#b)\n\n"));
        assert!(!written.contains("[C]"));
    }

    #[test]
    fn test_metadata_comments() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("a.md", "text\n"), ("sub/b.md", "more\n")]);

        let mut request = request_for(&source, &out, "merged.md");
        request.recursive = true;
        request.include_metadata = true;
        request.generate_toc = false;
        request.separator = "\n".to_string();
        request.invocation = Some("doc merge docs -r".to_string());
        Merger::new(&request, &NoopObserver).run().unwrap();

        let written = fs::read_to_string(&request.output).unwrap();
        assert!(written.contains("<!-- Generated by doc merge at "));
        assert!(written.contains("<!-- Files merged: 2 -->"));
        assert!(written.contains("<!-- Command: doc merge docs -r -->"));
        assert!(written.ends_with("<!-- Source: a.md -->\ntext\n\n<!-- Source: sub/b.md -->\nmore\n"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("b.md", "12345"), ("a.md", "1234")]);

        let mut request = request_for(&source, &out, "merged.md");
        request.dry_run = true;
        let outcome = Merger::new(&request, &NoopObserver).run().unwrap();

        assert!(!request.output.exists());
        let MergeOutcome::DryRun(manifest) = outcome else {
            panic!("expected a dry run");
        };
        assert_eq!(manifest.total_size(), 9);
        let text = manifest.to_string();
        assert!(text.contains("  1. a.md (4 B)\n  2. b.md (5 B)\n"));
        assert!(text.ends_with("[DRY RUN] Total size: 9 B"));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("notes.txt", "x")]);

        let request = request_for(&source, &out, "merged.md");
        let err = Merger::new(&request, &NoopObserver).run().unwrap_err();

        assert!(matches!(err, MergeError::NoFiles(_)));
        assert!(!request.output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let source = TempDir::new().unwrap();
        write_files(source.path(), &[("a.md", "# A\n")]);

        let mut request = MergeRequest::new(source.path());
        request.output = source.path().join("missing-dir").join("out.md");
        let err = Merger::new(&request, &NoopObserver).run().unwrap_err();

        assert!(matches!(err, MergeError::Write { .. }));
    }

    #[test]
    fn test_non_utf8_file_is_merged_unchanged() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(source.path().join("a.md"), b"# Caf\xe9\nbody\n").unwrap();
        fs::write(source.path().join("b.md"), "# B\n").unwrap();

        let request = request_for(&source, &out, "merged.md");
        Merger::new(&request, &NoopObserver).run().unwrap();

        assert_eq!(
            fs::read(&request.output).unwrap(),
            b"# Document\n\n\
              ## Table of Contents\n\n\
              - [Caf\xef\xbf\xbd](#caf)\n\
              - [B](#b)\n\n\
              ## Caf\xe9\nbody\n\
              \n\n---\n\n\
              ## B\n"
        );
    }

    /// Replaces one source file with a directory once scanning is done, so
    /// it can no longer be read.
    struct BreakAfterScan {
        victim: PathBuf,
    }

    impl MergeObserver for BreakAfterScan {
        fn scan_finished(&self, _count: usize) {
            fs::remove_file(&self.victim).unwrap();
            fs::create_dir(&self.victim).unwrap();
        }
    }

    #[test]
    fn test_unreadable_file_skips_toc_but_fails_body() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("a.md", "# A\n"), ("b.md", "# B\n")]);

        let request = request_for(&source, &out, "merged.md");
        let observer = BreakAfterScan {
            victim: source.path().join("b.md"),
        };
        let err = Merger::new(&request, &observer).run().unwrap_err();

        let MergeError::Read { path, .. } = &err else {
            panic!("expected a read error, got {err:?}");
        };
        assert_eq!(path, &source.path().join("b.md"));

        let partial = fs::read_to_string(&request.output).unwrap();
        assert_eq!(
            partial,
            "# Document\n\n## Table of Contents\n\n- [A](#a)\n\n## A\n\n\n---\n\n"
        );
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl MergeObserver for Recorder {
        fn scan_finished(&self, count: usize) {
            self.events.borrow_mut().push(format!("scanned {count}"));
        }

        fn file_started(&self, index: usize, total: usize, file: &FileRecord) {
            self.events
                .borrow_mut()
                .push(format!("{index}/{total} {}", file.name));
        }

        fn merge_finished(&self, _output: &Path, _size: u64) {
            self.events.borrow_mut().push("done".to_string());
        }

        fn merge_failed(&self, _error: &MergeError) {
            self.events.borrow_mut().push("failed".to_string());
        }
    }

    #[test]
    fn test_observer_sees_each_file() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_files(source.path(), &[("b.md", "b"), ("a.md", "a")]);

        let request = request_for(&source, &out, "merged.md");
        let recorder = Recorder::default();
        Merger::new(&request, &recorder).run().unwrap();

        assert_eq!(
            *recorder.events.borrow(),
            vec!["scanned 2", "1/2 a.md", "2/2 b.md", "done"]
        );
    }

    #[test]
    fn test_observer_notified_on_failure() {
        let recorder = Recorder::default();
        let request = MergeRequest::new("/non/existent/path");
        assert!(Merger::new(&request, &recorder).run().is_err());
        assert_eq!(*recorder.events.borrow(), vec!["failed"]);
    }
}
