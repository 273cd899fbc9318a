use std::cell::OnceCell;
use std::path::Path;

use super::{Spinner, Style};
use crate::format::format_file_size;
use crate::merge::{FileRecord, MergeError, MergeObserver};

/// Reports merge progress with a spinner on stderr.
///
/// The spinner is created on the first notification so that a merge which
/// fails validation prints nothing.
#[derive(Default)]
pub struct SpinnerObserver {
    spinner: OnceCell<Spinner>,
}

impl SpinnerObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(&self, message: &str) -> &Spinner {
        let spinner = self.spinner.get_or_init(|| Spinner::new(message));
        spinner.set_message(message);
        spinner
    }

    fn stop(&self) {
        if let Some(spinner) = self.spinner.get() {
            spinner.stop();
        }
    }
}

impl MergeObserver for SpinnerObserver {
    fn scan_started(&self, root: &Path) {
        self.spinner(&format!("Scanning {}...", root.display()));
    }

    fn scan_finished(&self, count: usize) {
        self.spinner(&format!("Found {count} markdown files"));
    }

    fn file_started(&self, index: usize, total: usize, file: &FileRecord) {
        self.spinner(&format!(
            "Merging files... ({index}/{total}) - {}",
            file.name
        ));
    }

    fn merge_finished(&self, output: &Path, size: u64) {
        self.stop();
        eprintln!(
            "{} Merge completed - Output: {} ({})",
            Style::success("✓"),
            Style::value(output.display()),
            Style::secondary(format_file_size(size))
        );
    }

    fn merge_failed(&self, _error: &MergeError) {
        self.stop();
    }
}
