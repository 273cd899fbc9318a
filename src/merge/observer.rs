use std::path::Path;

use super::error::MergeError;
use super::scanner::FileRecord;

/// Receives progress notifications from [`Merger`](super::Merger).
///
/// Notifications are a side channel; nothing an observer does affects the
/// merged output. All methods default to doing nothing.
pub trait MergeObserver {
    fn scan_started(&self, _root: &Path) {}

    fn scan_finished(&self, _count: usize) {}

    /// Called before file `index` (1-based) of `total` is written.
    fn file_started(&self, _index: usize, _total: usize, _file: &FileRecord) {}

    fn merge_finished(&self, _output: &Path, _size: u64) {}

    fn merge_failed(&self, _error: &MergeError) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {}
