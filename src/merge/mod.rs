//! Markdown directory merging.
//!
//! The pipeline is [`Scanner`] -> [`sort_files`] -> [`Merger`], with header
//! extraction and rewriting in [`headers`].

mod error;
pub mod headers;
mod merger;
mod observer;
mod scanner;
mod sorter;

pub use error::MergeError;
pub use headers::{
    HeaderEntry, extract_headers, rewrite_header_bytes, rewrite_header_levels, slugify,
};
pub use merger::{
    DEFAULT_BASE_LEVEL, DEFAULT_OUTPUT, DEFAULT_SEPARATOR, DEFAULT_TOC_DEPTH, Manifest,
    ManifestEntry, MergeOutcome, MergeReport, MergeRequest, Merger, document_title,
};
pub use observer::{MergeObserver, NoopObserver};
pub use scanner::{FileRecord, NameFilter, Scanner};
pub use sorter::{CustomOrder, DOC_ORDER_FILE, DocOrder, SortOrder, load_custom_order, sort_files};
