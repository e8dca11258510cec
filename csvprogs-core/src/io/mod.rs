//! CSV adapters between byte streams and [`Row`](crate::Row)s.
//!
//! - `reader`: [`CsvSource`], a [`RowSource`](crate::RowSource) over any `Read`.
//! - `writer`: [`CsvSink`], projects rows onto a fixed header and writes them out.
//!
//! Both honour a [`CsvDialect`](csvprogs_types::CsvDialect): delimiters, text
//! encoding, and (for output) the row terminator.
mod reader;
mod writer;

use std::path::Path;

pub use reader::CsvSource;
pub use writer::CsvSink;

/// True when `path` names the process's standard stream (`-`).
#[must_use]
pub fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}
