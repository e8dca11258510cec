// Shared fixtures for the command-line tests: `use helpers::*;`
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// first.csv from the csvfill manual page.
pub const FIRST: &str = "time,close\r\n\
2015-04-15T15:00,26.98\r\n\
2015-04-16T15:00,27.04\r\n\
2015-04-17T15:00,27.77\r\n";

/// second.csv from the csvfill manual page.
pub const SECOND: &str = "time,position\r\n\
2015-04-15T12:00,1\r\n\
2015-04-15T12:30,-1\r\n\
2015-04-15T12:45,1\r\n\
2015-04-15T14:45,-1\r\n\
2015-04-16T09:30,1\r\n";

/// `csvmerge -k time first.csv second.csv`
pub const MERGED: &str = "time,close,position\r\n\
2015-04-15T12:00,,1\r\n\
2015-04-15T12:30,,-1\r\n\
2015-04-15T12:45,,1\r\n\
2015-04-15T14:45,,-1\r\n\
2015-04-15T15:00,26.98,\r\n\
2015-04-16T09:30,,1\r\n\
2015-04-16T15:00,27.04,\r\n\
2015-04-17T15:00,27.77,\r\n";

/// `... | csvfill -k position`
pub const FILLED: &str = "time,close,position\r\n\
2015-04-15T12:00,,1\r\n\
2015-04-15T12:30,,-1\r\n\
2015-04-15T12:45,,1\r\n\
2015-04-15T14:45,,-1\r\n\
2015-04-15T15:00,26.98,-1\r\n\
2015-04-16T09:30,,1\r\n\
2015-04-16T15:00,27.04,1\r\n\
2015-04-17T15:00,27.77,1\r\n";

/// Write `contents` to a fresh temporary file that lives as long as the handle.
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    f.write_all(contents.as_bytes()).expect("write temp file");
    f.flush().expect("flush temp file");
    f
}

/// Number of data rows (header excluded) in CRLF-terminated CSV text.
pub fn data_rows(csv: &str) -> usize {
    csv.trim_end().split("\r\n").count().saturating_sub(1)
}
