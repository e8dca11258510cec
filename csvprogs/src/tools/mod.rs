//! The filter programs, one module per binary.
//!
//! Each tool parses its own flags (plus [`CommonArgs`](crate::cli::CommonArgs))
//! and streams rows from its inputs to its output without buffering whole files.

/// `csvcollapse`: coalesce adjacent rows that share a key.
pub mod collapse;
/// `csvfill`: forward-fill blank values down named columns.
pub mod fill;
/// `csvmerge`: k-way merge of key-sorted CSV files.
pub mod merge;

pub use collapse::CollapseArgs;
pub use fill::FillArgs;
pub use merge::MergeArgs;
