//! csvprogs-core
//!
//! Streaming building blocks for the keyed CSV filters.
//!
//! - `row`: the [`Row`] model (column name to string value).
//! - `key`: key construction over a [`KeySpec`], with optional date parsing.
//! - `merge`: [`KWayMerge`], a k-way merge of individually sorted sources.
//! - `collapse`: [`Collapse`], coalescing adjacent rows that share a key.
//! - `fill`: [`ForwardFill`], carrying values down blank cells.
//! - `io`: CSV reader/writer adapters.
//!
//! Every stage is a single-threaded pull iterator over `Result<Row, _>`; a
//! stage advances only when its consumer asks for the next row, and holds at
//! most one row per input (the merge) or one accumulator (collapse, fill).
//!
//! Tracing
//! -------
//! With the `tracing` feature enabled, stream lifecycle events are emitted
//! at `debug` level. No subscriber is installed by this crate.
#![warn(missing_docs)]

/// Run-length collapsing of adjacent same-key rows.
pub mod collapse;
/// Forward-fill of blank values.
pub mod fill;
/// CSV input and output adapters.
pub mod io;
/// Key tuples, date parsing, and date re-serialisation.
pub mod key;
/// K-way merge of sorted row sources.
pub mod merge;
mod row;
mod source;
mod stream_ext;

pub use collapse::{Collapse, collapse_rows};
pub use fill::{ForwardFill, forward_fill_rows};
pub use io::{CsvSink, CsvSource};
pub use key::{DateFormat, EPOCH, Key, KeyValue, construct_key, parse_date};
pub use merge::{KWayMerge, merge_all, merged_columns};
pub use row::Row;
pub use source::{RowSource, VecSource};
pub use stream_ext::RowStreamExt;

pub use csvprogs_types::*;
