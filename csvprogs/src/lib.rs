//! csvprogs
//!
//! Small Unix filters over sorted, keyed CSV streams, meant to be composed
//! with pipes:
//!
//! - `csvmerge`: k-way merge of files sorted by a composite key, optionally
//!   comparing some key fields as dates.
//! - `csvcollapse`: coalesce adjacent rows sharing a key, last non-empty
//!   value wins.
//! - `csvfill`: forward-fill blank values down named columns.
//!
//! ```text
//! csvmerge -k time first.csv second.csv | csvcollapse -k time | csvfill -k position
//! ```
//!
//! The streaming machinery lives in `csvprogs-core`; this crate holds the
//! command-line surface and process-level behavior (exit codes, quiet exit
//! on a closed output pipe, logging to stderr).

pub mod cli;
pub mod logging;
pub mod tools;
