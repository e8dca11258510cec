//! Error type and configuration primitives shared across the csvprogs filters.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{
    CsvDialect, DEFAULT_DATE_FORMAT, KeyField, KeyKind, KeySpec, KeySpecBuilder,
    split_field_list,
};
pub use error::CsvProgsError;

/// Result alias used throughout the workspace.
pub type Result<T, E = CsvProgsError> = std::result::Result<T, E>;
