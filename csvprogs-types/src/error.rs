use std::io;

use thiserror::Error;

/// Unified error type for the csvprogs workspace.
///
/// Covers usage/argument problems, unparsable date keys, undecodable input
/// bytes, and the I/O failures surfaced by the CSV reader and writer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CsvProgsError {
    /// Invalid input argument or configuration (usage error).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A non-empty value in a date key field could not be parsed.
    #[error("unparsable date in field {field:?}: {value:?}")]
    DateParse {
        /// Key field whose value failed to parse.
        field: String,
        /// The raw value as read from the input.
        value: String,
    },

    /// Input bytes are not valid in the configured encoding.
    #[error("input is not valid {encoding}")]
    Decode {
        /// Name of the configured encoding (e.g. "UTF-8").
        encoding: &'static str,
    },

    /// Reading or writing a CSV record failed.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// Opening, reading, or writing a file or stream failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

impl CsvProgsError {
    /// Helper: build an `InvalidArg` error from a message.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `DateParse` error for a field and its raw value.
    pub fn date_parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DateParse {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the error is a usage problem rather than a data or I/O failure.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArg(_))
    }

    /// True when the consumer closed the read end of our output pipe.
    ///
    /// Recognised both as a plain `io::Error` and when wrapped by the csv writer.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Self::Io(e) => e.kind() == io::ErrorKind::BrokenPipe,
            Self::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(inner) => inner.kind() == io::ErrorKind::BrokenPipe,
                _ => false,
            },
            _ => false,
        }
    }
}
