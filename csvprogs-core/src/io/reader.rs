use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use encoding_rs::Encoding;

use super::is_std_stream;
use crate::{Row, RowSource};
use csvprogs_types::{CsvDialect, CsvProgsError};

/// Row source reading a headed CSV stream.
///
/// The first record names the columns. Records shorter than the header leave
/// their trailing columns absent; values past the header are dropped.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    columns: Vec<String>,
    encoding: &'static Encoding,
    record: csv::ByteRecord,
    name: String,
    rows: u64,
    done: bool,
}

impl CsvSource<Box<dyn Read>> {
    /// Open `path` for reading; `-` reads standard input.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be opened, or any header read error.
    pub fn open(path: &Path, dialect: &CsvDialect) -> Result<Self, CsvProgsError> {
        let input: Box<dyn Read> = if is_std_stream(path) {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {e}", path.display()))
            })?;
            Box::new(BufReader::new(file))
        };
        Self::from_reader(input, dialect, path.display().to_string())
    }
}

impl<R: Read> CsvSource<R> {
    /// Wrap `input`, reading its header immediately.
    ///
    /// # Errors
    /// Returns `Csv` if the header cannot be read, or `Decode` if it is not
    /// valid in the dialect's encoding.
    pub fn from_reader(
        input: R,
        dialect: &CsvDialect,
        name: impl Into<String>,
    ) -> Result<Self, CsvProgsError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(dialect.input_delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let encoding = dialect.encoding;
        let mut columns = reader
            .byte_headers()?
            .iter()
            .map(|h| decode(h, encoding))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = columns.first_mut()
            && let Some(stripped) = first.strip_prefix('\u{feff}')
        {
            *first = stripped.to_string();
        }
        let name = name.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(source = %name, columns = ?columns, "opened csv input");
        Ok(Self {
            reader,
            columns,
            encoding,
            record: csv::ByteRecord::new(),
            name,
            rows: 0,
            done: false,
        })
    }

    /// Display name of the input (file path or `-`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data rows read so far.
    #[must_use]
    pub const fn rows_read(&self) -> u64 {
        self.rows
    }

    fn read_row(&mut self) -> Result<Option<Row>, CsvProgsError> {
        if !self.reader.read_byte_record(&mut self.record)? {
            return Ok(None);
        }
        let values = self
            .record
            .iter()
            .map(|f| decode(f, self.encoding))
            .collect::<Result<Vec<_>, _>>()?;
        self.rows += 1;
        Ok(Some(Row::from_record(&self.columns, values)))
    }
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = Result<Row, CsvProgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                #[cfg(feature = "tracing")]
                tracing::debug!(source = %self.name, rows = self.rows, "csv input exhausted");
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> RowSource for CsvSource<R> {
    fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String, CsvProgsError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or(CsvProgsError::Decode {
            encoding: encoding.name(),
        })
}
