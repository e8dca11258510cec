use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use encoding_rs::Encoding;

use super::is_std_stream;
use crate::Row;
use csvprogs_types::{CsvDialect, CsvProgsError};

/// Restval written for a column a row does not have.
pub const RESTVAL: &str = "";

/// CSV writer with a fixed header.
///
/// Each row is projected onto the header; absent columns are written as
/// [`RESTVAL`] and columns outside the header are ignored.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
    encoding: &'static Encoding,
    rows: u64,
}

impl CsvSink<Box<dyn Write>> {
    /// Create a sink on `target` (`None` or `-` is standard output).
    ///
    /// In `append` mode the file is opened for appending and no header is
    /// written; otherwise the file is truncated and the header written first.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be opened or `Csv` if the header
    /// cannot be written.
    pub fn create(
        target: Option<&Path>,
        columns: Vec<String>,
        dialect: &CsvDialect,
        append: bool,
    ) -> Result<Self, CsvProgsError> {
        let out: Box<dyn Write> = match target {
            Some(path) if !is_std_stream(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .append(append)
                    .truncate(!append)
                    .open(path)
                    .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
                Box::new(file)
            }
            _ => Box::new(io::stdout().lock()),
        };
        Self::new(out, columns, dialect, !append)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap `out`, writing the header row first when `header` is set.
    ///
    /// # Errors
    /// Returns `Csv` if the header cannot be written.
    pub fn new(
        out: W,
        columns: Vec<String>,
        dialect: &CsvDialect,
        header: bool,
    ) -> Result<Self, CsvProgsError> {
        let terminator = if dialect.crlf {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };
        let writer = csv::WriterBuilder::new()
            .delimiter(dialect.output_delimiter)
            .terminator(terminator)
            .has_headers(false)
            .from_writer(out);
        let mut sink = Self {
            writer,
            columns,
            encoding: dialect.encoding,
            rows: 0,
        };
        if header {
            let encoding = sink.encoding;
            sink.writer
                .write_record(sink.columns.iter().map(|c| encoding.encode(c).0))?;
        }
        Ok(sink)
    }

    /// Output header.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Write one row projected onto the header.
    ///
    /// # Errors
    /// Returns `Csv` on write failure (including a closed output pipe).
    pub fn write_row(&mut self, row: &Row) -> Result<(), CsvProgsError> {
        let encoding = self.encoding;
        self.writer
            .write_record(row.project(&self.columns, RESTVAL).map(|v| encoding.encode(v).0))?;
        self.rows += 1;
        Ok(())
    }

    /// Drain `rows` into the sink, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error from `rows` or from writing.
    pub fn write_all<I>(&mut self, rows: I) -> Result<u64, CsvProgsError>
    where
        I: IntoIterator<Item = Result<Row, CsvProgsError>>,
    {
        let before = self.rows;
        for row in rows {
            self.write_row(&row?)?;
        }
        Ok(self.rows - before)
    }

    /// Flush buffered output.
    ///
    /// # Errors
    /// Returns `Io` if the underlying writer fails.
    pub fn flush(&mut self) -> Result<(), CsvProgsError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    /// Returns `Io` if the final flush fails.
    pub fn into_inner(self) -> Result<W, CsvProgsError> {
        self.writer
            .into_inner()
            .map_err(|e| CsvProgsError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[Row], columns: &[&str], dialect: &CsvDialect, header: bool) -> Vec<u8> {
        let cols = columns.iter().map(|c| c.to_string()).collect();
        let mut sink = CsvSink::new(Vec::new(), cols, dialect, header).unwrap();
        for r in rows {
            sink.write_row(r).unwrap();
        }
        sink.into_inner().unwrap()
    }

    #[test]
    fn pads_absent_columns_and_uses_crlf() {
        let rows = [Row::from_pairs([("time", "t1"), ("close", "1.5")])];
        let out = render(&rows, &["time", "close", "position"], &CsvDialect::default(), true);
        assert_eq!(out, b"time,close,position\r\nt1,1.5,\r\n");
    }

    #[test]
    fn append_mode_omits_header_and_honours_delimiter() {
        let dialect = CsvDialect::default()
            .with_output_delimiter(";")
            .unwrap()
            .with_crlf(false);
        let rows = [Row::from_pairs([("a", "x;y"), ("b", "2")])];
        let out = render(&rows, &["a", "b"], &dialect, false);
        assert_eq!(out, b"\"x;y\";2\n");
    }

    #[test]
    fn output_is_encoded() {
        let dialect = CsvDialect::default().with_encoding("latin1").unwrap();
        let rows = [Row::from_pairs([("name", "caf\u{e9}")])];
        let out = render(&rows, &["name"], &dialect, false);
        assert_eq!(out, b"caf\xe9\r\n");
    }
}
