use std::vec;

use crate::Row;
use csvprogs_types::CsvProgsError;

/// A pull-based stream of rows with a known header.
///
/// Implementors yield rows in input order. The merger relies on each source
/// being sorted ascending by the merge keys; nothing here checks that.
pub trait RowSource: Iterator<Item = Result<Row, CsvProgsError>> {
    /// Column names declared by the source's header, in header order.
    fn columns(&self) -> &[String];
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn columns(&self) -> &[String] {
        (**self).columns()
    }
}

/// In-memory [`RowSource`] over rows that were already parsed.
#[derive(Debug, Clone)]
pub struct VecSource {
    columns: Vec<String>,
    rows: vec::IntoIter<Row>,
}

impl VecSource {
    /// Source with an explicit header.
    pub fn new<C: Into<String>>(columns: impl IntoIterator<Item = C>, rows: Vec<Row>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows.into_iter(),
        }
    }

    /// Source built from a header and positional records, as a CSV reader would see them.
    pub fn from_records<C, R, V>(columns: impl IntoIterator<Item = C>, records: R) -> Self
    where
        C: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let rows = records
            .into_iter()
            .map(|rec| Row::from_record(&columns, rec))
            .collect::<Vec<_>>();
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }
}

impl Iterator for VecSource {
    type Item = Result<Row, CsvProgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl RowSource for VecSource {
    fn columns(&self) -> &[String] {
        &self.columns
    }
}
