use crate::Row;
use csvprogs_types::CsvProgsError;

/// Forward-fill empty values down the target columns.
///
/// A blank (empty or absent) target value takes the value the previous row
/// had *after* its own fill, so a value carries down until a new non-empty
/// one replaces it. Rows before the first value stay blank.
///
/// The first input error is yielded once and ends the stream.
pub struct ForwardFill<I> {
    input: I,
    targets: Vec<String>,
    last: Row,
    done: bool,
}

impl<I> ForwardFill<I>
where
    I: Iterator<Item = Result<Row, CsvProgsError>>,
{
    /// Fill `targets` in rows pulled from `input`.
    pub fn new<T: Into<String>>(input: I, targets: impl IntoIterator<Item = T>) -> Self {
        Self {
            input,
            targets: targets.into_iter().map(Into::into).collect(),
            last: Row::new(),
            done: false,
        }
    }
}

impl<I> Iterator for ForwardFill<I>
where
    I: Iterator<Item = Result<Row, CsvProgsError>>,
{
    type Item = Result<Row, CsvProgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut row = match self.input.next() {
            Some(Ok(row)) => row,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e));
            }
            None => {
                self.done = true;
                return None;
            }
        };
        for t in &self.targets {
            if row.is_blank(t)
                && let Some(prev) = self.last.get(t)
            {
                row.set(t.clone(), prev);
            }
        }
        self.last.clone_from(&row);
        Some(Ok(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}

/// Forward-fill an in-memory slice of rows.
#[must_use]
pub fn forward_fill_rows<T: Into<String>>(
    rows: Vec<Row>,
    targets: impl IntoIterator<Item = T>,
) -> Vec<Row> {
    ForwardFill::new(rows.into_iter().map(Ok), targets)
        .filter_map(Result::ok)
        .collect()
}
