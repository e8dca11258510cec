use crate::Row;
use crate::key::raw_key;
use csvprogs_types::{CsvProgsError, KeySpec};

/// Coalesce runs of adjacent rows sharing the same key into one row.
///
/// Keys are compared as raw strings (no date parsing). Within a run each
/// column ends up with the last non-empty value seen; columns never set
/// stay absent. Rows with equal keys that are not adjacent form separate
/// runs; sort or merge first if that matters.
///
/// A run whose rows are all blank produces no output row.
pub struct Collapse<I> {
    input: I,
    keys: Vec<String>,
    last_key: Option<Vec<String>>,
    acc: Row,
    done: bool,
    runs: u64,
}

impl<I> Collapse<I>
where
    I: Iterator<Item = Result<Row, CsvProgsError>>,
{
    /// Collapse `input` on the fields of `spec` (date kinds are ignored).
    pub fn new(input: I, spec: &KeySpec) -> Self {
        Self {
            input,
            keys: spec.names().map(str::to_string).collect(),
            last_key: None,
            acc: Row::new(),
            done: false,
            runs: 0,
        }
    }

    /// Collapsed rows emitted so far.
    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }

    fn flush(&mut self) -> Option<Row> {
        if self.acc.has_content() {
            self.runs += 1;
            Some(std::mem::take(&mut self.acc))
        } else {
            self.acc.clear();
            None
        }
    }
}

impl<I> Iterator for Collapse<I>
where
    I: Iterator<Item = Result<Row, CsvProgsError>>,
{
    type Item = Result<Row, CsvProgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let row = match self.input.next() {
                Some(Ok(row)) => row,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    let tail = self.flush();
                    #[cfg(feature = "tracing")]
                    tracing::debug!(runs = self.runs, "collapse finished");
                    return tail.map(Ok);
                }
            };
            let key = raw_key(&row, self.keys.iter().map(String::as_str));
            let mut ready = None;
            if self.last_key.as_ref() != Some(&key) {
                ready = self.flush();
                self.last_key = Some(key);
            }
            self.acc.overlay(row);
            if let Some(out) = ready {
                return Some(Ok(out));
            }
        }
    }
}

/// Collapse an in-memory slice of rows.
#[must_use]
pub fn collapse_rows(rows: Vec<Row>, spec: &KeySpec) -> Vec<Row> {
    Collapse::new(rows.into_iter().map(Ok), spec)
        .filter_map(Result::ok)
        .collect()
}
