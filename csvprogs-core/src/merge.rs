use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use crate::key::{DateFormat, Key, construct_key, format_date_fields};
use crate::{Row, RowSource};
use csvprogs_types::{CsvProgsError, KeySpec};

/// Output header for a merge: key fields first (in the given order), then
/// every other column seen in any input, sorted, each exactly once.
pub fn merged_columns<'a, I>(schemas: I, spec: &KeySpec) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let rest: BTreeSet<&str> = schemas
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|c| !spec.contains(c))
        .collect();
    spec.names().chain(rest).map(str::to_string).collect()
}

/// Pending head of one input stream.
///
/// Each cursor exclusively owns its stream; it lives in the merge heap while
/// it holds an unconsumed row.
struct StreamCursor<S> {
    ordinal: usize,
    key: Key,
    row: Row,
    stream: S,
}

impl<S> PartialEq for StreamCursor<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for StreamCursor<S> {}

impl<S> PartialOrd for StreamCursor<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for StreamCursor<S> {
    // Reversed so the max-heap pops the smallest (key, ordinal) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.ordinal.cmp(&self.ordinal))
    }
}

/// Streaming k-way merge of key-sorted row sources.
///
/// - Output is ascending by the key spec, provided every input already is;
///   unsorted input is not detected and simply yields unsorted output.
/// - Equal keys from different streams are emitted in input-stream order.
/// - Every input row is emitted exactly once; nothing is deduplicated.
/// - At most one row per input is held in memory.
/// - Date keys are re-serialised with the configured [`DateFormat`].
///
/// The first error (an unreadable record or an unparsable date key) is
/// yielded once and ends the merge.
pub struct KWayMerge<S> {
    spec: KeySpec,
    date_format: DateFormat,
    columns: Vec<String>,
    heap: BinaryHeap<StreamCursor<S>>,
    // Streams whose head was consumed (or never read) and must be pulled
    // before the next selection.
    stale: Vec<(usize, S)>,
    emitted: u64,
    done: bool,
}

impl<S: RowSource> KWayMerge<S> {
    /// Prepare a merge over `streams`. No rows are read until the first pull.
    pub fn new(streams: impl IntoIterator<Item = S>, spec: KeySpec) -> Self {
        let stale: Vec<(usize, S)> = streams.into_iter().enumerate().collect();
        let columns = merged_columns(stale.iter().map(|(_, s)| s.columns()), &spec);
        #[cfg(feature = "tracing")]
        tracing::debug!(inputs = stale.len(), columns = ?columns, "merge prepared");
        Self {
            spec,
            date_format: DateFormat::default(),
            columns,
            heap: BinaryHeap::with_capacity(stale.len()),
            stale,
            emitted: 0,
            done: false,
        }
    }

    /// Layout used when writing date key fields back out.
    #[must_use]
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    /// Output header: the union of the input headers.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows emitted so far.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    fn advance(&mut self, ordinal: usize, mut stream: S) -> Result<(), CsvProgsError> {
        match stream.next() {
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(input = ordinal, "input stream exhausted");
                Ok(())
            }
            Some(Err(e)) => Err(e),
            Some(Ok(row)) => {
                let key = construct_key(&row, &self.spec)?;
                self.heap.push(StreamCursor {
                    ordinal,
                    key,
                    row,
                    stream,
                });
                Ok(())
            }
        }
    }

    fn fail(&mut self, e: CsvProgsError) -> Option<Result<Row, CsvProgsError>> {
        self.done = true;
        self.heap.clear();
        self.stale.clear();
        Some(Err(e))
    }
}

impl<S: RowSource> Iterator for KWayMerge<S> {
    type Item = Result<Row, CsvProgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some((ordinal, stream)) = self.stale.pop() {
            if let Err(e) = self.advance(ordinal, stream) {
                return self.fail(e);
            }
        }
        let Some(StreamCursor {
            ordinal,
            key,
            mut row,
            stream,
        }) = self.heap.pop()
        else {
            self.done = true;
            #[cfg(feature = "tracing")]
            tracing::debug!(rows = self.emitted, "merge finished");
            return None;
        };
        if let Err(e) = format_date_fields(&mut row, &key, &self.spec, &self.date_format) {
            return self.fail(e);
        }
        self.stale.push((ordinal, stream));
        self.emitted += 1;
        Some(Ok(row))
    }
}

/// Merge `streams` eagerly, returning the output header and all rows.
///
/// # Errors
/// Returns the first read or date-parse error encountered.
pub fn merge_all<S, I>(streams: I, spec: KeySpec) -> Result<(Vec<String>, Vec<Row>), CsvProgsError>
where
    S: RowSource,
    I: IntoIterator<Item = S>,
{
    let merge = KWayMerge::new(streams, spec);
    let columns = merge.columns().to_vec();
    let rows = merge.collect::<Result<Vec<_>, _>>()?;
    Ok((columns, rows))
}
