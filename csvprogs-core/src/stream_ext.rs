use crate::{Collapse, ForwardFill, Row};
use csvprogs_types::{CsvProgsError, KeySpec};

/// Chaining helpers for fallible row streams.
///
/// ```
/// use csvprogs_core::{KWayMerge, KeySpec, RowStreamExt, VecSource};
///
/// let a = VecSource::from_records(["t", "close"], [["1", "10"], ["3", "30"]]);
/// let b = VecSource::from_records(["t", "pos"], [["1", "-1"], ["2", "1"]]);
/// let spec = KeySpec::text(["t"]).unwrap();
/// let rows: Vec<_> = KWayMerge::new([a, b], spec.clone())
///     .collapse(&spec)
///     .forward_fill(["pos"])
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[2].value("pos"), "1");
/// ```
pub trait RowStreamExt: Iterator<Item = Result<Row, CsvProgsError>> + Sized {
    /// Collapse adjacent rows with equal keys. See [`Collapse`].
    fn collapse(self, spec: &KeySpec) -> Collapse<Self> {
        Collapse::new(self, spec)
    }

    /// Forward-fill blank values in `targets`. See [`ForwardFill`].
    fn forward_fill<T: Into<String>>(
        self,
        targets: impl IntoIterator<Item = T>,
    ) -> ForwardFill<Self> {
        ForwardFill::new(self, targets)
    }
}

impl<I> RowStreamExt for I where I: Iterator<Item = Result<Row, CsvProgsError>> {}
