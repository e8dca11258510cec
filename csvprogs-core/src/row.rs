use std::collections::BTreeMap;

/// A CSV record as a mapping from column name to string value.
///
/// A column that the row's source never had is *absent*; a column the source
/// had but left blank holds the empty string. Most consumers treat the two
/// alike (see [`Row::value`]), but keeping them apart lets the writer pad
/// absent columns with the restval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    /// An empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row by zipping a header with record values.
    ///
    /// Short records leave the trailing columns absent; values beyond the
    /// header are dropped.
    pub fn from_record<H, V>(headers: &[H], values: impl IntoIterator<Item = V>) -> Self
    where
        H: AsRef<str>,
        V: Into<String>,
    {
        let fields = headers
            .iter()
            .zip(values)
            .map(|(h, v)| (h.as_ref().to_string(), v.into()))
            .collect();
        Self { fields }
    }

    /// Build a row from `(column, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, treating an absent column as empty.
    #[must_use]
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Set `column` to `value`, adding the column if absent.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// True when `column` is absent or empty.
    #[must_use]
    pub fn is_blank(&self, column: &str) -> bool {
        self.value(column).is_empty()
    }

    /// True when at least one column holds a non-empty value.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.fields.values().any(|v| !v.is_empty())
    }

    /// Columns present in this row, in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Overwrite this row's columns with every non-empty value of `other`.
    ///
    /// Columns empty or absent in `other` leave the current value alone.
    pub fn overlay(&mut self, other: Row) {
        for (k, v) in other.fields {
            if !v.is_empty() {
                self.fields.insert(k, v);
            }
        }
    }

    /// Drop every column, keeping the allocation for reuse.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Values laid out in `columns` order; absent columns become `restval`.
    pub fn project<'a, C>(
        &'a self,
        columns: &'a [C],
        restval: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a
    where
        C: AsRef<str>,
    {
        columns
            .iter()
            .map(move |c| self.get(c.as_ref()).unwrap_or(restval))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
