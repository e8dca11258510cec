//! Key construction: turn a row into a comparable tuple over the key field list.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::Row;
use csvprogs_types::{CsvProgsError, DEFAULT_DATE_FORMAT, KeyKind, KeySpec};

/// Sort value of an empty date key field: 1970-01-01T00:00:00.
pub const EPOCH: NaiveDateTime = DateTime::<Utc>::UNIX_EPOCH.naive_utc();

/// One element of a [`Key`].
///
/// Every key built from the same [`KeySpec`] holds the same variant at a given
/// position, so the derived ordering only ever compares like with like.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyValue {
    /// Raw string value of a text key.
    Text(String),
    /// Parsed value of a date key (or [`EPOCH`] when the field was empty).
    Date(NaiveDateTime),
}

/// Comparable key tuple, one element per key field, compared lexicographically.
pub type Key = Vec<KeyValue>;

// Offsets without a colon (`+0000`); RFC 3339 is tried before these.
const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
];

// `%B` also accepts abbreviated month names when parsing.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y%m%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Parse a date key value.
///
/// Accepts RFC 3339 and other offset timestamps (converted to UTC wall-clock
/// time), the common `date time` layouts including 12-hour clocks and compact
/// ISO 8601, and date-only layouts (read as midnight).
///
/// # Errors
/// Returns `DateParse` naming `field` if no layout matches.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDateTime, CsvProgsError> {
    let v = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) = OFFSET_LAYOUTS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(v, fmt).ok())
    {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_LAYOUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(v, fmt).ok())
    {
        return Ok(dt);
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(v, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok_or_else(|| CsvProgsError::date_parse(field, value))
}

/// Build the key of `row` under `spec`.
///
/// Text fields contribute their raw value (absent reads as empty). Date fields
/// are parsed; an empty date field sorts as [`EPOCH`] instead of failing.
///
/// # Errors
/// Returns `DateParse` if a non-empty date field cannot be parsed.
pub fn construct_key(row: &Row, spec: &KeySpec) -> Result<Key, CsvProgsError> {
    spec.fields()
        .iter()
        .map(|f| {
            let raw = row.value(&f.name);
            match f.kind {
                KeyKind::Text => Ok(KeyValue::Text(raw.to_string())),
                KeyKind::Date if raw.is_empty() => Ok(KeyValue::Date(EPOCH)),
                KeyKind::Date => parse_date(&f.name, raw).map(KeyValue::Date),
            }
        })
        .collect()
}

/// Validated strftime layout used to re-serialise date key fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    /// Validate a strftime layout such as `%Y-%m-%dT%H:%M`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the layout contains an unknown specifier or
    /// asks for data a naive timestamp does not carry (such as `%z`).
    pub fn new(layout: impl Into<String>) -> Result<Self, CsvProgsError> {
        let layout = layout.into();
        if StrftimeItems::new(&layout).any(|item| matches!(item, Item::Error)) {
            return Err(CsvProgsError::invalid_arg(format!(
                "invalid date format {layout:?}"
            )));
        }
        let format = Self(layout);
        format.render(&EPOCH)?;
        Ok(format)
    }

    /// Render `dt` with this layout.
    ///
    /// # Errors
    /// Returns `InvalidArg` if formatting fails; layouts accepted by
    /// [`DateFormat::new`] render every timestamp.
    pub fn render(&self, dt: &NaiveDateTime) -> Result<String, CsvProgsError> {
        let mut out = String::new();
        write!(out, "{}", dt.format(&self.0)).map_err(|_| {
            CsvProgsError::invalid_arg(format!("date format {:?} cannot render {dt}", self.0))
        })?;
        Ok(out)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}

/// Rewrite each non-empty date key of `row` from its parsed key value.
///
/// Empty date fields stay empty; the epoch sentinel only exists for ordering.
///
/// # Errors
/// Returns `InvalidArg` if `format` cannot render the value.
pub fn format_date_fields(
    row: &mut Row,
    key: &[KeyValue],
    spec: &KeySpec,
    format: &DateFormat,
) -> Result<(), CsvProgsError> {
    for (field, value) in spec.fields().iter().zip(key) {
        if let KeyValue::Date(dt) = value
            && !row.is_blank(&field.name)
        {
            row.set(field.name.clone(), format.render(dt)?);
        }
    }
    Ok(())
}

/// Raw string key of `row` over `names`, absent columns reading as empty.
///
/// Used for grouping, where values are compared exactly as written.
pub fn raw_key<'a>(row: &Row, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| row.value(n).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn layouts() {
        let cases = [
            ("2015-04-15T15:00", dt(2015, 4, 15, 15, 0)),
            ("2015-04-15 15:00:00", dt(2015, 4, 15, 15, 0)),
            ("2015/04/15 09:30", dt(2015, 4, 15, 9, 30)),
            ("04/15/2015", dt(2015, 4, 15, 0, 0)),
            ("2015-04-15", dt(2015, 4, 15, 0, 0)),
            ("15 Apr 2015", dt(2015, 4, 15, 0, 0)),
            ("2015-04-15T10:00:00-05:00", dt(2015, 4, 15, 15, 0)),
            ("20150415", dt(2015, 4, 15, 0, 0)),
            ("20150415T150000", dt(2015, 4, 15, 15, 0)),
            ("2015-04-15 3:00 PM", dt(2015, 4, 15, 15, 0)),
            ("04/15/2015 9:30 am", dt(2015, 4, 15, 9, 30)),
            ("Apr 15 2015", dt(2015, 4, 15, 0, 0)),
            ("April 15, 2015", dt(2015, 4, 15, 0, 0)),
            ("15 April 2015", dt(2015, 4, 15, 0, 0)),
            ("2015-04-15T15:00:00+0000", dt(2015, 4, 15, 15, 0)),
            ("2015-04-15 17:00:00+0200", dt(2015, 4, 15, 15, 0)),
        ];
        for (raw, want) in cases {
            assert_eq!(parse_date("t", raw).unwrap(), want, "{raw}");
        }
    }

    #[test]
    fn epoch_is_unix_origin() {
        assert_eq!(EPOCH, dt(1970, 1, 1, 0, 0));
    }

    #[test]
    fn date_format_validation() {
        assert!(DateFormat::new("%Y-%m-%d %H:%M").is_ok());
        assert!(DateFormat::new("%Q").is_err());
        let f = DateFormat::default();
        assert_eq!(f.render(&dt(2015, 4, 15, 9, 5)).unwrap(), "2015-04-15T09:05");
        assert!(DateFormat::new("%Y-%m-%d %z").unwrap_err().is_usage());
    }

    #[test]
    fn garbage_fails_with_field_name() {
        match parse_date("when", "soon") {
            Err(CsvProgsError::DateParse { field, value }) => {
                assert_eq!(field, "when");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
