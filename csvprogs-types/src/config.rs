//! Configuration primitives shared by the merge, collapse, and fill filters.

use std::collections::HashSet;

use encoding_rs::{Encoding, UTF_8};

use crate::CsvProgsError;

/// Output layout used for date key fields unless overridden.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// How a key field's raw value is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyKind {
    /// Compare the raw string value.
    #[default]
    Text,
    /// Parse the value as a date/time and compare chronologically.
    Date,
}

/// One entry of a key field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyField {
    /// Column name.
    pub name: String,
    /// Comparison kind, fixed for the whole run.
    pub kind: KeyKind,
}

impl KeyField {
    /// A key field compared as a raw string.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: KeyKind::Text,
        }
    }

    /// A key field parsed as a date before comparison.
    pub fn date(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: KeyKind::Date,
        }
    }
}

/// Ordered, validated key field list.
///
/// The order defines both sort/tie-break precedence and (for collapsing) group
/// identity. The date subset is resolved once here so comparisons never have to
/// look it up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    fields: Vec<KeyField>,
}

impl KeySpec {
    /// Start building a key spec.
    #[must_use]
    pub fn builder() -> KeySpecBuilder {
        KeySpecBuilder::default()
    }

    /// Build a spec where every key is compared as text.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the list is empty, contains an empty name, or repeats a name.
    pub fn text<I, S>(names: I) -> Result<Self, CsvProgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().keys(names).build()
    }

    /// Key fields in precedence order.
    #[must_use]
    pub fn fields(&self) -> &[KeyField] {
        &self.fields
    }

    /// Key field names in precedence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of key fields (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; a built spec holds at least one field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `name` is one of the key fields.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Whether `name` is a key field parsed as a date.
    #[must_use]
    pub fn is_date(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == name && f.kind == KeyKind::Date)
    }
}

/// Builder for [`KeySpec`].
#[derive(Debug, Default, Clone)]
pub struct KeySpecBuilder {
    keys: Vec<String>,
    date_keys: Vec<String>,
}

impl KeySpecBuilder {
    /// Append key field names in precedence order.
    #[must_use]
    pub fn keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark key fields whose values are parsed as dates.
    #[must_use]
    pub fn date_keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_keys.extend(names.into_iter().map(Into::into));
        self
    }

    /// Validate and build the spec.
    ///
    /// # Errors
    /// Returns `InvalidArg` when:
    /// - no key field was given, a name is empty, or a name is repeated;
    /// - a date key is not also a key field.
    pub fn build(self) -> Result<KeySpec, CsvProgsError> {
        if self.keys.is_empty() {
            return Err(CsvProgsError::invalid_arg("at least one key field is required"));
        }
        let mut seen = HashSet::new();
        for k in &self.keys {
            if k.is_empty() {
                return Err(CsvProgsError::invalid_arg("key field names must not be empty"));
            }
            if !seen.insert(k.as_str()) {
                return Err(CsvProgsError::invalid_arg(format!(
                    "key field {k:?} given more than once"
                )));
            }
        }
        let dates: HashSet<&str> = self.date_keys.iter().map(String::as_str).collect();
        if let Some(stray) = dates.iter().find(|d| !seen.contains(*d)) {
            return Err(CsvProgsError::invalid_arg(format!(
                "date key {stray:?} is not one of the key fields"
            )));
        }

        let fields = self
            .keys
            .iter()
            .map(|k| {
                if dates.contains(k.as_str()) {
                    KeyField::date(k.clone())
                } else {
                    KeyField::text(k.clone())
                }
            })
            .collect();
        Ok(KeySpec { fields })
    }
}

/// Split a comma-separated field list as given on the command line.
///
/// Surrounding whitespace is kept (column names may contain spaces); empty
/// input yields an empty list.
#[must_use]
pub fn split_field_list(arg: &str) -> Vec<String> {
    if arg.is_empty() {
        return Vec::new();
    }
    arg.split(',').map(str::to_string).collect()
}

/// Reader/writer dialect: delimiters, text encoding, and row terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    /// Field delimiter for input.
    pub input_delimiter: u8,
    /// Field delimiter for output.
    pub output_delimiter: u8,
    /// Encoding of both input and output.
    pub encoding: &'static Encoding,
    /// Terminate output rows with `\r\n` (otherwise `\n`).
    pub crlf: bool,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            input_delimiter: b',',
            output_delimiter: b',',
            encoding: UTF_8,
            crlf: true,
        }
    }
}

impl CsvDialect {
    /// Set the input delimiter from its textual form.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless `sep` is a single ASCII character, `\t`, or `tab`.
    pub fn with_input_delimiter(mut self, sep: &str) -> Result<Self, CsvProgsError> {
        self.input_delimiter = parse_delimiter(sep)?;
        Ok(self)
    }

    /// Set the output delimiter from its textual form.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless `sep` is a single ASCII character, `\t`, or `tab`.
    pub fn with_output_delimiter(mut self, sep: &str) -> Result<Self, CsvProgsError> {
        self.output_delimiter = parse_delimiter(sep)?;
        Ok(self)
    }

    /// Set the encoding from a WHATWG label such as `utf-8` or `latin1`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the label is unknown.
    pub fn with_encoding(mut self, label: &str) -> Result<Self, CsvProgsError> {
        self.encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| CsvProgsError::invalid_arg(format!("unknown encoding {label:?}")))?;
        Ok(self)
    }

    /// Select the output row terminator.
    #[must_use]
    pub const fn with_crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }
}

fn parse_delimiter(sep: &str) -> Result<u8, CsvProgsError> {
    match sep {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }
    match sep.as_bytes() {
        [b] if b.is_ascii() && *b != b'"' && *b != b'\r' && *b != b'\n' => Ok(*b),
        _ => Err(CsvProgsError::invalid_arg(format!(
            "delimiter must be a single ASCII character, got {sep:?}"
        ))),
    }
}
