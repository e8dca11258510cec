use std::path::PathBuf;

use clap::Parser;
use csvprogs_core::io::is_std_stream;
use csvprogs_core::{
    CsvProgsError, CsvSink, CsvSource, DEFAULT_DATE_FORMAT, DateFormat, KWayMerge, KeySpec,
    split_field_list,
};

use crate::cli::{CommonArgs, Tool};

/// Merge multiple CSV files sorted by the key fields.
///
/// Each row of every input is written exactly once; rows are interleaved so
/// the output stays sorted by the keys. The output header is the union of
/// all input columns: key fields first, in the order given, the rest sorted.
#[derive(Parser, Debug)]
#[command(
    name = "csvmerge",
    version,
    after_help = "Example: merge A.csv and B.csv on date and time:\n  \
                  csvmerge -k date,time A.csv B.csv"
)]
pub struct MergeArgs {
    /// Merge fields, comma-separated (quote if names contain spaces)
    #[arg(short = 'k', long = "keys", value_name = "FIELDS")]
    pub keys: String,

    /// Key fields to normalize as dates before comparing
    #[arg(short = 'd', long = "date-keys", value_name = "FIELDS")]
    pub date_keys: Option<String>,

    /// Output layout for date key fields
    #[arg(short = 'F', long = "date-format", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Input files, each sorted by the key fields (`-` reads stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl MergeArgs {
    fn key_spec(&self) -> Result<KeySpec, CsvProgsError> {
        KeySpec::builder()
            .keys(split_field_list(&self.keys))
            .date_keys(split_field_list(self.date_keys.as_deref().unwrap_or_default()))
            .build()
    }
}

impl Tool for MergeArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(self) -> Result<(), CsvProgsError> {
        if self.files.is_empty() {
            return Err(CsvProgsError::invalid_arg(
                "At least one input file is required.",
            ));
        }
        if self.files.iter().filter(|p| is_std_stream(p)).count() > 1 {
            return Err(CsvProgsError::invalid_arg(
                "standard input (-) may be given only once",
            ));
        }
        let spec = self.key_spec()?;
        let format = DateFormat::new(self.date_format.as_str())?;
        let dialect = self.common.dialect()?;

        let sources = self
            .files
            .iter()
            .map(|p| CsvSource::open(p, &dialect))
            .collect::<Result<Vec<_>, _>>()?;
        let mut merge = KWayMerge::new(sources, spec).with_date_format(format);
        let columns = self.common.output_columns(merge.columns());

        let mut sink = CsvSink::create(None, columns, &dialect, self.common.append)?;
        sink.write_all(&mut merge)?;
        sink.flush()?;
        tracing::debug!(inputs = self.files.len(), rows = merge.emitted(), "csvmerge finished");
        Ok(())
    }
}
