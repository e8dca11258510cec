use std::path::PathBuf;

use clap::Parser;
use csvprogs_core::{
    Collapse, CsvProgsError, CsvSink, CsvSource, KeySpec, RowSource, split_field_list,
};

use crate::cli::{CommonArgs, Tool, input_output};

/// Collapse multiple rows having the same key into a single row.
///
/// Rows with identical values for the key fields are merged into one; values
/// in later rows overwrite values in earlier rows, empty values never
/// overwrite. Rows must be adjacent to be collapsed, which is the case for
/// csvmerge output.
#[derive(Parser, Debug)]
#[command(
    name = "csvcollapse",
    version,
    after_help = "Example:\n  csvmerge -k time a.csv b.csv | csvcollapse -k time"
)]
pub struct CollapseArgs {
    /// Key field names, comma-separated
    #[arg(short = 'k', long = "keys", value_name = "FIELDS")]
    pub keys: String,

    /// Optional input file (default stdin) and output file (default stdout)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for CollapseArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(self) -> Result<(), CsvProgsError> {
        let (input, output) = input_output(&self.files)?;
        let spec = KeySpec::text(split_field_list(&self.keys))?;
        let dialect = self.common.dialect()?;

        let source = CsvSource::open(&input, &dialect)?;
        for k in spec.names() {
            if !source.columns().is_empty() && !source.columns().iter().any(|c| c == k) {
                tracing::warn!(
                    key = k,
                    input = source.name(),
                    "key field not in input header; treated as empty"
                );
            }
        }
        let columns = self.common.output_columns(source.columns());

        let mut collapse = Collapse::new(source, &spec);
        let mut sink = CsvSink::create(output, columns, &dialect, self.common.append)?;
        for row in collapse.by_ref() {
            sink.write_row(&row?)?;
        }
        sink.flush()?;
        tracing::debug!(runs = collapse.runs(), "csvcollapse finished");
        Ok(())
    }
}
