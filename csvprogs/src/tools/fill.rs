use std::path::PathBuf;

use clap::Parser;
use csvprogs_core::{CsvProgsError, CsvSink, CsvSource, ForwardFill, RowSource, split_field_list};

use crate::cli::{CommonArgs, Tool, input_output};

/// Propagate known values down columns.
///
/// An empty value in one of the named columns is replaced by the value that
/// column had in the previous row, so values carry down until a new one
/// appears. Typically run on csvmerge output.
#[derive(Parser, Debug)]
#[command(
    name = "csvfill",
    version,
    after_help = "Example:\n  csvmerge -k time first.csv second.csv | csvfill -k position"
)]
pub struct FillArgs {
    /// Columns whose values should be filled, comma-separated
    #[arg(short = 'k', long = "keys", value_name = "FIELDS")]
    pub keys: String,

    /// Optional input file (default stdin) and output file (default stdout)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for FillArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(self) -> Result<(), CsvProgsError> {
        let (input, output) = input_output(&self.files)?;
        let targets = split_field_list(&self.keys);
        if targets.is_empty() {
            return Err(CsvProgsError::invalid_arg("at least one column to fill is required"));
        }
        let dialect = self.common.dialect()?;

        let source = CsvSource::open(&input, &dialect)?;
        if !source.columns().is_empty()
            && let Some(missing) = targets.iter().find(|t| !source.columns().contains(t))
        {
            return Err(CsvProgsError::invalid_arg(format!(
                "column {missing:?} not found in header of {}",
                source.name()
            )));
        }
        let columns = self.common.output_columns(source.columns());

        let fill = ForwardFill::new(source, targets);
        let mut sink = CsvSink::create(output, columns, &dialect, self.common.append)?;
        let rows = sink.write_all(fill)?;
        sink.flush()?;
        tracing::debug!(rows, "csvfill finished");
        Ok(())
    }
}
