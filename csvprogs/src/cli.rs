//! Command-line plumbing shared by every tool: common flags, exit codes, and
//! error reporting.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, error::ErrorKind};
use csvprogs_core::{CsvDialect, CsvProgsError, split_field_list};

/// Flags accepted by every tool in the family.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input field delimiter
    #[arg(short = 'i', long = "insep", value_name = "SEP", default_value = ",")]
    pub insep: String,

    /// Output field delimiter
    #[arg(short = 'o', long = "outsep", value_name = "SEP", default_value = ",")]
    pub outsep: String,

    /// Encoding of both input and output files
    #[arg(short = 'e', long = "encoding", default_value = "utf-8")]
    pub encoding: String,

    /// Fields to copy from input to output (comma-separated, in output order)
    #[arg(short = 'f', long = "fields", value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Append to the output without writing a header row
    #[arg(short = 'a', long = "append")]
    pub append: bool,

    /// Be more chatty on standard error
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CommonArgs {
    /// Dialect described by the delimiter and encoding flags.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a bad delimiter or unknown encoding.
    pub fn dialect(&self) -> Result<CsvDialect, CsvProgsError> {
        CsvDialect::default()
            .with_input_delimiter(&self.insep)?
            .with_output_delimiter(&self.outsep)?
            .with_encoding(&self.encoding)
    }

    /// Output header: `--fields` when given, otherwise `natural`.
    #[must_use]
    pub fn output_columns(&self, natural: &[String]) -> Vec<String> {
        match &self.fields {
            Some(f) => split_field_list(f),
            None => natural.to_vec(),
        }
    }
}

/// One filter program.
pub trait Tool: Parser {
    /// The common flags parsed for this invocation.
    fn common(&self) -> &CommonArgs;

    /// Run the filter to completion.
    ///
    /// # Errors
    /// Usage problems surface as `InvalidArg`; everything else is a data or I/O failure.
    fn run(self) -> Result<(), CsvProgsError>;
}

/// Split `[input [output]]` positionals.
///
/// # Errors
/// Returns `InvalidArg` when more than two paths are given.
pub fn input_output(files: &[PathBuf]) -> Result<(PathBuf, Option<&Path>), CsvProgsError> {
    match files {
        [] => Ok((PathBuf::from("-"), None)),
        [input] => Ok((input.clone(), None)),
        [input, output] => Ok((input.clone(), Some(output.as_path()))),
        _ => Err(CsvProgsError::invalid_arg("Too many input files")),
    }
}

/// Parse arguments, run the tool, and map the outcome to an exit code.
///
/// - 0 on success, on `--help`, and when the output pipe was closed early.
/// - 1 on usage errors (message and usage line on stderr).
/// - 1 on data or I/O errors (short diagnostic on stderr).
#[must_use]
pub fn main<T: Tool>() -> ExitCode {
    let mut cmd = T::command();
    let prog = cmd.get_name().to_string();

    let tool = match T::try_parse() {
        Ok(tool) => tool,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    crate::logging::init(tool.common().verbose);

    match tool.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("output closed by reader; exiting quietly");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_usage() => {
            eprintln!("{prog}: {e}");
            eprintln!();
            eprintln!("{}", cmd.render_usage());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("{prog}: {e}");
            ExitCode::FAILURE
        }
    }
}
