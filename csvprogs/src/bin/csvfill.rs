use std::process::ExitCode;

use csvprogs::tools::FillArgs;

fn main() -> ExitCode {
    csvprogs::cli::main::<FillArgs>()
}
