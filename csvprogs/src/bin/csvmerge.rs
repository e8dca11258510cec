use std::process::ExitCode;

use csvprogs::tools::MergeArgs;

fn main() -> ExitCode {
    csvprogs::cli::main::<MergeArgs>()
}
