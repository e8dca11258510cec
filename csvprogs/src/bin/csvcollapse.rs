use std::process::ExitCode;

use csvprogs::tools::CollapseArgs;

fn main() -> ExitCode {
    csvprogs::cli::main::<CollapseArgs>()
}
