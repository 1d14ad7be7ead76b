mod context;
mod flags;
mod help;
mod parse;
pub mod prompts;
mod quiet;

use std::process::ExitCode;

pub use context::{CliError, Context};
pub use flags::CliFlags;
pub use parse::parse;

/// Run the CLI with parsed flags.
pub fn run(flags: CliFlags) -> ExitCode {
    match Context::new(flags).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Aborted) => ExitCode::SUCCESS,
        Err(e) => {
            prompts::error(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}
