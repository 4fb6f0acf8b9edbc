//! sref binary entry point.

use std::process::ExitCode;

use scriptref::ui::output;

fn main() -> ExitCode {
    match scriptref::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
