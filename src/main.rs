//! gifwork - Command-line tool for resizing and recoloring animated GIFs

use std::process::ExitCode;

use gifwork::cli;

fn main() -> ExitCode {
    cli::run()
}
