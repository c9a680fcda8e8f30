//! Sitekit - Command-line build tool for static site front-end assets

use std::process::ExitCode;

use sitekit::cli;

fn main() -> ExitCode {
    cli::run()
}
