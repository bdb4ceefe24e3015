//! Colorcycle - command-line tool for turning a PNG into a color cycling GIF

use std::process::ExitCode;

use colorcycle::cli;

fn main() -> ExitCode {
    cli::run()
}
