//! Liszt CLI - boards, lists and cards from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = liszt::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
