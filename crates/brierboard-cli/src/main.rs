use std::process::ExitCode;

use clap::Parser;

mod cli;

use cli::args::Cli;
use cli::commands::{dispatch, error_code};

fn main() -> ExitCode {
    brierboard_core::tracing::init_tracing();
    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {e:#}", error_code(&e));
            ExitCode::FAILURE
        }
    }
}
