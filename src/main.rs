use std::process::ExitCode;

use colored::Colorize;
use fake_synth::cli;
use tracing::debug;

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.init_logging();

    match command_line_interface.run() {
        Ok(()) => {
            debug!("done");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
