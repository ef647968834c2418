use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

use helpdesk::HelpdeskError;
use helpdesk::cli::Cli;
use helpdesk::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command();

    if let Err(e) = logging::init(command.log_target(), cli.verbose) {
        eprintln!("warning: logging disabled: {}", e);
    }

    match command.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            let message = match &e {
                HelpdeskError::Auth(_) => e.user_message(),
                _ => e.to_string(),
            };
            eprintln!("{} {}", "error:".red().bold(), message);
            ExitCode::FAILURE
        }
    }
}
