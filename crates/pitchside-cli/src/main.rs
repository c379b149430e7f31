mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let output = commands::run(&cli).await?;
    output::render(&mut std::io::stdout().lock(), &output, cli.format, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}
