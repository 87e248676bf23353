use lanlight::cli::Cli;
use lanlight::logger::initialize as LoggerInitialize;
use lanlight::run::run;

use std::fs::create_dir_all;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

const LOG_DIR_NAME: &str = "lanlight";

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_DIR_NAME)
        .join("logs")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = log_dir();
    match create_dir_all(&log_dir) {
        Ok(()) => {
            if let Err(e) = LoggerInitialize(&log_dir, cli.verbose) {
                eprintln!("lanlight: {e}");
            }
        }
        Err(e) => eprintln!("lanlight: Failed to create log directory: {e}"),
    }

    info!("lanlight starting: {:?}", cli.command);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("lanlight: {e}");
            ExitCode::FAILURE
        }
    }
}
