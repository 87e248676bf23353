//! `lanlight-gen <protocol.yml> <out_dir>`

use std::io::stderr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use clap::Parser;
use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use lanlight_gen::{GenError, compile};
use log::{LevelFilter, error};

#[derive(Debug, Parser)]
#[command(name = "lanlight-gen", about = "Generate Rust protocol code from a protocol description")]
struct Args {
    /// Protocol description (YAML).
    document: PathBuf,

    /// Directory that receives the generated tree.
    out_dir: PathBuf,

    /// Log every artifact written.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Failed to initialize logger: {e}");
    }

    match compile(&args.document, &args.out_dir) {
        Ok(_) => ExitCode::SUCCESS,
        Err(GenError::Generation(e)) => {
            error!(
                "Generation failed in {}: {e}",
                e.template().unwrap_or("output")
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = colors.color(record.level()),
            ))
        })
        .chain(stderr())
        .apply()
}
