use std::process::ExitCode;

use clap::Parser;
use icongen::{cli::Cli, commands, logging, GenError};

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // 源/目标目录缺失只打印一行提示
            match err.downcast_ref::<GenError>() {
                Some(e @ (GenError::MissingSourceDir(_) | GenError::MissingOutputDir(_))) => {
                    eprintln!("❌ {e}");
                }
                _ => eprintln!("❌ {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
