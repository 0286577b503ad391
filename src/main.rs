// src/main.rs

use std::process::ExitCode;

use gloc::engine::RunReport;
use gloc::exit::exit_status;
use gloc::{cli, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let result = run_main().await;
    if let Err(err) = &result {
        eprintln!("gloc error: {err:?}");
    }
    ExitCode::from(exit_status(&result))
}

async fn run_main() -> anyhow::Result<RunReport> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    Ok(run(args).await?)
}
