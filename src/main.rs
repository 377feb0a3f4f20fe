mod cursor;
mod errors;
mod node;
mod pager;
mod repl;
mod row;
mod statement;
mod table;

use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("tdb.log")
        .expect("Failed to open log file");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args();
    let _program = args.next();
    let Some(db_path) = args.next() else {
        eprintln!("A database filename is required.");
        return ExitCode::FAILURE;
    };

    match repl::start(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
