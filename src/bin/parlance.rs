//! Parlance CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, error};

use parlance::cli::args::*;
use parlance::cli::commands::*;
use parlance::error::ParlanceError;

fn main() {
    let args = ParlanceArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let command = format!("{:?}", args.command);
    if let Err(e) = execute_command(args).with_context(|| format!("command failed: {command}")) {
        eprintln!("Error: {e:#}");
        let code = match e.downcast_ref::<ParlanceError>() {
            Some(err) if err.is_startup_failure() => {
                error!("Startup failed; no turns were processed");
                err.exit_code()
            }
            Some(err) => err.exit_code(),
            None => 1,
        };
        process::exit(code);
    }
}
