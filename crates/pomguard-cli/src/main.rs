//! pomguard - unified CLI entrypoint.
//!
//! Usage:
//!   pomguard audit [--pom pom.xml] [--expect group:artifact[=version]]... [--cutover DATE]
//!   pomguard audit --list
//!   pomguard bind [--group-id ID] [--apply]
//!   pomguard config show

mod cli;
mod commands;

use std::fmt::Display;

use clap::Parser;
use pomguard_core::constants::EXIT_ERROR;
use pomguard_core::tracing::init_tracing;
use pomguard_core::GuardErrorCode;

use crate::cli::{Cli, Commands};
use crate::commands::{run_audit, run_bind, run_config};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config_path = cli.config.as_deref();
    let code = match cli.command {
        Commands::Audit(args) => run_audit(args, config_path).unwrap_or_else(fail),
        Commands::Bind(args) => run_bind(args, config_path).unwrap_or_else(fail),
        Commands::Config(args) => run_config(args, config_path).unwrap_or_else(fail),
    };
    std::process::exit(code);
}

/// Report an aborting error on stderr and map it to the error exit code.
fn fail<E: GuardErrorCode + Display>(error: E) -> i32 {
    tracing::debug!(code = error.error_code(), "command failed");
    eprintln!("{}", error.tagged());
    EXIT_ERROR
}
