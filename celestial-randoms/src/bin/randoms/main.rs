//! randoms: random point catalog tools
//!
//! Generates uniform random catalogs and splits large ones into
//! reproducible, equally sized pieces.

mod cli;
mod generate;
mod info;
mod split;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Split(args) => split::run(args, &cli),
        Commands::Generate(args) => generate::run(args, &cli),
        Commands::Info(args) => info::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}
