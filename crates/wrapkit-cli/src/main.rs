//! wrapkit CLI - turn a web page into a native desktop installer.
//!
//! Parses arguments, sets up logging, dispatches the command and maps the
//! outcome to the process exit status.

use clap::Parser;
use std::process::ExitCode;
use wrapkit_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
        cli::Command::Init(init_args) => commands::init_execute(init_args).await,
        cli::Command::Schema => commands::schema_execute().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", error::cli_error_to_miette(err));
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
