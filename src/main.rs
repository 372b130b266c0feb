mod cli;
mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity. Diagnostics carry the severity
    // tag; the install hook is chatty at INFO by default so the host build
    // log shows which acquisition tier ran.
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Install(args) => commands::install::run(&args),
        Command::Resolve(args) => commands::resolve::run(&args),
        Command::Artifact => commands::resolve::artifact(),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "fpp-install", &mut io::stdout());
            Ok(())
        }
    };

    // Every unrecoverable condition ends here: one diagnostic line, then a
    // non-zero exit. Library code never terminates the process itself.
    if let Err(err) = result {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
