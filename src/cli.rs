use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fpp-install")]
#[command(version)]
#[command(about = "Installer hook for the FPP tool suite", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the tools version and install the FPP suite
    Install(InstallArgs),

    /// Print the resolved tools version and the derived package version
    Resolve(ResolveArgs),

    /// Print the release artifact filename for this platform
    Artifact,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct InstallArgs {
    /// Copy the installed entries into this directory before cleanup
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Accept the transient version record without checking its creator
    #[arg(long)]
    pub trust_version_file: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Accept the transient version record without checking its creator
    #[arg(long)]
    pub trust_version_file: bool,
}
