// CLI command definitions

use super::wrapgen::{CheckCommand, GenerateCommand, InspectCommand};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "clientset-wrapgen",
    version,
    about = "Metrics and tracing wrapper generator for Kubernetes clientsets",
    long_about = "Walks a declarative description of a clientset interface hierarchy and emits Go decorators recording metrics or tracing spans around every resource operation"
)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render every configured output and write the files that changed
    Generate(GenerateCommand),

    /// Fail when a generated file is missing or out of date
    Check(CheckCommand),

    /// List the clients and resources discovered in a schema
    Inspect(InspectCommand),
}
