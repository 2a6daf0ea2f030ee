mod check;
mod completions;
mod generate;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use refpages_manifest::Config;

use crate::project::Project;

/// Extension trait for exiting on document errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for refpages_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "refpages")]
#[command(version)]
#[command(about = "Generate reStructuredText API reference pages from a YAML document")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the page tree and publish it to the output directory
    Generate(GenerateCommand),

    /// Load and validate the document without generating pages
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Options locating the document and the output, shared by subcommands.
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to refpages.toml (defaults to ./refpages.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root document, or a directory holding index.yaml
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory the generated tree is published to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extension of generated page files
    #[arg(long)]
    pub extension: Option<String>,
}

impl ProjectArgs {
    /// Load the configuration and apply the command-line overrides.
    pub fn project(&self) -> Result<Project> {
        let config = match &self.config {
            Some(path) => Config::from_file(path),
            None => Config::discover("."),
        }
        .unwrap_or_exit();

        Project::resolve(
            &config,
            self.input.clone(),
            self.output.clone(),
            self.extension.clone(),
        )
    }
}
