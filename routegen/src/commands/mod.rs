mod check;
mod completions;
mod new;
mod tree;
mod update;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use new::NewCommand;
use routegen_manifest::{Manifest, RouteGenToml};
use tree::TreeCommand;
use update::UpdateCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for routegen_manifest::Result<T> {
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

/// Open routegen.toml, exiting with a diagnostic when it is invalid.
pub(crate) fn load_manifest(config: &Path) -> Manifest {
    RouteGenToml::open(config).unwrap_or_exit().into_manifest()
}

/// Arguments shared by the generating subcommands.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to routegen.toml (defaults to ./routegen.toml)
    #[arg(short, long, default_value = "routegen.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser)]
#[command(name = "routegen")]
#[command(version)]
#[command(about = "Generate Hertz route trees, handlers and clients from IDL operations")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::New(cmd) => cmd.run(),
            Commands::Update(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Tree(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new project layout from routegen.toml
    New(NewCommand),

    /// Regenerate an existing project, keeping hand-written code
    Update(UpdateCommand),

    /// Validate routegen.toml and report pending changes
    Check(CheckCommand),

    /// Show the route tree built from routegen.toml
    Tree(TreeCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
