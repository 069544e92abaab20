use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::load_manifest;
use crate::{
    ops::{self, TreeFormat},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TreeCommand {
    /// Path to routegen.toml (defaults to ./routegen.toml)
    #[arg(short, long, default_value = "routegen.toml")]
    pub config: PathBuf,

    /// Print one line per handler instead of a tree
    #[arg(long, conflicts_with = "json")]
    pub flat: bool,

    /// Print the tree, with group and middleware names, as JSON
    #[arg(long)]
    pub json: bool,
}

impl TreeCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = load_manifest(&self.config);

        let format = if self.json {
            TreeFormat::Json
        } else if self.flat {
            TreeFormat::Flat
        } else {
            TreeFormat::Tree
        };
        let report = ops::tree(&manifest, format)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
