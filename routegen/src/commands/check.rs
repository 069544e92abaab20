use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::load_manifest;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to routegen.toml (defaults to ./routegen.toml)
    #[arg(short, long, default_value = "routegen.toml")]
    pub config: PathBuf,

    /// Project directory to compare against (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = load_manifest(&self.config);

        let report = ops::check(&manifest, &self.config, &self.output);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
