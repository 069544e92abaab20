use clap::Args;
use eyre::Result;

use super::{GenerateArgs, load_manifest};
use crate::{
    ops::{self, GenerateMode, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

impl UpdateCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = load_manifest(&self.args.config);

        let report = ops::generate(
            &manifest,
            GenerateOptions {
                output_dir: &self.args.output,
                dry_run: self.args.dry_run,
                mode: GenerateMode::Update,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
