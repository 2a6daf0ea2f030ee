use clap::Args;
use eyre::Result;
use refpages_manifest::DocumentFile;

use super::{ProjectArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Preview generated pages without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let project = self.project.project()?;
        let file = DocumentFile::open(&project.input).unwrap_or_exit();

        let report = ops::generate(
            file.document(),
            ops::generate::GenerateOptions {
                input: file.path(),
                project: &project,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
