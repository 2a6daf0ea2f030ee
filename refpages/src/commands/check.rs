use clap::Args;
use eyre::Result;
use refpages_manifest::DocumentFile;

use super::{ProjectArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let project = self.project.project()?;
        let file = DocumentFile::open(&project.input).unwrap_or_exit();

        let report = ops::check(file.path(), file.document());
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
