//! `wikisnap tag` command implementation.

use clap::Args;

use super::SnapshotArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tag command.
#[derive(Args)]
pub(crate) struct TagArgs {
    /// Tag name, e.g. `scp` or `hub`.
    tag: String,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

impl TagArgs {
    /// Execute the tag command.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag was never captured.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.snapshot.open()?;

        for url in session.store().tag(&self.tag)? {
            output.data(&url);
        }
        Ok(())
    }
}
