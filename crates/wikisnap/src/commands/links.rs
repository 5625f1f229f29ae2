//! `wikisnap links` command implementation.

use clap::Args;

use super::SnapshotArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    /// Page url, or path relative to the base url.
    url: String,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be constructed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.snapshot.open()?;
        let page = session.construct(&self.url)?;

        for link in page.links() {
            output.data(link);
        }
        Ok(())
    }
}
