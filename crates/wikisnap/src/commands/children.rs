//! `wikisnap children` command implementation.

use clap::Args;

use super::SnapshotArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the children command.
#[derive(Args)]
pub(crate) struct ChildrenArgs {
    /// Page url, or path relative to the base url.
    url: String,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

impl ChildrenArgs {
    /// Execute the children command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be constructed or the store fails
    /// while resolving children.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.snapshot.open()?;
        let page = session.construct(&self.url)?;
        let report = page.children_report(&session)?;

        for child in &report.pages {
            output.data(&format!("{}\t{}", child.url(), child.title()));
        }
        if report.backlink_fallback {
            output.warning("No candidate links back to this hub; listing all candidates");
        }
        output.info(&format!("{} children", report.pages.len()));
        Ok(())
    }
}
