//! `wikisnap check` command implementation.

use clap::Args;

use super::SnapshotArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Also resolve the children of every page.
    #[arg(long)]
    children: bool,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

/// Tally of a check run.
#[derive(Default)]
struct Summary {
    pages: usize,
    articles: usize,
    faults: usize,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Per-page faults are reported and counted without stopping the run.
    ///
    /// # Errors
    ///
    /// Returns an error only if the snapshot store fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.snapshot.open()?;
        let mut summary = Summary::default();

        for url in session.store().urls()? {
            summary.pages += 1;
            let page = match session.construct(&url) {
                Ok(page) => page,
                Err(e) if e.is_page_fault() => {
                    summary.faults += 1;
                    output.warning(&format!("{url}: {e}"));
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(fault) = page.content_fault() {
                summary.faults += 1;
                output.warning(&format!("{url}: {fault}"));
            } else if !page.content().is_absent() {
                summary.articles += 1;
            }

            if self.children {
                let report = page.children_report(&session)?;
                if report.backlink_fallback {
                    output.info(&format!("{url}: hub children are unconfirmed"));
                }
            }
        }

        let message = format!(
            "Checked {} pages: {} articles, {} faults",
            summary.pages, summary.articles, summary.faults
        );
        if summary.faults == 0 {
            output.success(&message);
        } else {
            output.warning(&message);
        }
        Ok(())
    }
}
