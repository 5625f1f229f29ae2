//! `wikisnap show` command implementation.

use clap::Args;
use wikisnap_model::{AuthorRole, Content, PageModel};

use super::SnapshotArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Page url, or path relative to the base url.
    url: String,

    /// Print the page model as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be opened or the page cannot
    /// be constructed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.snapshot.open()?;
        let page = session.construct(&self.url)?;

        if self.json {
            output.data(&serde_json::to_string_pretty(&page)?);
        } else {
            print_page(&output, &page);
        }
        Ok(())
    }
}

fn print_page(output: &Output, page: &PageModel) {
    output.heading(page.title());
    output.data(&format!("url:       {}", page.url()));
    output.data(&format!("tags:      {}", page.tags().join(", ")));
    output.data(&format!("rating:    {}", page.rating().unwrap_or("-")));
    output.data(&format!("comments:  {}", page.comment_count()));

    let authors: Vec<String> = page
        .authors()
        .iter()
        .map(|a| match a.role {
            AuthorRole::Original => a.username.clone(),
            AuthorRole::Rewrite => format!("{} (rewrite)", a.username),
        })
        .collect();
    output.data(&format!("authors:   {}", authors.join(", ")));
    output.data(&format!("revisions: {}", page.history().len()));
    output.data(&format!("votes:     {}", page.votes().len()));
    for image in page.images() {
        output.data(&format!("image:     {image}"));
    }

    match page.content() {
        Content::Article(html) => {
            output.data("");
            output.data(html);
        }
        Content::Absent => output.warning("No content (not an article)"),
        Content::Malformed(fault) => output.warning(&format!("Malformed content: {fault}")),
    }
}
