//! wikisnap CLI - browse the document model of a captured wiki snapshot.
//!
//! Provides commands for:
//! - `show`: Content and metadata of a page
//! - `children`: Structural children of a page
//! - `links`: Internal links of a page
//! - `tag`: Pages carrying a tag
//! - `check`: Construct every page and report faults

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ChildrenArgs, LinksArgs, ShowArgs, SnapshotArgs, TagArgs};
use output::Output;

/// wikisnap - wiki snapshot document model.
#[derive(Parser)]
#[command(name = "wikisnap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show content and metadata of a page.
    Show(ShowArgs),
    /// List the structural children of a page.
    Children(ChildrenArgs),
    /// List the internal links of a page.
    Links(LinksArgs),
    /// List the pages carrying a tag.
    Tag(TagArgs),
    /// Construct every page in the snapshot and report faults.
    Check(CheckArgs),
}

impl Commands {
    fn snapshot_args(&self) -> &SnapshotArgs {
        match self {
            Self::Show(args) => &args.snapshot,
            Self::Children(args) => &args.snapshot,
            Self::Links(args) => &args.snapshot,
            Self::Tag(args) => &args.snapshot,
            Self::Check(args) => &args.snapshot,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.snapshot_args().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Show(args) => args.execute(),
        Commands::Children(args) => args.execute(),
        Commands::Links(args) => args.execute(),
        Commands::Tag(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
