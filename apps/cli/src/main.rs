//! DocDraft CLI: summarize solution documents and draft an architecture.
//!
//! Reads PDF and Word files from disk, summarizes them, and renders a
//! Markdown architecture draft, either in one shot or as a conversation.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
