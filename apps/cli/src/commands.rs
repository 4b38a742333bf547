//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use docdraft_core::{
    ContentService, DocumentAgent, SessionStore, TurnReply, Upload, content_service_from_config,
};
use docdraft_shared::{AppConfig, DocDraftError, DocumentRecord, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Conversation id used by the interactive chat.
const CHAT_CONVERSATION_ID: &str = "cli";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// DocDraft: turn solution documents into an architecture draft.
#[derive(Parser)]
#[command(
    name = "docdraft",
    version,
    about = "Summarize solution documents and draft a target architecture.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Summarize each document, then all of them together.
    Summarize {
        /// Documents to read (PDF, DOCX, images, plain text).
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Render the architecture draft for a set of documents.
    Draft {
        /// Documents to read (PDF, DOCX, images, plain text).
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the draft here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Interactive conversation: `/upload <paths..>`, free text, `reset`, `quit`.
    Chat,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docdraft=info",
        1 => "docdraft=debug",
        _ => "docdraft=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Summarize { files } => cmd_summarize(&files).await,
        Command::Draft { files, out } => cmd_draft(&files, out.as_deref()).await,
        Command::Chat => cmd_chat().await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_summarize(files: &[PathBuf]) -> Result<()> {
    let service = load_service()?;
    let documents = load_documents(service.as_ref(), files).await?;

    for record in &documents {
        println!("### {}", record.file_name);
        println!("{}", record.summary);
        println!();
    }

    let combined = service.summarize_documents(&documents).await?;
    println!("{combined}");
    Ok(())
}

async fn cmd_draft(files: &[PathBuf], out: Option<&Path>) -> Result<()> {
    let service = load_service()?;
    let documents = load_documents(service.as_ref(), files).await?;

    let draft = service.generate_architecture_document(&documents).await?;

    match out {
        Some(path) => {
            tokio::fs::write(path, format!("{draft}\n"))
                .await
                .map_err(|e| DocDraftError::io(path, e))?;
            info!(path = %path.display(), documents = documents.len(), "architecture draft written");
            println!("Draft written to: {}", path.display());
        }
        None => println!("{draft}"),
    }
    Ok(())
}

async fn cmd_chat() -> Result<()> {
    let service = load_service()?;
    let agent = DocumentAgent::new(service, Arc::new(SessionStore::new()));

    println!("{}", agent.welcome_message());
    println!("(type `/upload <paths..>` to add files, `reset` to start over, `quit` to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = match ChatLine::parse(&line) {
            ChatLine::Quit => break,
            ChatLine::Reset => {
                agent.reset(CHAT_CONVERSATION_ID);
                TurnReply {
                    messages: vec!["Session cleared.".to_string()],
                }
            }
            ChatLine::Upload(paths) => {
                let (uploads, mut messages) = read_uploads(paths).await;
                let mut reply = agent.handle_uploads(CHAT_CONVERSATION_ID, uploads).await;
                messages.append(&mut reply.messages);
                TurnReply { messages }
            }
            ChatLine::Text(text) => agent.handle_text(CHAT_CONVERSATION_ID, text).await,
        };

        for message in reply.messages {
            println!("{message}");
            println!();
        }
    }

    Ok(())
}

/// One line typed into `chat`.
#[derive(Debug, PartialEq, Eq)]
enum ChatLine<'a> {
    Quit,
    Reset,
    /// `/upload <paths..>`: the whitespace-separated paths.
    Upload(&'a str),
    /// Anything else goes to the agent as conversation text.
    Text(&'a str),
}

impl<'a> ChatLine<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match command {
            "quit" | "exit" if rest.is_empty() => Self::Quit,
            "reset" if rest.is_empty() => Self::Reset,
            "/upload" => Self::Upload(rest.trim()),
            _ => Self::Text(line),
        }
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_service() -> Result<Arc<dyn ContentService>> {
    let config = load_config()?;
    Ok(content_service_from_config(&config)?)
}

/// Read, extract, and summarize every file. Any failure aborts the command.
async fn load_documents(
    service: &dyn ContentService,
    files: &[PathBuf],
) -> Result<Vec<DocumentRecord>> {
    let progress = CliProgress::new();
    let mut documents = Vec::with_capacity(files.len());

    for (i, path) in files.iter().enumerate() {
        let name = file_name_of(path);
        progress.file(&name, i + 1, files.len());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DocDraftError::io(path, e))?;
        let content = service.extract_content(&name, None, &bytes).await?;
        let summary = service
            .summarize_document(&name, &content)
            .await
            .wrap_err_with(|| format!("failed to summarize {name}"))?;

        documents.push(DocumentRecord::new(Some(name.as_str()), content).with_summary(summary));
    }

    progress.finish();

    if documents.is_empty() {
        return Err(eyre!("no documents to process"));
    }
    info!(documents = documents.len(), service = service.name(), "documents processed");
    Ok(documents)
}

/// Read the whitespace-separated paths of an `/upload` line. Unreadable files
/// are reported back instead of aborting the chat.
async fn read_uploads(paths: &str) -> (Vec<Upload>, Vec<String>) {
    let mut uploads = Vec::new();
    let mut messages = Vec::new();

    for raw in paths.split_whitespace() {
        let path = Path::new(raw);
        match tokio::fs::read(path).await {
            Ok(bytes) => uploads.push(Upload::new(file_name_of(path), bytes)),
            Err(e) => {
                warn!(path = raw, error = %e, "cannot read upload");
                messages.push(format!("I could not open {raw}: {e}"));
            }
        }
    }

    (uploads, messages)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Spinner shown while documents are processed.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn file(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Processing [{current}/{total}] {name}"));
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_draft_with_out() {
        let cli = Cli::parse_from(["docdraft", "draft", "a.pdf", "b.docx", "--out", "arch.md"]);
        match cli.command {
            Command::Draft { files, out } => {
                assert_eq!(files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
                assert_eq!(out, Some(PathBuf::from("arch.md")));
            }
            _ => panic!("expected draft"),
        }
    }

    #[test]
    fn summarize_requires_files() {
        assert!(Cli::try_parse_from(["docdraft", "summarize"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["docdraft", "-vv", "chat"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Chat));
    }

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name_of(Path::new("/tmp/docs/plan.pdf")), "plan.pdf");
    }

    #[test]
    fn chat_lines_route_uploads_only_on_command() {
        assert_eq!(ChatLine::parse("  quit "), ChatLine::Quit);
        assert_eq!(ChatLine::parse("reset"), ChatLine::Reset);
        assert_eq!(
            ChatLine::parse("/upload a.pdf  b.docx"),
            ChatLine::Upload("a.pdf  b.docx")
        );
        assert_eq!(
            ChatLine::parse("upload more docs"),
            ChatLine::Text("upload more docs")
        );
        assert_eq!(
            ChatLine::parse("reset the plan"),
            ChatLine::Text("reset the plan")
        );
        assert_eq!(ChatLine::parse(""), ChatLine::Text(""));
    }

    #[tokio::test]
    async fn unreadable_uploads_are_reported() {
        let (uploads, messages) = read_uploads("/definitely/not/here.pdf").await;
        assert!(uploads.is_empty());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("I could not open /definitely/not/here.pdf"));
    }
}
