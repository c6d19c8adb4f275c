//! news-thread command line host
//!
//! Plays the part of the UI: `search` is the search box, `history` the
//! history panel, `export` the download trigger. Dialog messages go to
//! stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use news_thread::{
    config::{self, Settings},
    search::{
        render_emphasis, summary_preview, Emphasis, SubmitOutcome, EMPTY_HISTORY_MESSAGE,
    },
    ApiClient, DocumentExporter, FileStore, LayoutPreset, SearchOrchestrator,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "news-thread", version, about = "Search news topics and export summaries as PDF")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print whole summaries instead of previews
    #[arg(long, global = true)]
    full: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search a topic, from cache when it was searched before
    Search {
        /// Topic to search
        topic: Vec<String>,
    },
    /// Show the search history, most recent first
    History {
        /// Re-run the history entry at this position (1-based)
        #[arg(long)]
        run: Option<usize>,
    },
    /// Forget the search history and every cached result
    ClearHistory,
    /// Search a topic and save the results as a PDF
    Export {
        /// Topic to export
        topic: Vec<String>,
        /// Layout preset (compact or cover-page)
        #[arg(short, long)]
        preset: Option<LayoutPreset>,
        /// Directory to write the document to
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;

    init_logging(&settings);
    info!("Starting news-thread v{}", news_thread::VERSION);

    let client = ApiClient::from_settings(&settings)?;
    info!("Using summary endpoint {}", client.endpoint());
    let store = FileStore::new(settings.storage.resolved_dir());
    info!("Using data directory {}", store.dir().display());
    let mut orchestrator = SearchOrchestrator::new(Arc::new(client), Arc::new(store));

    let full = cli.full;
    let ok = match cli.command {
        Command::Search { topic } => {
            orchestrator.set_topic(topic.join(" "));
            let outcome = orchestrator.submit_current().await;
            report_search(&orchestrator, outcome.ok(), full)
        }
        Command::History { run: None } => {
            let entries = orchestrator.history().entries();
            if entries.is_empty() {
                println!("{}", EMPTY_HISTORY_MESSAGE);
            } else {
                for (i, topic) in entries.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, topic);
                }
                println!();
                println!("Clear all history: news-thread clear-history");
            }
            true
        }
        Command::History { run: Some(position) } => {
            let entry = position
                .checked_sub(1)
                .and_then(|i| orchestrator.history().entries().get(i).cloned());
            match entry {
                Some(topic) => {
                    orchestrator.open_history_panel();
                    let outcome = orchestrator.select_history_item(&topic).await;
                    report_search(&orchestrator, outcome.ok(), full)
                }
                None => {
                    eprintln!("Error: no history entry at position {}", position);
                    false
                }
            }
        }
        Command::ClearHistory => {
            if orchestrator.can_clear_history() {
                orchestrator.clear_history();
                println!("History and cached results cleared.");
            } else {
                println!("{}", EMPTY_HISTORY_MESSAGE);
            }
            true
        }
        Command::Export { topic, preset, out } => {
            orchestrator.set_topic(topic.join(" "));
            let outcome = orchestrator.submit_current().await;
            if !report_search(&orchestrator, outcome.ok(), full) {
                false
            } else if orchestrator.articles().is_empty() {
                eprintln!("Error: nothing to export");
                false
            } else {
                export(&orchestrator, &settings, preset, out)
            }
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging(settings: &Settings) {
    let level = if settings.general.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the result list or the error dialog; false on error
fn report_search(
    orchestrator: &SearchOrchestrator,
    outcome: Option<SubmitOutcome>,
    full: bool,
) -> bool {
    if orchestrator.error_dialog_visible() {
        if let Some(message) = orchestrator.error() {
            eprintln!("Error: {}", message);
        }
        return false;
    }

    let articles = orchestrator.articles();
    if articles.is_empty() {
        println!(
            "No articles found for \"{}\". Please try a different topic.",
            orchestrator.topic()
        );
        return true;
    }

    if outcome == Some(SubmitOutcome::CacheHit) {
        info!("Results served from cache");
    }
    let emphasis = if std::io::stdout().is_terminal() {
        Emphasis::Ansi
    } else {
        Emphasis::Plain
    };
    let total = articles.len();
    for (i, article) in articles.iter().enumerate() {
        let title = render_emphasis(&article.title, emphasis);
        println!("[{}/{}] {} ({})", i + 1, total, title, article.source);
        let summary = summary_preview(&article.summary, full);
        println!("    {}", render_emphasis(&summary.text, emphasis));
        if summary.truncated && !full {
            println!("    (Read more: rerun with --full)");
        }
        println!("    {}", article.url);
        println!();
    }
    true
}

fn export(
    orchestrator: &SearchOrchestrator,
    settings: &Settings,
    preset: Option<LayoutPreset>,
    out: Option<PathBuf>,
) -> bool {
    let mut exporter = DocumentExporter::from_settings(&settings.export);
    if let Some(preset) = preset {
        exporter = DocumentExporter::new(preset).with_attribution(settings.export.attribution.clone());
    }
    let dir = out.unwrap_or_else(|| settings.export.output_dir.clone());
    info!("Exporting with {} layout", exporter.preset());

    // Render failures are logged by the exporter itself
    let document = match orchestrator.export_current(&exporter) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            return false;
        }
    };

    match document.save_to(&dir) {
        Ok(path) => {
            println!("Saved {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to save {}: {}", document.filename, e);
            eprintln!("Error: {}", e.user_message());
            false
        }
    }
}
