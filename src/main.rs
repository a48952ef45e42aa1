//! # Doc Assistant CLI (`dqa`)
//!
//! The `dqa` binary drives the whole pipeline: store initialization,
//! document ingestion, retrieval inspection, and question answering.
//!
//! ## Usage
//!
//! ```bash
//! dqa --config ./config/assistant.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dqa init` | Create the SQLite store schema (idempotent) |
//! | `dqa extract <file>` | Print the extracted text of a PDF/DOCX |
//! | `dqa ingest <file>` | Extract a document and upsert it into the collection |
//! | `dqa query "<text>"` | Print the top-N most similar stored texts |
//! | `dqa ask [question]` | Answer a question from retrieved context (loop without an argument) |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use doc_assistant::{ask, config, db, extract, ingest, retrieve};

/// Doc Assistant — single-document question answering over a local
/// vector store.
#[derive(Parser)]
#[command(
    name = "dqa",
    about = "Doc Assistant — ingest a PDF/DOCX and answer questions about it",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/assistant.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store schema.
    ///
    /// Creates the SQLite file and the entries table. Idempotent.
    Init,

    /// Extract and print the text of a PDF or DOCX file.
    Extract {
        /// Path to the source document.
        file: PathBuf,
    },

    /// Extract a document and upsert it into the collection.
    ///
    /// The filename stem becomes the entry id, so re-ingesting the same
    /// file overwrites its entry. Exits 0 on success or empty-extraction
    /// skip, 1 on any extraction, path, or store failure.
    Ingest {
        /// Path to the source document (.pdf or .docx).
        file: PathBuf,
    },

    /// Print the stored texts most similar to a query.
    Query {
        /// The query string.
        query: String,

        /// Number of results to return (defaults to retrieval.top_n).
        #[arg(long)]
        top: Option<usize>,
    },

    /// Answer a question from retrieved document context.
    ///
    /// With a question argument, answers once and exits; without one,
    /// enters an interactive loop (empty line quits). Requires
    /// OPENAI_API_KEY and a non-empty collection.
    Ask {
        /// The question. Omit for an interactive loop.
        question: Option<String>,

        /// Number of context snippets to retrieve (defaults to retrieval.top_n).
        #[arg(long)]
        top: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Needs no config or store.
        Commands::Extract { file } => {
            let text = extract::extract_text(&file)?;
            println!("{}", text);
        }
        Commands::Init => {
            let cfg = config::load_config(&cli.config)?;
            let pool = db::connect(&cfg.store).await?;
            db::ensure_schema(&pool).await?;
            pool.close().await;
            println!("Store initialized successfully.");
        }
        Commands::Ingest { file } => {
            let cfg = config::load_config(&cli.config)?;
            ingest::run_ingest(&cfg, &file).await?;
        }
        Commands::Query { query, top } => {
            let cfg = config::load_config(&cli.config)?;
            retrieve::run_query(&cfg, &query, top).await?;
        }
        Commands::Ask { question, top } => {
            let cfg = config::load_config(&cli.config)?;
            ask::run_ask(&cfg, question, top).await?;
        }
    }

    Ok(())
}
