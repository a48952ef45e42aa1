//! Interactive front-end: collect a question, retrieve context, answer.
//!
//! Pure orchestration. Missing credentials and a missing/empty collection
//! are fatal at startup; everything after that degrades per request
//! (no-context warning, completion-failure warning) and keeps the exit
//! code at zero.

use anyhow::{bail, Result};
use sqlx::SqlitePool;
use std::io::{BufRead, Write};

use crate::answer;
use crate::config::Config;
use crate::db;
use crate::retrieve;
use crate::store;

pub async fn run_ask(config: &Config, question: Option<String>, top: Option<usize>) -> Result<()> {
    // Credentials and the store handle are resolved once here and passed
    // down; nothing reads them as ambient state later.
    let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
        anyhow::anyhow!("OpenAI API key not found. Set OPENAI_API_KEY in your environment.")
    })?;

    let collection = &config.store.collection;
    let pool = db::connect(&config.store).await?;

    let count = store::count_entries(&pool, collection).await.map_err(|_| {
        anyhow::anyhow!(
            "store not initialized at {} — run `dqa init` and `dqa ingest <file>` first",
            config.store.path.display()
        )
    })?;
    if count == 0 {
        pool.close().await;
        bail!(
            "collection '{}' is empty — run `dqa ingest <file>` first",
            collection
        );
    }

    let n = top.unwrap_or(config.retrieval.top_n);

    match question {
        Some(q) => {
            ask_once(config, &pool, &api_key, &q, n).await;
        }
        None => {
            let stdin = std::io::stdin();
            loop {
                print!("question> ");
                std::io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let q = line.trim();
                if q.is_empty() {
                    break;
                }
                ask_once(config, &pool, &api_key, q, n).await;
            }
        }
    }

    pool.close().await;
    Ok(())
}

/// One retrieve-then-answer round. When no context is retrieved, the
/// completion collaborator is never called.
async fn ask_once(config: &Config, pool: &SqlitePool, api_key: &str, question: &str, n: usize) {
    if question.trim().is_empty() {
        return;
    }

    let snippets = retrieve::retrieve(pool, config, question, n).await;
    if snippets.is_empty() {
        println!("No relevant context found.");
        return;
    }

    let context = snippets
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    match answer::generate_answer(&config.completion, api_key, question, &context).await {
        Ok(ans) if !ans.is_empty() => {
            println!("Answer:");
            println!("{}", ans);
        }
        Ok(_) => eprintln!("Warning: completion returned an empty answer"),
        Err(e) => eprintln!("Warning: completion request failed: {}", e),
    }
}
