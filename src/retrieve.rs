//! Retriever: top-N most similar stored texts for a query.
//!
//! The retriever's whole contract is "top-N texts for this query, degrade
//! to an empty list on any fault". It never raises to the caller; faults
//! print one warning to stderr and the front-end decides presentation.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::embedding;
use crate::models::Snippet;
use crate::store;

pub async fn retrieve(pool: &SqlitePool, config: &Config, query: &str, n: usize) -> Vec<Snippet> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let provider = match embedding::create_provider(&config.embedding) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Warning: embedding provider unavailable: {}", e);
            return Vec::new();
        }
    };

    let query_vec = match embedding::embed_query(provider.as_ref(), &config.embedding, query).await {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Warning: could not embed query: {}", e);
            return Vec::new();
        }
    };

    // A missing table or empty collection lands here as Err/empty and
    // degrades the same way.
    let entries = match store::fetch_embedded(pool, &config.store.collection).await {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Warning: store query failed: {}", e);
            return Vec::new();
        }
    };

    store::rank_by_similarity(&query_vec, &entries, n)
}

/// CLI entry point: print ranked snippets with scores, or `No results.`.
pub async fn run_query(config: &Config, query: &str, top: Option<usize>) -> Result<()> {
    let n = top.unwrap_or(config.retrieval.top_n);
    let pool = db::connect(&config.store).await?;
    let snippets = retrieve(&pool, config, query, n).await;

    if snippets.is_empty() {
        println!("No results.");
        pool.close().await;
        return Ok(());
    }

    for (i, snippet) in snippets.iter().enumerate() {
        println!("{}. [{:.3}] {}", i + 1, snippet.score, snippet.source);
        println!(
            "   excerpt: \"{}\"",
            excerpt(&snippet.text, 240).replace('\n', " ")
        );
        println!();
    }

    pool.close().await;
    Ok(())
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.trim().to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
