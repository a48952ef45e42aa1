//! Index population: extract one document and upsert it into the store.
//!
//! The whole document is stored as a single entry — retrieval granularity
//! is "whole document", a deliberate policy choice. Embedding failure is
//! non-fatal: the entry is stored without a vector and can be embedded on
//! a later re-ingest. Empty extraction is a logged skip, not a failure.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::db;
use crate::embedding;
use crate::extract;
use crate::models::StoredEntry;
use crate::store;

pub async fn run_ingest(config: &Config, file: &Path) -> Result<()> {
    let resolved = std::fs::canonicalize(file)
        .with_context(|| format!("file not found: {}", file.display()))?;

    let name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| resolved.display().to_string());

    let text = extract::extract_text(&resolved)?;

    if text.trim().is_empty() {
        eprintln!("Warning: no text extracted from '{}'; nothing stored", name);
        return Ok(());
    }

    let id = resolved
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.clone());

    let collection = &config.store.collection;
    let pool = db::connect(&config.store).await?;
    db::ensure_schema(&pool).await?;

    let text_hash = store::hash_text(&text);
    let existing = store::entry_state(&pool, collection, &id).await?;

    let status = match existing {
        Some((ref hash, true)) if hash == &text_hash => "up to date",
        _ => {
            let (vector, model, status) = embed_document(config, &text).await;
            let entry = StoredEntry {
                id: id.clone(),
                source: name.clone(),
                text: text.clone(),
                text_hash,
                embedding: vector,
                model,
                updated_at: chrono::Utc::now().timestamp(),
            };
            store::upsert_entry(&pool, collection, &entry).await?;
            status
        }
    };

    let count = store::count_entries(&pool, collection).await?;

    println!("ingest {}", name);
    println!("  id: {}", id);
    println!("  collection: {}", collection);
    println!("  characters: {}", text.chars().count());
    println!("  embedding: {}", status);
    println!("  entries in collection: {}", count);
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Embed the full document text. Non-fatal: on failure (or a disabled
/// provider) the entry is stored without a vector, status "pending".
async fn embed_document(config: &Config, text: &str) -> (Option<Vec<f32>>, Option<String>, &'static str) {
    if !config.embedding.is_enabled() {
        eprintln!("Warning: embedding provider is disabled; entry stored without a vector");
        return (None, None, "pending");
    }

    let provider = match embedding::create_provider(&config.embedding) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Warning: embedding provider unavailable: {}", e);
            return (None, None, "pending");
        }
    };

    match embedding::embed_query(provider.as_ref(), &config.embedding, text).await {
        Ok(vector) => {
            let model = Some(provider.model_name().to_string());
            (Some(vector), model, "yes")
        }
        Err(e) => {
            eprintln!("Warning: embedding failed: {}", e);
            (None, None, "pending")
        }
    }
}
