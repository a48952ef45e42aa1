//! Vector store collaborator, reached only through a minimal
//! upsert/query surface over SQLite.
//!
//! Entries are keyed by `(collection, id)`, so re-ingesting a document
//! overwrites its entry. Similarity ranking happens in Rust over the
//! stored embedding BLOBs; entries without a vector (embedding pending)
//! are stored but never ranked.

use anyhow::Result;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};

use crate::embedding;
use crate::models::{Snippet, StoredEntry};

/// SHA-256 hex digest of entry text, used to skip re-embedding unchanged documents.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Idempotent upsert by `(collection, id)`.
pub async fn upsert_entry(pool: &SqlitePool, collection: &str, entry: &StoredEntry) -> Result<()> {
    let blob = entry.embedding.as_ref().map(|v| embedding::vec_to_blob(v));

    sqlx::query(
        r#"
        INSERT INTO entries (id, collection, source, text, text_hash, embedding, model, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(collection, id) DO UPDATE SET
            source = excluded.source,
            text = excluded.text,
            text_hash = excluded.text_hash,
            embedding = excluded.embedding,
            model = excluded.model,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&entry.id)
    .bind(collection)
    .bind(&entry.source)
    .bind(&entry.text)
    .bind(&entry.text_hash)
    .bind(blob)
    .bind(&entry.model)
    .bind(entry.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Stored text hash and whether a vector is present, for staleness checks.
pub async fn entry_state(
    pool: &SqlitePool,
    collection: &str,
    id: &str,
) -> Result<Option<(String, bool)>> {
    let row = sqlx::query(
        "SELECT text_hash, embedding IS NOT NULL AS has_vector FROM entries WHERE collection = ? AND id = ?",
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| {
        let hash: String = r.get("text_hash");
        let has_vector: bool = r.get("has_vector");
        (hash, has_vector)
    }))
}

pub async fn count_entries(pool: &SqlitePool, collection: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries WHERE collection = ?")
        .bind(collection)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// An entry that carries an embedding vector, ready for ranking.
#[derive(Debug, Clone)]
pub struct EmbeddedEntry {
    pub id: String,
    pub source: String,
    pub text: String,
    pub vector: Vec<f32>,
}

/// All entries in the collection that have a stored vector.
pub async fn fetch_embedded(pool: &SqlitePool, collection: &str) -> Result<Vec<EmbeddedEntry>> {
    let rows = sqlx::query(
        "SELECT id, source, text, embedding FROM entries WHERE collection = ? AND embedding IS NOT NULL",
    )
    .bind(collection)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .iter()
        .map(|row| {
            let blob: Vec<u8> = row.get("embedding");
            EmbeddedEntry {
                id: row.get("id"),
                source: row.get("source"),
                text: row.get("text"),
                vector: embedding::blob_to_vec(&blob),
            }
        })
        .collect();

    Ok(entries)
}

/// Rank entries by cosine similarity to the query vector, most similar
/// first, ties broken by id for deterministic output. Returns at most `n`.
pub fn rank_by_similarity(query_vec: &[f32], entries: &[EmbeddedEntry], n: usize) -> Vec<Snippet> {
    let mut scored: Vec<(&EmbeddedEntry, f64)> = entries
        .iter()
        .map(|e| (e, embedding::cosine_similarity(query_vec, &e.vector) as f64))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.id.cmp(&b.0.id))
    });

    scored
        .into_iter()
        .take(n)
        .map(|(e, score)| Snippet {
            text: e.text.clone(),
            source: e.source.clone(),
            score,
        })
        .collect()
}
