//! Core data types that flow through the ingestion and retrieval pipeline.

/// One unit of text plus metadata held in the vector store.
///
/// The id is derived from the source filename stem, so re-ingesting the
/// same file overwrites its entry rather than adding a second one.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub id: String,
    pub source: String,
    pub text: String,
    pub text_hash: String,
    pub embedding: Option<Vec<f32>>,
    pub model: Option<String>,
    pub updated_at: i64,
}

/// A retrieval result: stored text ranked by similarity to a query.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub text: String,
    pub source: String,
    pub score: f64,
}
