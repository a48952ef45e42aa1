//! Embedding collaborator: turns text into vectors for similarity search.
//!
//! Providers:
//! - `openai` — `POST /v1/embeddings`, bearer auth from `OPENAI_API_KEY`;
//! - `ollama` — `POST {url}/api/embed` against a local instance;
//! - `disabled` — always errors; retrieval degrades to an empty result.
//!
//! Use [`create_provider`] to instantiate a provider from configuration,
//! then pass it to [`embed_texts`] / [`embed_query`]. Construction
//! fail-fasts on missing model/dims and (for OpenAI) a missing API key;
//! every returned vector is checked against the provider's declared
//! dimensionality.
//!
//! HTTP calls retry transient failures (429, 5xx, network errors) with
//! exponential backoff capped at 2^5 seconds; other 4xx fail immediately.
//! Also holds the vector utilities used by the store: little-endian f32
//! BLOB encoding and cosine similarity.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::EmbeddingConfig;

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Interface for embedding backends. The embedding computation itself is
/// performed by [`embed_texts`] (kept as a free function due to async
/// trait limitations); the provider supplies the model name sent on the
/// wire and the expected vector dimensionality.
pub trait EmbeddingProvider: Send + Sync {
    fn model_name(&self) -> &str;
    fn dims(&self) -> usize;
}

pub struct DisabledProvider;

impl EmbeddingProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }
    fn dims(&self) -> usize {
        0
    }
}

pub struct OpenAiProvider {
    model: String,
    dims: usize,
}

impl OpenAiProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for OpenAI provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for OpenAI provider"))?;
        if std::env::var("OPENAI_API_KEY").is_err() {
            bail!("OPENAI_API_KEY environment variable not set");
        }
        Ok(Self { model, dims })
    }
}

impl EmbeddingProvider for OpenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

pub struct OllamaProvider {
    model: String,
    dims: usize,
}

impl OllamaProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for Ollama provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for Ollama provider"))?;
        Ok(Self { model, dims })
    }
}

impl EmbeddingProvider for OllamaProvider {
    fn model_name(&self) -> &str {
        &self.model
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

/// Instantiate the provider named by the configuration.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledProvider)),
        "openai" => Ok(Box::new(OpenAiProvider::new(config)?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(config)?)),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

/// Embed a batch of texts, returning one vector per input in order.
///
/// Dispatches on the config's `provider` field; the provider supplies
/// the model name for the request and the expected dimensionality of
/// each returned vector.
pub async fn embed_texts(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let body = serde_json::json!({
        "model": provider.model_name(),
        "input": texts,
    });

    let vectors = match config.provider.as_str() {
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;
            let json = post_json_with_retry(
                OPENAI_EMBEDDINGS_URL,
                Some(&api_key),
                &body,
                config.timeout_secs,
                config.max_retries,
            )
            .await?;
            parse_openai_embeddings(&json)?
        }
        "ollama" => {
            let base = config.url.as_deref().unwrap_or(OLLAMA_DEFAULT_URL);
            let json = post_json_with_retry(
                &format!("{}/api/embed", base),
                None,
                &body,
                config.timeout_secs,
                config.max_retries,
            )
            .await?;
            parse_ollama_embeddings(&json)?
        }
        "disabled" => bail!("Embedding provider is disabled"),
        other => bail!("Unknown embedding provider: {}", other),
    };

    for vector in &vectors {
        if vector.len() != provider.dims() {
            bail!(
                "embedding has {} dimensions, expected {}",
                vector.len(),
                provider.dims()
            );
        }
    }

    Ok(vectors)
}

/// Embed a single query string.
pub async fn embed_query(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    text: &str,
) -> Result<Vec<f32>> {
    let results = embed_texts(provider, config, &[text.to_string()]).await?;
    results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Empty embedding response"))
}

/// POST a JSON body, retrying 429/5xx and network errors with backoff.
async fn post_json_with_retry(
    url: &str,
    bearer: Option<&str>,
    body: &serde_json::Value,
    timeout_secs: u64,
    max_retries: u32,
) -> Result<serde_json::Value> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    let mut last_err = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tokio::time::sleep(delay).await;
        }

        let mut req = client.post(url).header("Content-Type", "application/json");
        if let Some(key) = bearer {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        match req.json(body).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response.json().await?);
                }
                let body_text = response.text().await.unwrap_or_default();
                if status.as_u16() == 429 || status.is_server_error() {
                    last_err = Some(anyhow::anyhow!("API error {}: {}", status, body_text));
                    continue;
                }
                bail!("API error {}: {}", status, body_text);
            }
            Err(e) => {
                last_err = Some(e.into());
                continue;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Embedding failed after retries")))
}

fn parse_openai_embeddings(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing data array"))?;

    data.iter()
        .map(|item| {
            let embedding = item
                .get("embedding")
                .and_then(|e| e.as_array())
                .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing embedding"))?;
            Ok(embedding
                .iter()
                .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                .collect::<Vec<f32>>())
        })
        .collect()
}

fn parse_ollama_embeddings(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let embeddings = json
        .get("embeddings")
        .and_then(|e| e.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: missing embeddings array"))?;

    embeddings
        .iter()
        .map(|embedding| {
            Ok(embedding
                .as_array()
                .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: embedding is not an array"))?
                .iter()
                .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                .collect::<Vec<f32>>())
        })
        .collect()
}

/// Encode a float vector as little-endian f32 bytes for BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for &v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode a BLOB back into a float vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Cosine similarity in [-1, 1]; 0.0 for empty or mismatched vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn blob_roundtrip() {
        let vec = vec![1.0f32, -2.5, 3.125, 0.0, -0.001];
        let blob = vec_to_blob(&vec);
        assert_eq!(blob.len(), vec.len() * 4);
        assert_eq!(blob_to_vec(&blob), vec);
    }

    #[test]
    fn cosine_identical_is_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_is_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn cosine_degenerate_inputs_are_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn disabled_provider_has_no_model() {
        let provider = create_provider(&EmbeddingConfig::default()).unwrap();
        assert_eq!(provider.model_name(), "disabled");
        assert_eq!(provider.dims(), 0);
    }

    #[test]
    fn ollama_provider_requires_model_and_dims() {
        let config = EmbeddingConfig {
            provider: "ollama".to_string(),
            ..EmbeddingConfig::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[tokio::test]
    async fn disabled_provider_errors_on_embed() {
        let config = EmbeddingConfig::default();
        let provider = create_provider(&config).unwrap();
        let err = embed_texts(provider.as_ref(), &config, &["hello".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn ollama_config(url: String, dims: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: "ollama".to_string(),
            model: Some("nomic-embed-text".to_string()),
            dims: Some(dims),
            url: Some(url),
            max_retries: 2,
            ..EmbeddingConfig::default()
        }
    }

    #[tokio::test]
    async fn ollama_provider_embeds_through_configured_url() {
        let router = Router::new().route(
            "/api/embed",
            post(|| async { Json(serde_json::json!({ "embeddings": [[0.6, 0.8]] })) }),
        );
        let url = spawn_stub(router).await;

        let config = ollama_config(url, 2);
        let provider = create_provider(&config).unwrap();
        let vector = embed_query(provider.as_ref(), &config, "hello")
            .await
            .unwrap();
        assert_eq!(vector, vec![0.6, 0.8]);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let router = Router::new().route(
            "/api/embed",
            post(|| async { Json(serde_json::json!({ "embeddings": [[0.6, 0.8]] })) }),
        );
        let url = spawn_stub(router).await;

        // Provider declares 3 dims, the response carries 2.
        let config = ollama_config(url, 3);
        let provider = create_provider(&config).unwrap();
        let err = embed_query(provider.as_ref(), &config, "hello")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }

    #[tokio::test]
    async fn rate_limited_requests_are_retried_until_success() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/embed",
            post(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(axum::http::StatusCode::TOO_MANY_REQUESTS)
                    } else {
                        Ok(Json(serde_json::json!({ "embeddings": [[1.0, 0.0]] })))
                    }
                }
            }),
        );
        let url = spawn_stub(router).await;

        let config = ollama_config(url, 2);
        let provider = create_provider(&config).unwrap();
        let vector = embed_query(provider.as_ref(), &config, "hello")
            .await
            .unwrap();
        assert_eq!(vector, vec![1.0, 0.0]);
        // Two 429s, then the successful attempt.
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_fail_without_retry() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/embed",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    axum::http::StatusCode::UNAUTHORIZED
                }
            }),
        );
        let url = spawn_stub(router).await;

        let config = ollama_config(url, 2);
        let provider = create_provider(&config).unwrap();
        let err = embed_query(provider.as_ref(), &config, "hello")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("401"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_last_error() {
        let router = Router::new().route(
            "/api/embed",
            post(|| async { axum::http::StatusCode::SERVICE_UNAVAILABLE }),
        );
        let url = spawn_stub(router).await;

        let mut config = ollama_config(url, 2);
        config.max_retries = 1;
        let provider = create_provider(&config).unwrap();
        let err = embed_query(provider.as_ref(), &config, "hello")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
