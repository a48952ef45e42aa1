//! Answer generation: a single-turn chat completion over retrieved context.
//!
//! The prompt instructs the model to answer strictly from the supplied
//! context and to fall back to a fixed sentence when the context does not
//! contain the answer. One request, no retries, no streaming, no memory.

use anyhow::{anyhow, Result};
use std::time::Duration;

use crate::config::CompletionConfig;

/// The exact sentence the model is told to reply with when the context
/// does not contain the answer.
pub const FALLBACK_ANSWER: &str = "I don't know based on the provided document.";

const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Strict answer-from-context instruction around the retrieved snippets.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Answer based strictly on the provided document context below.\n\n\
         Context:\n{}\n\n\
         Question: {}\n\n\
         If the info isn't in the context, reply: '{}'",
        context, question, FALLBACK_ANSWER
    )
}

/// Single-turn completion call. Returns the trimmed completion text; any
/// transport, auth, or response-shape failure is a typed error and the
/// front-end decides presentation (warning plus empty default).
pub async fn generate_answer(
    completion: &CompletionConfig,
    api_key: &str,
    question: &str,
    context: &str,
) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(completion.timeout_secs))
        .build()?;

    let base = completion.url.as_deref().unwrap_or(OPENAI_BASE_URL);
    let body = serde_json::json!({
        "model": completion.model,
        "messages": [
            { "role": "system", "content": SYSTEM_MESSAGE },
            { "role": "user", "content": build_prompt(question, context) }
        ],
        "max_tokens": completion.max_tokens,
        "temperature": completion.temperature,
    });

    let response = client
        .post(format!("{}/chat/completions", base))
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("completion API error {}: {}", status, body_text));
    }

    let json: serde_json::Value = response.json().await?;

    if let Some(error) = json.get("error") {
        return Err(anyhow!("completion API returned error: {}", error));
    }

    json.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|s| s.trim().to_string())
        .ok_or_else(|| anyhow!("completion response missing choices[0].message.content"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};

    #[test]
    fn prompt_contains_context_question_and_fallback() {
        let prompt = build_prompt("What is category 7 research?", "Some retrieved passage.");
        assert!(prompt.contains("Some retrieved passage."));
        assert!(prompt.contains("Question: What is category 7 research?"));
        assert!(prompt.contains(FALLBACK_ANSWER));
        assert!(prompt.contains("strictly"));
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_config(url: String) -> CompletionConfig {
        CompletionConfig {
            url: Some(url),
            ..CompletionConfig::default()
        }
    }

    #[tokio::test]
    async fn unrelated_context_yields_exact_fallback() {
        // Stub collaborator returns the fallback with stray whitespace;
        // the generator must hand back the trimmed sentence exactly.
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                Json(serde_json::json!({
                    "choices": [
                        { "message": { "content": "  I don't know based on the provided document.\n" } }
                    ]
                }))
            }),
        );
        let url = spawn_stub(router).await;

        let answer = generate_answer(
            &test_config(url),
            "test-key",
            "What is category 7 research?",
            "Unrelated text about weather.",
        )
        .await
        .unwrap();

        assert_eq!(answer, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn server_error_is_a_typed_failure() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream down",
                )
            }),
        );
        let url = spawn_stub(router).await;

        let err = generate_answer(&test_config(url), "test-key", "q", "ctx")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("completion API error"));
    }

    #[tokio::test]
    async fn malformed_response_is_a_typed_failure() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { Json(serde_json::json!({ "choices": [] })) }),
        );
        let url = spawn_stub(router).await;

        let err = generate_answer(&test_config(url), "test-key", "q", "ctx")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing choices"));
    }
}
