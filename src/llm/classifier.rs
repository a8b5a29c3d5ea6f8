//! Core `Classifier` trait and `ApiClassifier` implementation.
//!
//! `ApiClassifier` calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint (OpenAI, Groq, Ollama in OpenAI mode, LM Studio, vLLM).  All
//! connection details come from [`ClassifierConfig`]; nothing is hardcoded.
//!
//! This layer is allowed to fail: every failure mode is a typed
//! [`ClassifyError`].  Degrading failures into "Unknown" verdicts is the job
//! of [`LenientClassifier`](crate::llm::LenientClassifier).

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ClassifierConfig;
use crate::llm::prompt;
use crate::llm::verdict::Verdict;

// ---------------------------------------------------------------------------
// ClassifyError
// ---------------------------------------------------------------------------

/// Errors that can occur during a classification call.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("classification request timed out")]
    Timeout,

    /// The service answered with a non-success HTTP status (auth failure,
    /// rate limit, server error).
    #[error("classification service returned HTTP {0}")]
    Status(u16),

    /// The response body could not be parsed as the expected structure.
    /// Carries the raw text so callers can surface an excerpt.
    #[error("failed to parse classification response")]
    Parse {
        /// Raw response content as received.
        raw: String,
    },

    /// The service returned a response with no usable content.
    #[error("classification service returned no content")]
    EmptyResponse,
}

impl From<reqwest::Error> for ClassifyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClassifyError::Timeout
        } else {
            ClassifyError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Classifier trait
// ---------------------------------------------------------------------------

/// Async trait for transcript classification.
///
/// Implementors must be `Send + Sync` so they can be shared across workers
/// behind an `Arc<dyn Classifier>`.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a cleaned transcript.  One attempt; no retries.
    async fn classify(&self, transcript: &str) -> Result<Verdict, ClassifyError>;
}

// ---------------------------------------------------------------------------
// ApiClassifier
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// Sampling is pinned to the configured temperature (0.0 by default) so
/// identical transcripts tend to produce identical verdicts.
pub struct ApiClassifier {
    client: reqwest::Client,
    config: ClassifierConfig,
}

impl ApiClassifier {
    /// Build an `ApiClassifier` from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is the last-resort fallback
    /// if the builder fails.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Classifier for ApiClassifier {
    /// Send `transcript` to the configured endpoint and parse the verdict.
    ///
    /// The `Authorization: Bearer …` header is attached only when the
    /// resolved API key is non-empty; local providers need none.
    async fn classify(&self, transcript: &str) -> Result<Verdict, ClassifyError> {
        let (system_msg, user_msg) = prompt::build_chat(transcript);

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
            "max_tokens":  256
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status(status.as_u16()));
        }

        // Read the body as text first so a malformed envelope still gives
        // callers the raw content to quote.
        let raw_body = response.text().await?;
        let envelope: serde_json::Value =
            serde_json::from_str(&raw_body).map_err(|_| ClassifyError::Parse {
                raw: raw_body.clone(),
            })?;

        let content = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ClassifyError::EmptyResponse)?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(ClassifyError::EmptyResponse);
        }

        Verdict::from_json(&content).map_err(|_| ClassifyError::Parse { raw: content })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
