//! Ollama client for single-paragraph rewrites.
//!
//! - `POST {endpoint}/api/generate`: synchronous text generation (`stream=false`)
//!
//! It uses [`LlmModelConfig`] and insists that the provider is
//! [`LlmProvider::Ollama`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{
    AiLlmError, HttpError, ProviderError, ProviderErrorKind, Result, make_snippet,
};

/// Thin client for Ollama.
///
/// Reuses one HTTP client with the configured timeout.
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    timeout: Duration,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not `Ollama`
    /// - `InvalidEndpoint` if `cfg.endpoint` is not http(s)
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(
                ProviderError::new(LlmProvider::Ollama, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                LlmProvider::Ollama,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let url_generate = format!("{}/api/generate", endpoint.trim_end_matches('/'));

        Ok(Self {
            client,
            cfg,
            url_generate,
            timeout,
        })
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `num_predict` ← `max_tokens`
    /// - `temperature`, `top_p`, `repeat_penalty`, `stop` ← config
    /// - `system` ← argument (Ollama accepts a system override per request)
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] / [`AiLlmError::Timeout`] for client errors
    /// - `Decode` if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        let started = Instant::now();
        let body = GenerateRequest::from_cfg(&self.cfg, prompt, system);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiLlmError::transport(e, self.timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, "Ollama /api/generate returned non-success status");
            return Err(ProviderError::new(
                LlmProvider::Ollama,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            AiLlmError::from(ProviderError::new(
                LlmProvider::Ollama,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; ensure `stream=false` is used"
                )),
            ))
        })?;

        debug!(
            latency_ms = started.elapsed().as_millis(),
            answer_len = out.response.len(),
            "generation completed"
        );
        Ok(out.response)
    }
}

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    options: GenerateOptions<'a>,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            model: &cfg.model,
            prompt,
            stream: false,
            system,
            options: GenerateOptions {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                repeat_penalty: cfg.repeat_penalty,
                num_predict: cfg.max_tokens,
                stop: &cfg.stop,
            },
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Serialize)]
struct GenerateOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repeat_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "no_stops")]
    stop: &'a [String],
}

fn no_stops(stop: &&[String]) -> bool {
    stop.is_empty()
}

/// Response body for `/api/generate`; the generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
