//! Health probes for the rewrite backend.
//!
//! - Ollama: `GET {endpoint}/api/tags`, then look for the model among `models[].name`
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth, then look among `data[].id`
//!
//! [`HealthService::check`] never fails: every problem becomes `ok = false`
//! with a short message, which is what `/health` wants to show.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{AiLlmError, HealthError, HttpError, Result, make_snippet};

/// Serializable health snapshot for the configured backend.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub ok: bool,
    pub latency_ms: u128,
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker with its own HTTP client and default timeout.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a health service; `timeout_secs` defaults to 10.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let default_timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(default_timeout).build()?;
        Ok(Self {
            client,
            default_timeout,
        })
    }

    /// Probes the backend described by `cfg`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let started = Instant::now();
        let status = match self.probe(cfg).await {
            Ok(found) if found => HealthStatus::new(
                cfg,
                true,
                started.elapsed().as_millis(),
                "backend is healthy; model is available",
            ),
            Ok(_) => HealthStatus::new(
                cfg,
                false,
                started.elapsed().as_millis(),
                "backend is up, but the model is not listed",
            ),
            Err(e) => HealthStatus::new(cfg, false, started.elapsed().as_millis(), e.to_string()),
        };

        if status.ok {
            info!(
                provider = %status.provider,
                model = %status.model,
                latency_ms = status.latency_ms,
                "health probe completed"
            );
        } else {
            warn!(
                provider = %status.provider,
                model = %status.model,
                message = %status.message,
                "health probe failed"
            );
        }
        status
    }

    /// Returns whether the model is listed by the backend.
    async fn probe(&self, cfg: &LlmModelConfig) -> Result<bool> {
        let base = cfg.endpoint.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(HealthError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        let url = match cfg.provider {
            LlmProvider::Ollama => format!("{base}/api/tags"),
            LlmProvider::OpenAI => format!("{base}/v1/models"),
        };
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .map_or(self.default_timeout, |t| t.min(self.default_timeout));

        let mut req = self.client.get(&url).timeout(timeout);
        if let Some(key) = cfg.api_key.as_deref() {
            req = req.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            })
            .into());
        }

        let body = resp.text().await?;
        listed_models(cfg.provider, &body)
            .map(|names| names.iter().any(|n| n == &cfg.model))
            .map_err(AiLlmError::from)
    }
}

/// Extracts model names from a `/api/tags` or `/v1/models` body.
fn listed_models(
    provider: LlmProvider,
    body: &str,
) -> std::result::Result<Vec<String>, HealthError> {
    #[derive(Deserialize)]
    struct Tag {
        name: String,
    }
    #[derive(Deserialize)]
    struct Tags {
        #[serde(default)]
        models: Vec<Tag>,
    }
    #[derive(Deserialize)]
    struct ModelItem {
        id: String,
    }
    #[derive(Deserialize)]
    struct Models {
        data: Vec<ModelItem>,
    }

    let decode = |e: serde_json::Error| HealthError::Decode(e.to_string());
    match provider {
        LlmProvider::Ollama => serde_json::from_str::<Tags>(body)
            .map(|t| t.models.into_iter().map(|m| m.name).collect())
            .map_err(decode),
        LlmProvider::OpenAI => serde_json::from_str::<Models>(body)
            .map(|m| m.data.into_iter().map(|m| m.id).collect())
            .map_err(decode),
    }
}
