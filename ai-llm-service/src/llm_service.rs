//! Shared rewrite service bound to a single model profile.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - The provider client is created lazily on first use and then reused.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmService, config::default_config::config_rewrite_from_env};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = Arc::new(LlmService::new(config_rewrite_from_env()?, Some(10))?);
//! let text = svc.generate("Rewrite: The risk is LOW.", None).await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::Result,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Enum dispatch over the supported provider clients.
#[derive(Debug)]
enum Backend {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

impl Backend {
    fn build(cfg: &LlmModelConfig) -> Result<Self> {
        Ok(match cfg.provider {
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg.clone())?),
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg.clone())?),
        })
    }
}

/// Rewrite model plus its health checker.
pub struct LlmService {
    cfg: LlmModelConfig,
    backend: OnceCell<Backend>,
    health: HealthService,
}

impl LlmService {
    /// Validates `cfg` and prepares the service.
    ///
    /// `health_timeout_secs` bounds the `/health` probe independently of the
    /// generation timeout.
    pub fn new(cfg: LlmModelConfig, health_timeout_secs: Option<u64>) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            backend: OnceCell::new(),
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Generates text for `prompt`, with an optional system instruction.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        let backend = self
            .backend
            .get_or_try_init(|| async { Backend::build(&self.cfg) })
            .await?;

        debug!(provider = ?self.cfg.provider, model = %self.cfg.model, "rewrite request");
        match backend {
            Backend::Ollama(cli) => cli.generate(prompt, system).await,
            Backend::OpenAI(cli) => cli.generate(prompt, system).await,
        }
    }

    /// Probes the configured backend; never fails.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(&self.cfg).await
    }

    /// Active model profile.
    pub fn profile(&self) -> &LlmModelConfig {
        &self.cfg
    }
}
