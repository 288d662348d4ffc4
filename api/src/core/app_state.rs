use std::{env, sync::Arc};

use ai_llm_service::{LlmService, config::default_config::config_rewrite_from_env};
use justification_engine::RetryPolicy;
use tracing::{info, warn};

/// Timeout of the `/health` probe against the rewrite backend.
const HEALTH_TIMEOUT_SECS: u64 = 10;

/// Largest accepted request body unless `API_MAX_BODY_BYTES` says otherwise.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Rewrite backend as resolved at startup.
#[derive(Clone)]
pub enum RewriteBackend {
    /// `REWRITE_ENABLED` is off.
    Disabled,
    /// Enabled, but the profile could not be built; holds the reason.
    Misconfigured(String),
    Ready(Arc<LlmService>),
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub rewrite: RewriteBackend,
    pub retry: RetryPolicy,
    /// Request body limit applied to every route.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// A broken rewrite profile does not stop the server: requests asking for
    /// a rewrite get deterministic drafts and a warning instead.
    pub fn from_env() -> Self {
        let rewrite = if flag_enabled(env::var("REWRITE_ENABLED").ok().as_deref()) {
            let built = config_rewrite_from_env()
                .and_then(|cfg| LlmService::new(cfg, Some(HEALTH_TIMEOUT_SECS)));
            match built {
                Ok(svc) => {
                    let profile = svc.profile();
                    info!(
                        provider = ?profile.provider,
                        model = %profile.model,
                        "rewrite backend configured"
                    );
                    RewriteBackend::Ready(Arc::new(svc))
                }
                Err(e) => {
                    warn!(error = %e, "rewrite enabled but backend is not usable");
                    RewriteBackend::Misconfigured(e.to_string())
                }
            }
        } else {
            RewriteBackend::Disabled
        };

        Self {
            rewrite,
            retry: RetryPolicy::from_env(),
            max_body_bytes: max_body_bytes(env::var("API_MAX_BODY_BYTES").ok().as_deref()),
        }
    }

    /// State without a rewrite backend.
    pub fn drafts_only() -> Self {
        Self {
            rewrite: RewriteBackend::Disabled,
            retry: RetryPolicy::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }
}

/// Positive byte count, or the default for unset and invalid values.
fn max_body_bytes(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_BODY_BYTES)
}

fn flag_enabled(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
