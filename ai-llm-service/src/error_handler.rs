//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`HealthError`], [`ProviderError`]). Small validation helpers return the
//! unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

/// Max number of characters of an upstream body kept in error messages.
const SNIPPET_CHARS: usize = 240;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Health-check/connectivity/decoding errors.
    #[error(transparent)]
    Health(#[from] HealthError),

    /// Provider call failed (non-2xx, undecodable or empty answer).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[source] reqwest::Error),

    /// Operation exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl AiLlmError {
    /// Classifies a request failure of a client built with `timeout`.
    ///
    /// reqwest does not carry the configured duration on its error, so the
    /// caller supplies it.
    pub fn transport(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            AiLlmError::Timeout(timeout)
        } else {
            AiLlmError::HttpTransport(e)
        }
    }
}

impl From<reqwest::Error> for AiLlmError {
    fn from(e: reqwest::Error) -> Self {
        AiLlmError::HttpTransport(e)
    }
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`, `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,

    /// Stop sequences contained one or more empty strings.
    #[error("[AI LLM Service] stop sequences must not contain empty strings")]
    InvalidStopSequence,
}

/// Non-success HTTP answer with a trimmed body snippet.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Error enum for provider health checks.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// The endpoint is empty or does not start with http/https.
    #[error("[AI LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] {0}")]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),
}

/// What went wrong while talking to a generation provider.
#[derive(Debug)]
pub enum ProviderErrorKind {
    InvalidProvider,
    MissingApiKey,
    InvalidEndpoint(String),
    HttpStatus(HttpError),
    Decode(String),
    EmptyChoices,
}

/// Provider-tagged generation failure.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider:?}: {}", describe(.kind))]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

fn describe(kind: &ProviderErrorKind) -> String {
    match kind {
        ProviderErrorKind::InvalidProvider => "config routed to the wrong provider".into(),
        ProviderErrorKind::MissingApiKey => "missing API key".into(),
        ProviderErrorKind::InvalidEndpoint(e) => format!("invalid endpoint: {e}"),
        ProviderErrorKind::HttpStatus(h) => h.to_string(),
        ProviderErrorKind::Decode(d) => format!("failed to decode response: {d}"),
        ProviderErrorKind::EmptyChoices => "response contained no text".into(),
    }
}

/// Trims an upstream body to a short, log-friendly snippet.
pub fn make_snippet(body: &str) -> String {
    body.trim().chars().take(SNIPPET_CHARS).collect()
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the scheme is missing.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

/// Ensures that stop sequences contain no empty strings.
pub fn validate_stop_sequences<S>(stops: &[S]) -> Result<()>
where
    S: AsRef<str>,
{
    if stops.iter().any(|s| s.as_ref().is_empty()) {
        Err(ConfigError::InvalidStopSequence.into())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_trimmed_and_bounded() {
        let long = format!("  {}  ", "x".repeat(1000));
        let s = make_snippet(&long);
        assert_eq!(s.len(), SNIPPET_CHARS);
        assert!(s.starts_with('x'));
    }

    #[test]
    fn provider_error_mentions_status() {
        let err = ProviderError::new(
            LlmProvider::Ollama,
            ProviderErrorKind::HttpStatus(HttpError {
                status: StatusCode::BAD_GATEWAY,
                url: "http://localhost:11434/api/generate".into(),
                snippet: "upstream down".into(),
            }),
        );
        let msg = AiLlmError::from(err).to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }
}
