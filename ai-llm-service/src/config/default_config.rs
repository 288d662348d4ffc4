//! Rewrite-model config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`ollama` default, `openai`)
//! - `REWRITE_MODEL`    = model identifier (mandatory)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32, default 220)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 45)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//!
//! OpenAI-specific:
//! - `OPENAI_URL`     = base URL (default `https://api.openai.com`)
//! - `OPENAI_API_KEY` = bearer token (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError},
};

pub const DEFAULT_MAX_TOKENS: u32 = 220;
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TOP_P: f32 = 0.9;
pub const DEFAULT_REPEAT_PENALTY: f32 = 1.05;
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Builds the rewrite profile from the process environment.
///
/// # Errors
/// - [`ConfigError::MissingVar`] when a mandatory variable is absent
/// - [`ConfigError::InvalidNumber`] for malformed ports, limits or timeouts
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
pub fn config_rewrite_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_rewrite_from(|name| std::env::var(name).ok())
}

/// Same as [`config_rewrite_from_env`], reading variables through `lookup`.
///
/// Empty values are treated as unset.
pub fn config_rewrite_from<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let provider = match get("LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::Ollama,
    };

    let model = get("REWRITE_MODEL").ok_or(ConfigError::MissingVar("REWRITE_MODEL"))?;

    let max_tokens = match get("LLM_MAX_TOKENS") {
        Some(v) => v.trim().parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
            var: "LLM_MAX_TOKENS",
            reason: "expected u32",
        })?,
        None => DEFAULT_MAX_TOKENS,
    };

    let timeout_secs = match get("LLM_TIMEOUT_SECS") {
        Some(v) => v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
            var: "LLM_TIMEOUT_SECS",
            reason: "expected u64",
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    let (endpoint, api_key) = match provider {
        LlmProvider::Ollama => (ollama_endpoint(&get)?, None),
        LlmProvider::OpenAI => {
            let url = get("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
            let key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;
            (url, Some(key))
        }
    };

    let cfg = LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: Some(max_tokens),
        temperature: Some(DEFAULT_TEMPERATURE),
        top_p: Some(DEFAULT_TOP_P),
        repeat_penalty: Some(DEFAULT_REPEAT_PENALTY),
        stop: vec!["\n\n".to_string()],
        timeout_secs: Some(timeout_secs),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint<G>(get: &G) -> Result<String, AiLlmError>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(url) = get("OLLAMA_URL") {
        return Ok(url.trim().to_string());
    }
    if let Some(port) = get("OLLAMA_PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn ollama_from_port_with_defaults() {
        let cfg = config_rewrite_from(lookup(&[
            ("REWRITE_MODEL", "qwen2.5:7b-instruct"),
            ("OLLAMA_PORT", "11434"),
        ]))
        .expect("config");

        assert_eq!(cfg.provider, LlmProvider::Ollama);
        assert_eq!(cfg.endpoint, "http://localhost:11434");
        assert_eq!(cfg.max_tokens, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.stop, vec!["\n\n".to_string()]);
        assert_eq!(cfg.repeat_penalty, Some(DEFAULT_REPEAT_PENALTY));
    }

    #[test]
    fn openai_requires_key() {
        let err = config_rewrite_from(lookup(&[
            ("LLM_KIND", "openai"),
            ("REWRITE_MODEL", "gpt-4o-mini"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let cfg = config_rewrite_from(lookup(&[
            ("LLM_KIND", "openai"),
            ("REWRITE_MODEL", "gpt-4o-mini"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .expect("config");
        assert_eq!(cfg.endpoint, DEFAULT_OPENAI_URL);
    }

    #[test]
    fn rejects_missing_model_and_bad_numbers() {
        assert!(config_rewrite_from(lookup(&[("OLLAMA_PORT", "11434")])).is_err());
        assert!(
            config_rewrite_from(lookup(&[
                ("REWRITE_MODEL", "m"),
                ("OLLAMA_PORT", "not-a-port"),
            ]))
            .is_err()
        );
        assert!(
            config_rewrite_from(lookup(&[
                ("REWRITE_MODEL", "m"),
                ("OLLAMA_URL", "http://ollama:11434"),
                ("LLM_MAX_TOKENS", "-3"),
            ]))
            .is_err()
        );
    }
}
