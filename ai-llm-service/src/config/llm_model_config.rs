use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    ConfigError, Result, validate_http_endpoint, validate_range_f32, validate_stop_sequences,
};

/// Configuration for the rewrite model invocation.
///
/// # Fields
///
/// - `provider`: which backend to call (Ollama or OpenAI-compatible).
/// - `model`: model identifier (e.g. `"qwen2.5:7b-instruct"`).
/// - `endpoint`: base URL of the inference server.
/// - `api_key`: bearer token for providers that require it.
/// - `max_tokens`: generation budget for one paragraph.
/// - `temperature` / `top_p`: sampling knobs; kept low so rewrites stay close to the draft.
/// - `repeat_penalty`: Ollama repetition penalty (`1.0` disables it).
/// - `stop`: stop sequences; a blank line ends a single-paragraph answer.
/// - `timeout_secs`: per-request timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub repeat_penalty: Option<f32>,
    pub stop: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks the fields that would otherwise only fail on the first request.
    ///
    /// # Errors
    /// Returns [`ConfigError`] (wrapped in `AiLlmError`) for an empty model,
    /// a non-http endpoint, out-of-range sampling values or empty stop strings.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        if let Some(r) = self.repeat_penalty {
            validate_range_f32("repeat_penalty", r, 0.0, 2.0)?;
        }
        validate_stop_sequences(&self.stop)?;
        if self.provider == LlmProvider::OpenAI && self.api_key.is_none() {
            return Err(ConfigError::MissingVar("OPENAI_API_KEY").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen2.5:7b-instruct".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: Some(220),
            temperature: Some(0.2),
            top_p: Some(0.9),
            repeat_penalty: Some(1.05),
            stop: vec!["\n\n".into()],
            timeout_secs: Some(45),
        }
    }

    #[test]
    fn accepts_defaults() {
        assert!(cfg().validate().is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        let mut c = cfg();
        c.endpoint = "localhost:11434".into();
        assert!(c.validate().is_err());

        let mut c = cfg();
        c.top_p = Some(1.5);
        assert!(c.validate().is_err());

        let mut c = cfg();
        c.repeat_penalty = Some(-1.0);
        assert!(c.validate().is_err());

        let mut c = cfg();
        c.stop = vec![String::new()];
        assert!(c.validate().is_err());

        let mut c = cfg();
        c.provider = LlmProvider::OpenAI;
        assert!(c.validate().is_err());
    }
}
