use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used to rewrite justification drafts.
///
/// Selected through `LLM_KIND` (`ollama` or `openai`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime (`/api/generate`).
    Ollama,
    /// OpenAI or any OpenAI-compatible server (`/v1/chat/completions`).
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("Ollama".parse::<LlmProvider>().ok(), Some(LlmProvider::Ollama));
        assert_eq!(" openai ".parse::<LlmProvider>().ok(), Some(LlmProvider::OpenAI));
        assert!("huggingface".parse::<LlmProvider>().is_err());
    }
}
