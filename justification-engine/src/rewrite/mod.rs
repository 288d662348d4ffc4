//! Optional rephrasing of drafts by a text-generation backend.

pub mod llm;
pub mod payload;
pub mod polish;
pub mod prompt;

use std::future::Future;

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Failure of a single rewrite attempt. Never leaves the polish pipeline.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("backend error: {0}")]
    Backend(#[from] AiLlmError),

    #[error("backend returned an empty response")]
    EmptyResponse,

    #[error("payload could not be encoded: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("rewrite unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can turn a rewrite prompt into a candidate paragraph.
///
/// Implemented by [`ai_llm_service::LlmService`]; tests plug in fakes.
pub trait RewriteService {
    fn rewrite(&self, prompt: &str) -> impl Future<Output = Result<String, RewriteError>> + Send;
}
