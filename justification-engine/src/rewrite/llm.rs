use ai_llm_service::LlmService;

use crate::rewrite::{RewriteError, RewriteService};

impl RewriteService for LlmService {
    async fn rewrite(&self, prompt: &str) -> Result<String, RewriteError> {
        let text = self.generate(prompt, None).await?;
        Ok(text)
    }
}
