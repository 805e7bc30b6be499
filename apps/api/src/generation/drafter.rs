// Drafting seam. Handlers depend on the trait so tests can script
// responses without any network access.

use async_trait::async_trait;

use crate::document::OfficialDocument;
use crate::generation::prompts::{document_response_schema, DRAFT_PROMPT_PREFIX, DRAFT_SYSTEM};
use crate::llm_client::{GeminiClient, LlmError};

/// Turns an assembled brief into a draft document.
#[async_trait]
pub trait DocumentDrafter: Send + Sync {
    async fn draft(&self, brief: &str) -> Result<OfficialDocument, LlmError>;
}

/// Production drafter backed by the Gemini client.
pub struct GeminiDrafter {
    client: GeminiClient,
}

impl GeminiDrafter {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentDrafter for GeminiDrafter {
    async fn draft(&self, brief: &str) -> Result<OfficialDocument, LlmError> {
        let prompt = format!("{DRAFT_PROMPT_PREFIX}\n\n{brief}");
        self.client
            .generate_json(&prompt, DRAFT_SYSTEM, document_response_schema())
            .await
    }
}
