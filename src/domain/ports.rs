use crate::utils::error::Result;
use async_trait::async_trait;

/// Chat-completion backend used by the generation client.
///
/// Implementations send `prompt` as a single user message, ask for a
/// JSON-object response and hand back the raw message content. `Ok(None)`
/// means the provider answered without content.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete_json(&self, prompt: &str) -> Result<Option<String>>;
}
