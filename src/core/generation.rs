use crate::core::prompt::build_prompt;
use crate::core::{ChatProvider, Post, ProductInput};
use crate::utils::error::{PostgenError, Result};
use serde_json::Value;
use std::sync::Arc;

/// Turns products into posts through an injected chat provider.
#[derive(Clone)]
pub struct PostGenerator {
    provider: Arc<dyn ChatProvider>,
}

impl PostGenerator {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub async fn generate(&self, product: &ProductInput) -> Result<Vec<Post>> {
        let prompt = build_prompt(
            &product.name,
            &product.description,
            &product.price,
            product.category.as_deref(),
        );
        tracing::debug!("Built prompt ({} chars) for {}", prompt.len(), product.name);

        self.request_posts(&prompt).await
    }

    /// Send `prompt` to the provider and unwrap the `posts` array from its reply.
    pub async fn request_posts(&self, prompt: &str) -> Result<Vec<Post>> {
        let content = self.provider.complete_json(prompt).await?;
        parse_posts(content.as_deref())
    }
}

/// Extract the `posts` array from provider content.
///
/// Empty or absent content yields no posts, while content without a `posts`
/// key is an error.
pub fn parse_posts(content: Option<&str>) -> Result<Vec<Post>> {
    let content = match content {
        Some(content) if !content.is_empty() => content,
        _ => {
            tracing::warn!("Provider returned no content, returning no posts");
            return Ok(Vec::new());
        }
    };

    let mut value: Value = serde_json::from_str(content)?;
    let posts = value
        .get_mut("posts")
        .map(Value::take)
        .ok_or_else(|| PostgenError::missing_field("posts"))?;

    Ok(serde_json::from_value(posts)?)
}
