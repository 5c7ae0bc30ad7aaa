use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Product attributes submitted for post generation. Not validated beyond
/// the presence of the required fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    /// Kept as the client sent it so the prompt renders `25.0` as `25.0`.
    pub price: Number,
    #[serde(default)]
    pub category: Option<String>,
}

/// One generated post, passed through exactly as the provider produced it.
///
/// Usually `{"platform": ..., "content": ...}`, but missing or extra keys
/// are kept untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(Value);

impl Post {
    pub fn new(platform: impl Into<String>, content: impl Into<String>) -> Self {
        Self(serde_json::json!({
            "platform": platform.into(),
            "content": content.into(),
        }))
    }

    pub fn platform(&self) -> Option<&str> {
        self.0.get("platform").and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.0.get("content").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub product: ProductInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub posts: Vec<Post>,
    pub generated_at: DateTime<Utc>,
    pub count: usize,
}

impl GenerationResult {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            count: posts.len(),
            posts,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub hello: String,
    pub timestamp: DateTime<Utc>,
}
