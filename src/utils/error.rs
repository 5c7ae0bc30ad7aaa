use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgenError {
    #[error("Provider request failed: {0}")]
    Provider(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl PostgenError {
    pub fn missing_field(field: &str) -> Self {
        PostgenError::MissingField {
            field: field.to_string(),
        }
    }

    /// Whether the failure originated upstream rather than in local handling.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            PostgenError::Provider(_) | PostgenError::ProviderStatus { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PostgenError::Provider(_) => "Check network connectivity and the provider base URL",
            PostgenError::ProviderStatus { status: 401, .. } => "Check OPENAI_API_KEY",
            PostgenError::ProviderStatus { status: 429, .. } => "Provider rate limit hit, try again later",
            PostgenError::ProviderStatus { .. } => "Inspect the provider response body",
            PostgenError::Parse(_) | PostgenError::MissingField { .. } => {
                "Upstream or request JSON did not have the expected shape"
            }
            PostgenError::Io(_) => "Check file paths and permissions",
            PostgenError::Config { .. }
            | PostgenError::MissingConfig { .. }
            | PostgenError::InvalidConfigValue { .. } => "Fix the configuration and restart",
        }
    }
}

pub type Result<T> = std::result::Result<T, PostgenError>;
