pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::openai::OpenAiClient;
pub use app::{router, AppState};
pub use config::{CliConfig, ServerConfig};
pub use core::{generation::PostGenerator, prompt::build_prompt};
pub use domain::model::{GenerationResult, Post, ProductInput};
pub use utils::error::{PostgenError, Result};
