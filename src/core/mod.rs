pub mod generation;
pub mod prompt;

pub use crate::domain::model::{GenerationResult, Post, ProductInput};
pub use crate::domain::ports::ChatProvider;
pub use crate::utils::error::Result;
