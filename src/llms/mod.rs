//! Text generation backends.
//!
//! - [`base_llm`] - The [`BaseLLM`] trait and [`GenerationError`]
//! - [`providers`] - Concrete providers (Gemini)

pub mod base_llm;
pub mod providers;

pub use base_llm::{BaseLLM, GenerationError};
pub use providers::gemini::GeminiCompletion;
