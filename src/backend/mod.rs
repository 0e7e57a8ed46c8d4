//! Backend module - generation trait and the Gemini client

pub mod gemini;
pub mod text_backend;

// Re-export backend types for convenience
pub use gemini::GeminiBackend;
pub use text_backend::{GenerationBackend, PromptOutput, PromptRequest, SamplingParams};
