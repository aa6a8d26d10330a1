//! Risk analysis over an OpenAI-compatible chat completions endpoint.

mod analyzer;
mod api;
mod prompt;

pub use analyzer::OpenAiCompatAnalyzer;
pub use prompt::{build_prompt, SYSTEM_MESSAGE};
