pub mod config;
pub mod gemini;
pub mod prompts;

pub use config::{GeminiConfig, QuizSettings};
pub use gemini::GeminiGateway;
