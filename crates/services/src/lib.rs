#![forbid(unsafe_code)]

pub mod ai;
pub mod batch;
pub mod error;
pub mod gateway;
pub mod orchestrator;

pub use ai::{GeminiConfig, GeminiGateway, QuizSettings};
pub use error::GatewayError;
pub use gateway::ContentGateway;
pub use orchestrator::{AdvanceOutcome, QuizOrchestrator, SessionStore, StartOutcome, illustrate};
