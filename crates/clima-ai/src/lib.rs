//! AI advisory layer for Clima
//!
//! Wraps a chat-completion backend: personalized suggestions, climate
//! insights and what-if scenario runs, with strict response-shape
//! validation.

pub mod advisor;
pub mod client;
pub mod simulate;
pub mod types;

pub use advisor::AiAdvisor;
pub use client::{ChatClient, ChatMessage};
pub use simulate::ScenarioSimulator;
pub use types::*;
