//! Minimal typed client for the Google Gemini `generateContent` API.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, Part, ThinkingConfig, WebSource,
};
