//! Streaming completion collaborator
//!
//! The pipeline only needs an ordered, lazily pulled sequence of text chunks
//! for a single request. `CompletionStreamer` is that seam; `GeminiClient` is
//! the concrete backend used by the CLI.

use thiserror::Error;

pub mod gemini;
pub mod sse;

pub use gemini::GeminiClient;
pub use sse::SseChunks;

/// Model used when neither `--model` nor `--pro` is given.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Model selected by `--pro`.
pub const PRO_MODEL: &str = "gemini-1.5-pro-latest";

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LlmError {
    #[error("No API key configured (set GEMINI_API_KEY, GOOGLE_GENERATIVE_AI_API_KEY or ASKREPO_API_KEY)")]
    MissingApiKey,

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Stream Read Error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Malformed stream event: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single-shot completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_text: String,
}

/// Text chunks in model-emission order.
pub type ChunkStream<'a> = Box<dyn Iterator<Item = Result<String, LlmError>> + 'a>;

pub trait CompletionStreamer {
    /// Start the request and return its chunk stream.
    ///
    /// No retries. Dropping the stream is the only way to stop early.
    fn stream_completion(&self, request: &CompletionRequest) -> Result<ChunkStream<'_>, LlmError>;
}
