use serde::Deserialize;
use thiserror::Error;

/// Submission token echoed back on every engine event.
pub type Generation = u64;

/// Plain-text article produced by the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notecard {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ArticleFetched {
        generation: Generation,
        result: Result<Article, FetchError>,
    },
    NotecardsGenerated {
        generation: Generation,
        result: Result<Vec<Notecard>, GenerationFailed>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Wikipedia API error: {status} {reason}")]
    Api { status: u16, reason: String },
    #[error("Malformed Wikipedia response: {0}")]
    MalformedResponse(String),
    #[error("Wikipedia response too large (max {max_bytes} bytes, got at least {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("Wikipedia request timed out")]
    Timeout,
    #[error("Network error while fetching article: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("completion API credential not configured")]
    CredentialMissing,
    #[error("completion API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("no content in completion response")]
    EmptyCompletion,
    #[error("completion is not valid JSON: {0}")]
    MalformedJson(String),
    #[error("completion does not match the notecard schema: {0}")]
    InvalidSchema(String),
}

/// Uniform failure of the notecard generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to generate notecards: {source}")]
pub struct GenerationFailed {
    #[source]
    pub source: CompletionError,
}

impl GenerationFailed {
    pub fn kind(&self) -> &CompletionError {
        &self.source
    }
}

impl From<CompletionError> for GenerationFailed {
    fn from(source: CompletionError) -> Self {
        Self { source }
    }
}

/// Errors raised while setting up the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
