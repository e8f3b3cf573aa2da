use thiserror::Error;

/// Every variant's `Display` is the user-visible `error` string of the envelope.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("No prompt data provided")]
    NoPromptData,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("{0} is not set; refusing to call the generation service")]
    MissingApiKey(&'static str),
    #[error("{0}")]
    Config(String),
    #[error("chat completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat completion returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed chat completion response: {0}")]
    Malformed(String),
}
