//! Property description generation through an OpenAI-compatible chat endpoint.

mod client;
mod error;
mod outcome;
mod prompt;
mod settings;

pub use client::{ChatClient, ChatMessage, ChatRequest};
pub use error::GeneratorError;
pub use outcome::GenerationResult;
pub use prompt::{compose_prompt, parse_prompt_arg, PromptData, SYSTEM_INSTRUCTION};
pub use settings::{
    GeneratorSettings, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, MODEL_ENV,
};

/// Runs one generation against `client`. Every failure is folded into the result.
pub async fn generate_description(client: &ChatClient, data: &PromptData) -> GenerationResult {
    let prompt = compose_prompt(data);
    match client.complete(SYSTEM_INSTRUCTION, &prompt).await {
        Ok(description) => GenerationResult::success(description),
        Err(err) => {
            tracing::warn!(error = %err, "description generation failed");
            GenerationResult::from_error(&err)
        }
    }
}
