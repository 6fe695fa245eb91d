//! Language model trait for prompt completion.

use async_trait::async_trait;

use crate::error::Result;

/// A hosted language model reached as an opaque function of prompt → text.
///
/// Generation settings (model name, temperature, maximum output tokens) are
/// fixed at construction; one `complete` call is one blocking remote
/// round-trip. A failed or timed-out call must surface as an error, never
/// hang and never be retried here.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Produce a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
