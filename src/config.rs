//! Configuration for the document-to-answer pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Scalar settings consumed by the pipeline, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Language model name.
    pub model_name: String,
    /// Sampling temperature for answer generation.
    pub temperature: f32,
    /// Maximum output tokens for answer generation.
    pub max_tokens: u32,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of nearest chunks retrieved per question.
    pub top_k: usize,
    /// Upper bound on retrieved context length in a prompt, in characters.
    /// Lowest-ranked chunks are dropped first when over budget.
    pub max_context_chars: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            model_name: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
            max_context_chars: 12_000,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Build a configuration from environment variables, falling back to
    /// defaults for unset values.
    ///
    /// Reads `MODEL_NAME`, `TEMPERATURE`, `MAX_TOKENS`, `CHUNK_SIZE`,
    /// `CHUNK_OVERLAP`, and `TOP_K`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if a variable is set but unparseable,
    /// or if the resulting values fail validation.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(model) = std::env::var("MODEL_NAME") {
            builder = builder.model_name(model);
        }
        if let Some(temperature) = env_parse::<f32>("TEMPERATURE")? {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = env_parse::<u32>("MAX_TOKENS")? {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(chunk_size) = env_parse::<usize>("CHUNK_SIZE")? {
            builder = builder.chunk_size(chunk_size);
        }
        if let Some(chunk_overlap) = env_parse::<usize>("CHUNK_OVERLAP")? {
            builder = builder.chunk_overlap(chunk_overlap);
        }
        if let Some(top_k) = env_parse::<usize>("TOP_K")? {
            builder = builder.top_k(top_k);
        }

        builder.build()
    }
}

/// Read and parse one environment variable, `None` when unset.
fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| RagError::Config(format!("invalid value for {name}: '{value}'"))),
        Err(_) => Ok(None),
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the language model name.
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.config.model_name = name.into();
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the maximum output tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of nearest chunks retrieved per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the retrieved-context character budget per prompt.
    pub fn max_context_chars(mut self, chars: usize) -> Self {
        self.config.max_context_chars = chars;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
