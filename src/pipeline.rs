//! Pipeline orchestrator: index building and retrieval-augmented answering.
//!
//! [`RagPipeline`] composes an [`EmbeddingProvider`], a [`CompletionModel`],
//! and a [`Chunker`]. It owns no state of its own; each
//! [`build_index`](RagPipeline::build_index) call produces a fresh
//! [`VectorIndex`], and [`answer`](RagPipeline::answer) consumes one per
//! question.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa::{RagPipeline, RagConfig, RecursiveChunker};
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .completion_model(Arc::new(my_model))
//!     .chunker(Arc::new(RecursiveChunker::new(config.chunk_size, config.chunk_overlap)))
//!     .build()?;
//!
//! let index = pipeline.build_index(&documents).await?;
//! let result = pipeline.answer(&index, "What is this about?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::completion::CompletionModel;
use crate::config::RagConfig;
use crate::document::{Document, QueryResult, Source};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;
use crate::prompt;

/// The document-to-answer pipeline.
///
/// Construct one via [`RagPipeline::builder()`]. Building an index blocks
/// on the embedding provider; answering blocks on the embedding provider
/// and the language model. Provider failures propagate as typed errors,
/// never retried here.
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    completion_model: Arc<dyn CompletionModel>,
    chunker: Arc<dyn Chunker>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Build a fresh index over the given documents: chunk → embed → index.
    ///
    /// Chunk↔vector correspondence is preserved by position through the
    /// batch embedding call. Zero chunks yield a valid empty index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexBuild`] if the embedding provider fails or
    /// returns malformed output.
    pub async fn build_index(&self, documents: &[Document]) -> Result<VectorIndex> {
        let mut chunks = self.chunker.chunk_all(documents);
        if chunks.is_empty() {
            info!(document_count = documents.len(), chunk_count = 0, "built empty index");
            return Ok(VectorIndex::new(chunks));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during index build");
            RagError::IndexBuild(e.to_string())
        })?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::IndexBuild(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let chunk_count = chunks.len();
        info!(document_count = documents.len(), chunk_count, "built index");

        Ok(VectorIndex::new(chunks))
    }

    /// Answer a question against an index: embed → retrieve → prompt →
    /// complete.
    ///
    /// Retrieves the configured `top_k` nearest chunks (all of them if the
    /// index holds fewer), assembles a context-bounded prompt in
    /// nearest-first order, and returns the model's answer together with
    /// the retrieved chunks as sources.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Generation`] if the question embedding or the
    /// model call fails.
    pub async fn answer(&self, index: &VectorIndex, question: &str) -> Result<QueryResult> {
        info!(question, "answering question");

        let question_embedding = self.embedding_provider.embed(question).await.map_err(|e| {
            error!(error = %e, "question embedding failed");
            RagError::Generation(format!("question embedding failed: {e}"))
        })?;

        let results = index.search(&question_embedding, self.config.top_k);
        let context = prompt::build_context(&results, self.config.max_context_chars);
        let qa_prompt = prompt::build_qa_prompt(question, &context);

        let answer = self.completion_model.complete(&qa_prompt).await.map_err(|e| {
            error!(error = %e, "completion failed");
            match e {
                RagError::Generation(_) => e,
                other => RagError::Generation(other.to_string()),
            }
        })?;

        let sources: Vec<Source> = results.into_iter().map(|r| r.chunk.into()).collect();
        info!(source_count = sources.len(), "question answered");

        Ok(QueryResult { answer, sources })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    completion_model: Option<Arc<dyn CompletionModel>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the language model.
    pub fn completion_model(mut self, model: Arc<dyn CompletionModel>) -> Self {
        self.completion_model = Some(model);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let completion_model = self
            .completion_model
            .ok_or_else(|| RagError::Config("completion_model is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::Config("chunker is required".to_string()))?;

        Ok(RagPipeline { config, embedding_provider, completion_model, chunker })
    }
}
