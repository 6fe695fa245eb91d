//! Shared mock providers for integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use docqa::{
    CompletionModel, EmbeddingProvider, RagConfig, RagError, RagPipeline, RecursiveChunker,
    Result,
};

pub const DIM: usize = 64;

/// Deterministic bag-of-words embedder: each word hashes to a bucket.
/// Texts sharing words get similar vectors, which makes retrieval ranking
/// meaningful without a remote provider.
pub struct HashEmbedder;

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; DIM];
        for word in text.split_whitespace() {
            let word: String =
                word.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();
            if word.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            vector[(hasher.finish() as usize) % DIM] += 1.0;
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// An embedder that always fails, for exercising ingest failure paths.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::Embedding {
            provider: "mock".to_string(),
            message: "provider unreachable".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// An embedder that works like [`HashEmbedder`] until switched into
/// failure mode, for exercising failures mid-session.
pub struct FlakyEmbedder {
    pub fail: AtomicBool,
}

impl FlakyEmbedder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { fail: AtomicBool::new(false) })
    }
}

#[async_trait]
impl EmbeddingProvider for FlakyEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RagError::Embedding {
                provider: "mock".to_string(),
                message: "provider unreachable".to_string(),
            });
        }
        HashEmbedder.embed(text).await
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// A model that returns a fixed answer.
pub struct CannedModel(pub String);

#[async_trait]
impl CompletionModel for CannedModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// A model that always fails, for exercising ask failure paths.
pub struct FailingModel;

#[async_trait]
impl CompletionModel for FailingModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(RagError::Generation("model call timed out".to_string()))
    }
}

/// Build a pipeline over the mock embedder and the given model.
pub fn pipeline_with_model(
    config: RagConfig,
    model: Arc<dyn CompletionModel>,
) -> Arc<RagPipeline> {
    let chunker = RecursiveChunker::new(config.chunk_size, config.chunk_overlap);
    Arc::new(
        RagPipeline::builder()
            .config(config)
            .embedding_provider(Arc::new(HashEmbedder))
            .completion_model(model)
            .chunker(Arc::new(chunker))
            .build()
            .unwrap(),
    )
}

/// Build a pipeline with the mock embedder and a canned answer.
pub fn pipeline(config: RagConfig, answer: &str) -> Arc<RagPipeline> {
    pipeline_with_model(config, Arc::new(CannedModel(answer.to_string())))
}
