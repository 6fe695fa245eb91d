//! # docqa
//!
//! Retrieval-augmented document question answering: load documents or raw
//! text, chunk them, embed the chunks into an in-memory vector index, and
//! answer natural-language questions from the retrieved passages with a
//! hosted language model.
//!
//! ## Overview
//!
//! - [`DocumentLoader`] — file inputs → page-level [`Document`]s, with
//!   per-format readers and skip-and-log failure handling.
//! - [`RecursiveChunker`] — paragraph/sentence/word-aware splitting with
//!   configurable overlap.
//! - [`RagPipeline`] — chunk → embed → [`VectorIndex`] on ingest;
//!   embed → retrieve → prompt → complete on ask.
//! - [`Session`] — owns one index and the chat history, with explicit
//!   `Empty`/`Ready` states and `ingest`/`ask`/`reset` operations.
//!
//! The embedding and completion providers are opaque remote collaborators
//! behind the [`EmbeddingProvider`] and [`CompletionModel`] traits; OpenAI
//! implementations live in [`openai`] behind the `openai` feature.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa::{
//!     Document, RagConfig, RagPipeline, RecursiveChunker, Session,
//!     openai::{OpenAIChatModel, OpenAIEmbeddingProvider},
//! };
//!
//! let config = RagConfig::from_env()?;
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(OpenAIEmbeddingProvider::from_env()?))
//!     .completion_model(Arc::new(OpenAIChatModel::from_env(
//!         &config.model_name,
//!         config.temperature,
//!         config.max_tokens,
//!     )?))
//!     .chunker(Arc::new(RecursiveChunker::new(config.chunk_size, config.chunk_overlap)))
//!     .build()?;
//!
//! let mut session = Session::new(Arc::new(pipeline));
//! session.ingest(&[Document::from_text("Paris is the capital of France.")]).await?;
//! let result = session.ask("What is the capital of France?", true).await?;
//! println!("{}", result.answer);
//! ```

pub mod chunking;
pub mod completion;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod loader;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod prompt;
pub mod session;

pub use chunking::{Chunker, RecursiveChunker};
pub use completion::CompletionModel;
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{ChatTurn, Chunk, Document, QueryResult, SearchResult, Source};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use loader::{DocumentLoader, FormatReader};
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use session::Session;
