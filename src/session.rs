//! Session controller: index lifetime, chat history, and the
//! `Empty`/`Ready` state machine.

use std::sync::Arc;

use tracing::{error, info};

use crate::document::{ChatTurn, Document, QueryResult};
use crate::error::{RagError, Result};
use crate::index::VectorIndex;
use crate::pipeline::RagPipeline;

/// One user session: the pipeline, at most one index, and the chat history.
///
/// A session starts `Empty` and becomes `Ready` after a successful
/// [`ingest`](Session::ingest). Re-ingesting replaces the index and clears
/// the chat history, so citations never reference a stale index. A failed
/// ingest or ask leaves state and history untouched. The index is owned
/// exclusively by this session; operations take `&mut self`, serializing
/// access.
pub struct Session {
    pipeline: Arc<RagPipeline>,
    index: Option<VectorIndex>,
    history: Vec<ChatTurn>,
}

impl Session {
    /// Create an empty session driven by the given pipeline.
    pub fn new(pipeline: Arc<RagPipeline>) -> Self {
        Self { pipeline, index: None, history: Vec::new() }
    }

    /// Whether a successful ingest has produced an index.
    ///
    /// A zero-chunk ingest still counts as ready: asking against an empty
    /// index returns zero sources and whatever the model answers, not an
    /// error.
    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    /// The chat history, in question/answer order.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Ingest documents, replacing any prior index.
    ///
    /// On success the session is `Ready`, the chat history is cleared, and
    /// the number of indexed chunks is returned. On failure the prior
    /// index and history are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexBuild`] if embedding fails.
    pub async fn ingest(&mut self, documents: &[Document]) -> Result<usize> {
        info!(document_count = documents.len(), "ingesting documents");

        let index = self.pipeline.build_index(documents).await.map_err(|e| {
            error!(error = %e, "ingest failed");
            e
        })?;

        let chunk_count = index.len();
        self.index = Some(index);
        self.history.clear();
        info!(chunk_count, "ingest complete");

        Ok(chunk_count)
    }

    /// Answer a question against the ingested documents.
    ///
    /// On success the (question, answer) pair is appended to the chat
    /// history. When `show_sources` is false the returned result carries
    /// no sources. On failure the history is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::NotReady`] if no ingest has succeeded yet, or
    /// [`RagError::Generation`] if embedding or the model call fails.
    pub async fn ask(&mut self, question: &str, show_sources: bool) -> Result<QueryResult> {
        let Some(index) = &self.index else {
            error!(question, "ask before ingest");
            return Err(RagError::NotReady);
        };

        let mut result = self.pipeline.answer(index, question).await.map_err(|e| {
            error!(question, error = %e, "ask failed");
            e
        })?;

        self.history.push(ChatTurn {
            question: question.to_string(),
            answer: result.answer.clone(),
        });

        if !show_sources {
            result.sources.clear();
        }

        Ok(result)
    }

    /// Discard the index and chat history, returning the session to
    /// `Empty`.
    pub fn reset(&mut self) {
        info!("resetting session");
        self.index = None;
        self.history.clear();
    }
}
