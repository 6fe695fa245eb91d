//! Error types for the `docqa` crate.

use thiserror::Error;

/// Errors that can occur across the document-to-answer pipeline.
///
/// There is no catch-all variant and no automatic retry anywhere in this
/// crate: provider failures surface as [`IndexBuild`](RagError::IndexBuild)
/// or [`Generation`](RagError::Generation) depending on which operation was
/// in flight, and per-file load failures are caught at the
/// [`DocumentLoader`](crate::loader::DocumentLoader) boundary.
#[derive(Debug, Error)]
pub enum RagError {
    /// A single file could not be read or parsed.
    ///
    /// Raised by format readers; the loader catches and logs it, so it
    /// never escapes a `load` call.
    #[error("failed to load '{path}': {message}")]
    Load {
        /// The path of the file that failed.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An embedding provider failed or returned malformed output.
    #[error("embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Index construction failed during ingest.
    #[error("index build failed: {0}")]
    IndexBuild(String),

    /// A question was asked before any documents were ingested.
    #[error("No documents loaded. Please ingest documents before asking.")]
    NotReady,

    /// The language model call failed during an ask.
    #[error("answer generation failed: {0}")]
    Generation(String),

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
