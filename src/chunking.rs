//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`], which
//! splits hierarchically by paragraphs, then sentences, then words, then raw
//! characters, with a configurable overlap between consecutive chunks.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with content and metadata but no
/// embeddings. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split one document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty content. Each
    /// returned chunk has an empty embedding vector. Chunks never span
    /// documents.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;

    /// Split a sequence of documents independently and in order.
    fn chunk_all(&self, documents: &[Document]) -> Vec<Chunk> {
        documents.iter().flat_map(|d| self.chunk(d)).collect()
    }
}

/// Separator hierarchy: paragraph, sentence, word.
const SEPARATORS: [&str; 5] = ["\n\n", ". ", "! ", "? ", " "];

/// Splits text hierarchically: paragraphs → sentences → words → characters.
///
/// The text is first partitioned into segments no longer than
/// `chunk_size - chunk_overlap`, preferring boundaries at the coarsest
/// separator that fits; separators stay attached to the preceding segment,
/// so the partition reproduces the input exactly. Every chunk after the
/// first is then prefixed with the trailing `chunk_overlap` characters of
/// the text before it, which keeps each chunk within `chunk_size` and gives
/// consecutive chunks exactly `chunk_overlap` shared characters wherever the
/// source is long enough. The overlap prefix shrinks when a multibyte
/// character leaves it less than `chunk_overlap` room; a single character
/// wider than `chunk_size` itself is emitted whole.
///
/// # Example
///
/// ```rust,ignore
/// use docqa::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(1000, 200);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between
    ///   consecutive chunks; must be less than `chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.content.is_empty() {
            return Vec::new();
        }

        let target = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
        let segments = partition(&document.content, target, &SEPARATORS);

        let mut chunks = Vec::with_capacity(segments.len());
        let mut consumed = String::new();

        for (i, segment) in segments.into_iter().enumerate() {
            let text = if i == 0 {
                segment.clone()
            } else {
                // A segment holding one character wider than the target can
                // leave less than `chunk_overlap` room; shrink the prefix so
                // the chunk stays within `chunk_size`.
                let budget =
                    self.chunk_overlap.min(self.chunk_size.saturating_sub(segment.len()));
                let tail = overlap_tail(&consumed, budget);
                format!("{tail}{segment}")
            };
            consumed.push_str(&segment);

            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), i.to_string());

            chunks.push(Chunk {
                id: format!("{}_{i}", document.id),
                content: text,
                embedding: Vec::new(),
                metadata,
                document_id: document.id.clone(),
            });
        }

        chunks
    }
}

/// Partition text into segments of at most `target` bytes, preferring the
/// coarsest separator that produces fitting segments. Separators stay
/// attached to the preceding segment; concatenating the output reproduces
/// the input exactly.
fn partition(text: &str, target: usize, separators: &[&str]) -> Vec<String> {
    if text.len() <= target {
        return vec![text.to_string()];
    }
    if separators.is_empty() {
        return partition_by_size(text, target);
    }

    let separator = separators[0];
    let remaining = &separators[1..];
    let pieces = split_keeping_separator(text, separator);

    let mut segments = Vec::new();
    let mut current = String::new();

    for piece in pieces {
        if current.is_empty() {
            current = piece.to_string();
        } else if current.len() + piece.len() <= target {
            current.push_str(piece);
        } else {
            flush(current, target, remaining, &mut segments);
            current = piece.to_string();
        }
    }
    if !current.is_empty() {
        flush(current, target, remaining, &mut segments);
    }

    segments
}

/// Emit a merged run, recursing to finer separators if it still exceeds
/// `target`.
fn flush(run: String, target: usize, separators: &[&str], out: &mut Vec<String>) {
    if run.len() > target {
        out.extend(partition(&run, target, separators));
    } else {
        out.push(run);
    }
}

/// Split text at a separator, keeping the separator attached to the
/// preceding piece.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Character-boundary-safe partition into pieces of at most `target` bytes.
fn partition_by_size(text: &str, target: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + target).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // A single character wider than `target`; emit it whole.
            let width = text[start..].chars().next().map_or(1, char::len_utf8);
            end = start + width;
        }
        out.push(text[start..end].to_string());
        start = end;
    }

    out
}

/// The trailing `overlap` bytes of `text`, snapped forward to a character
/// boundary. Returns the whole text when it is shorter than `overlap`.
fn overlap_tail(text: &str, overlap: usize) -> &str {
    if overlap == 0 {
        return "";
    }
    if text.len() <= overlap {
        return text;
    }
    let mut start = text.len() - overlap;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
