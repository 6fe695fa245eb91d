//! Prompt assembly for retrieval-augmented answering.

use crate::document::SearchResult;

/// Assemble retrieved context in nearest-first order, bounded by
/// `max_context_chars`. Lowest-ranked chunks are dropped first when the
/// budget is exceeded; a chunk is included whole or not at all.
pub fn build_context(results: &[SearchResult], max_context_chars: usize) -> String {
    let mut context = String::new();

    for (i, result) in results.iter().enumerate() {
        let entry = format!("[{}] {}\n\n", i + 1, result.chunk.content);
        if !context.is_empty() && context.len() + entry.len() > max_context_chars {
            break;
        }
        context.push_str(&entry);
    }

    context
}

/// Build the question-answering prompt, instructing the model to answer
/// only from the provided context.
pub fn build_qa_prompt(question: &str, context: &str) -> String {
    format!(
        r#"Based on the following context, answer the question. Only use information from the context. If the information is not in the context, say so.

Context:
{context}
Question: {question}

Answer:"#
    )
}
