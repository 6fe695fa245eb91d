//! Document loading.
//!
//! [`DocumentLoader`] converts heterogeneous file inputs into a uniform
//! sequence of [`Document`]s. Per-format parsing is delegated to
//! [`FormatReader`] implementations registered at construction time, so
//! optional formats are an explicit capability query
//! ([`supports`](DocumentLoader::supports)) rather than a load-time failure.
//!
//! A failure reading one file is caught and logged; it never aborts the
//! whole batch. Unsupported extensions are skipped with a warning.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::document::Document;
use crate::error::{RagError, Result};

/// A reader for one file format.
pub trait FormatReader: Send + Sync {
    /// The lowercased file extension this reader handles, without the dot.
    fn extension(&self) -> &'static str;

    /// Read a file into one or more [`Document`]s (one per page/record).
    fn read(&self, path: &Path) -> Result<Vec<Document>>;
}

/// Loads files into [`Document`]s by dispatching on file extension.
pub struct DocumentLoader {
    readers: Vec<Box<dyn FormatReader>>,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader {
    /// Create a loader with every built-in reader the enabled features
    /// provide: plain text always, PDF with the `pdf` feature, DOCX with
    /// the `docx` feature.
    pub fn new() -> Self {
        let mut loader = Self { readers: Vec::new() };
        loader.register(Box::new(TextReader));
        #[cfg(feature = "pdf")]
        loader.register(Box::new(PdfReader));
        #[cfg(feature = "docx")]
        loader.register(Box::new(DocxReader));
        loader
    }

    /// Create a loader with no readers registered.
    pub fn empty() -> Self {
        Self { readers: Vec::new() }
    }

    /// Register an additional format reader.
    pub fn register(&mut self, reader: Box<dyn FormatReader>) {
        self.readers.push(reader);
    }

    /// Whether a lowercased extension has a registered reader.
    pub fn supports(&self, extension: &str) -> bool {
        self.readers.iter().any(|r| r.extension() == extension)
    }

    /// Load documents from the given paths.
    ///
    /// Files with no registered reader are skipped with a warning, and a
    /// failure reading one file is logged and skips only that file. Empty
    /// input or all-skipped input yields an empty sequence, not an error.
    pub fn load(&self, paths: &[PathBuf]) -> Vec<Document> {
        info!(file_count = paths.len(), "loading documents");
        let mut documents = Vec::new();

        for path in paths {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase)
                .unwrap_or_default();

            let Some(reader) = self.readers.iter().find(|r| r.extension() == extension) else {
                warn!(path = %path.display(), %extension, "unsupported file type, skipping");
                continue;
            };

            match reader.read(path) {
                Ok(docs) => {
                    info!(path = %path.display(), unit_count = docs.len(), "loaded file");
                    documents.extend(docs);
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "failed to load file, skipping");
                }
            }
        }

        documents
    }
}

/// Build the document id for one page of a file.
fn document_id(path: &Path, page: Option<usize>) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    match page {
        Some(n) => format!("{stem}_p{n}"),
        None => stem.to_string(),
    }
}

/// Reads a plain-text file as a single document.
pub struct TextReader;

impl FormatReader for TextReader {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn read(&self, path: &Path) -> Result<Vec<Document>> {
        let content = std::fs::read_to_string(path).map_err(|e| RagError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(vec![Document::new(
            document_id(path, None),
            content,
            path.display().to_string(),
        )])
    }
}

/// Reads a PDF file as one document per page, with a 1-indexed `page`
/// metadata field.
#[cfg(feature = "pdf")]
pub struct PdfReader;

#[cfg(feature = "pdf")]
impl FormatReader for PdfReader {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn read(&self, path: &Path) -> Result<Vec<Document>> {
        let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| RagError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, content)| {
                let page = i + 1;
                let mut doc = Document::new(
                    document_id(path, Some(page)),
                    content,
                    path.display().to_string(),
                );
                doc.metadata.insert("page".to_string(), page.to_string());
                doc
            })
            .collect())
    }
}

/// Reads a word-processor document as a single document of paragraph text.
#[cfg(feature = "docx")]
pub struct DocxReader;

#[cfg(feature = "docx")]
impl FormatReader for DocxReader {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn read(&self, path: &Path) -> Result<Vec<Document>> {
        let data = std::fs::read(path).map_err(|e| RagError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let docx = docx_rs::read_docx(&data).map_err(|e| RagError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut content = String::new();
        for child in docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(text) = child {
                                content.push_str(&text.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(vec![Document::new(
            document_id(path, None),
            content,
            path.display().to_string(),
        )])
    }
}
