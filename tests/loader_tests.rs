//! Loader scenarios: dispatch, skipping, and text input.

use std::fs;
use std::path::PathBuf;

use docqa::{Document, DocumentLoader};

#[test]
fn loads_txt_and_skips_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let txt_path = dir.path().join("notes.txt");
    let xyz_path = dir.path().join("blob.xyz");
    fs::write(&txt_path, "hello from a text file").unwrap();
    fs::write(&xyz_path, "binary gibberish").unwrap();

    let loader = DocumentLoader::new();
    let docs = loader.load(&[txt_path.clone(), xyz_path]);

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "hello from a text file");
    assert_eq!(docs[0].metadata["source"], txt_path.display().to_string());
    assert_eq!(docs[0].id, "notes");
}

#[test]
fn unreadable_file_skips_only_that_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, "still loaded").unwrap();
    let missing = dir.path().join("missing.txt");

    let loader = DocumentLoader::new();
    let docs = loader.load(&[missing, good]);

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "still loaded");
}

#[test]
fn empty_input_yields_empty_output() {
    let loader = DocumentLoader::new();
    assert!(loader.load(&[]).is_empty());
}

#[test]
fn extension_dispatch_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("UPPER.TXT");
    fs::write(&path, "case insensitive").unwrap();

    let loader = DocumentLoader::new();
    let docs = loader.load(&[path]);
    assert_eq!(docs.len(), 1);
}

#[test]
fn path_without_extension_is_skipped() {
    let loader = DocumentLoader::new();
    assert!(loader.load(&[PathBuf::from("/tmp/no_extension_here")]).is_empty());
}

#[test]
fn from_text_yields_one_unit_with_text_input_source() {
    let doc = Document::from_text("pasted content");
    assert_eq!(doc.content, "pasted content");
    assert_eq!(doc.metadata["source"], "text_input");
}

#[test]
fn pasted_text_documents_get_unique_ids() {
    let first = Document::from_text("first paste");
    let second = Document::from_text("second paste");
    assert_ne!(first.id, second.id);
    assert_eq!(first.metadata["source"], "text_input");
    assert_eq!(second.metadata["source"], "text_input");
}
