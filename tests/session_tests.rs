//! Session state machine tests: ingest, ask, reset, and failure paths.

mod common;

use std::sync::Arc;

use common::{
    pipeline, pipeline_with_model, CannedModel, FailingEmbedder, FailingModel, FlakyEmbedder,
};

fn config() -> docqa::RagConfig {
    docqa::RagConfig::builder().chunk_size(100).chunk_overlap(20).top_k(3).build().unwrap()
}

#[tokio::test]
async fn ask_while_empty_fails_with_not_ready() {
    let mut session = docqa::Session::new(pipeline(config(), "irrelevant"));

    let err = session.ask("anything?", true).await.unwrap_err();
    assert!(matches!(err, docqa::RagError::NotReady));
    assert!(!session.is_ready());
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn successful_ingest_makes_session_ready() {
    let mut session = docqa::Session::new(pipeline(config(), "ok"));

    let count = session
        .ingest(&[docqa::Document::from_text("Machine learning enables computers to learn.")])
        .await
        .unwrap();
    assert!(count >= 1);
    assert!(session.is_ready());
}

#[tokio::test]
async fn empty_ingest_is_ready_with_zero_chunks() {
    let mut session = docqa::Session::new(pipeline(config(), "I cannot find this information."));

    let count = session.ingest(&[]).await.unwrap();
    assert_eq!(count, 0);
    assert!(session.is_ready());

    // Asking against an empty index returns zero sources, not an error.
    let result = session.ask("anything?", true).await.unwrap();
    assert!(result.sources.is_empty());
    assert!(!result.answer.is_empty());
}

#[tokio::test]
async fn failed_ingest_leaves_session_empty() {
    let chunker = docqa::RecursiveChunker::new(100, 20);
    let p = Arc::new(
        docqa::RagPipeline::builder()
            .config(config())
            .embedding_provider(Arc::new(FailingEmbedder))
            .completion_model(Arc::new(CannedModel("unused".to_string())))
            .chunker(Arc::new(chunker))
            .build()
            .unwrap(),
    );
    let mut session = docqa::Session::new(p);

    let err = session.ingest(&[docqa::Document::from_text("some text")]).await.unwrap_err();
    assert!(matches!(err, docqa::RagError::IndexBuild(_)));
    assert!(!session.is_ready());
}

#[tokio::test]
async fn failed_reingest_keeps_prior_index_and_history() {
    let embedder = FlakyEmbedder::new();
    let chunker = docqa::RecursiveChunker::new(100, 20);
    let p = Arc::new(
        docqa::RagPipeline::builder()
            .config(config())
            .embedding_provider(embedder.clone())
            .completion_model(Arc::new(CannedModel("An answer.".to_string())))
            .chunker(Arc::new(chunker))
            .build()
            .unwrap(),
    );
    let mut session = docqa::Session::new(p);

    session
        .ingest(&[docqa::Document::from_text("The old corpus talks about volcanoes.")])
        .await
        .unwrap();
    session.ask("What does the corpus talk about?", true).await.unwrap();
    assert_eq!(session.history().len(), 1);

    embedder.fail.store(true, std::sync::atomic::Ordering::SeqCst);
    let err = session
        .ingest(&[docqa::Document::from_text("The new corpus talks about glaciers.")])
        .await
        .unwrap_err();
    assert!(matches!(err, docqa::RagError::IndexBuild(_)));

    // The prior index and history survive the failed re-ingest.
    assert!(session.is_ready());
    assert_eq!(session.history().len(), 1);

    embedder.fail.store(false, std::sync::atomic::Ordering::SeqCst);
    let result = session.ask("volcanoes corpus talks about what?", true).await.unwrap();
    assert!(!result.sources.is_empty());
    assert!(result.sources.iter().any(|s| s.content.contains("volcanoes")));
    assert!(result.sources.iter().all(|s| !s.content.contains("glaciers")));
}

#[tokio::test]
async fn ask_appends_to_history() {
    let mut session = docqa::Session::new(pipeline(config(), "The answer."));
    session.ingest(&[docqa::Document::from_text("Some indexed content here.")]).await.unwrap();

    session.ask("First question?", true).await.unwrap();
    session.ask("Second question?", true).await.unwrap();

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].question, "First question?");
    assert_eq!(history[0].answer, "The answer.");
    assert_eq!(history[1].question, "Second question?");
}

#[tokio::test]
async fn failed_ask_leaves_history_unchanged() {
    let mut session = docqa::Session::new(pipeline_with_model(config(), Arc::new(FailingModel)));
    session.ingest(&[docqa::Document::from_text("Some indexed content here.")]).await.unwrap();

    let err = session.ask("Will this fail?", true).await.unwrap_err();
    assert!(matches!(err, docqa::RagError::Generation(_)));
    assert!(session.is_ready());
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn reingest_clears_history_and_replaces_index() {
    let mut session = docqa::Session::new(pipeline(config(), "An answer."));

    session
        .ingest(&[docqa::Document::from_text("The old corpus talks about volcanoes.")])
        .await
        .unwrap();
    session.ask("What is the old corpus about?", true).await.unwrap();
    assert_eq!(session.history().len(), 1);

    session
        .ingest(&[docqa::Document::from_text("The new corpus talks about glaciers.")])
        .await
        .unwrap();
    assert!(session.history().is_empty());

    // A query after re-ingest can only retrieve chunks from the new corpus.
    let result = session.ask("glaciers corpus talks about what?", true).await.unwrap();
    assert!(!result.sources.is_empty());
    for source in &result.sources {
        assert!(source.content.contains("glaciers"), "stale source: {}", source.content);
        assert!(!source.content.contains("volcanoes"));
    }
}

#[tokio::test]
async fn reset_returns_session_to_empty() {
    let mut session = docqa::Session::new(pipeline(config(), "An answer."));
    session.ingest(&[docqa::Document::from_text("Content to index.")]).await.unwrap();
    session.ask("A question?", true).await.unwrap();
    assert!(session.is_ready());
    assert!(!session.history().is_empty());

    session.reset();
    assert!(!session.is_ready());
    assert!(session.history().is_empty());

    let err = session.ask("After reset?", true).await.unwrap_err();
    assert!(matches!(err, docqa::RagError::NotReady));
}

#[tokio::test]
async fn hiding_sources_still_records_history() {
    let mut session = docqa::Session::new(pipeline(config(), "An answer."));
    session.ingest(&[docqa::Document::from_text("Content to index.")]).await.unwrap();

    let result = session.ask("A question?", false).await.unwrap();
    assert!(result.sources.is_empty());
    assert_eq!(session.history().len(), 1);
}
