/*!
 * End-to-end tests for the translation pipeline: engine over the model
 * cache, result propagation into the session store.
 */

use std::sync::Arc;

use penerjemah::engine::{ModelCache, TranslationEngine, TranslationRequest};
use penerjemah::errors::AppError;
use penerjemah::language::TranslationDirection;
use penerjemah::session::SessionResultStore;

use crate::common::mock_models::MockLoader;
use crate::common::{word_id, EOS_ID};

const INDO_MINANG: TranslationDirection = TranslationDirection::IndonesianToMinangkabau;
const MINANG_INDO: TranslationDirection = TranslationDirection::MinangkabauToIndonesian;

/// Loader whose models translate the two greetings used below
fn greeting_loader() -> MockLoader {
    MockLoader::fixed(
        vec![word_id("salamaik"), word_id("pagi"), EOS_ID],
        vec![word_id("selamat"), word_id("pagi"), EOS_ID],
    )
}

/// Run one request through the engine and store the result on success,
/// the way the display surface drives the pipeline.
async fn translate_and_store(
    engine: &TranslationEngine,
    store: &SessionResultStore,
    text: &str,
    direction: TranslationDirection,
) -> Result<(), AppError> {
    let request = TranslationRequest::new(text, direction);
    let result = engine.translate(&request).await?;
    store.set(result, request.source_text.chars().count());
    Ok(())
}

#[tokio::test]
async fn test_workflow_selamatPagi_shouldStoreDistinctResult() {
    let cache = Arc::new(ModelCache::new(Arc::new(greeting_loader())));
    let engine = TranslationEngine::new(cache);
    let store = SessionResultStore::new();

    translate_and_store(&engine, &store, "Selamat pagi", INDO_MINANG)
        .await
        .unwrap();

    let stored = store.get().unwrap();
    assert!(!stored.text.is_empty());
    assert_ne!(stored.text, "Selamat pagi");
    assert_eq!(stored.text, "salamaik pagi");
    assert_eq!(stored.direction, INDO_MINANG);
}

#[tokio::test]
async fn test_workflow_secondTranslation_shouldOverwriteStoredResult() {
    let cache = Arc::new(ModelCache::new(Arc::new(greeting_loader())));
    let engine = TranslationEngine::new(cache);
    let store = SessionResultStore::new();

    translate_and_store(&engine, &store, "Selamat pagi", INDO_MINANG)
        .await
        .unwrap();
    let first = store.get().unwrap();

    translate_and_store(&engine, &store, "Salamaik pagi", MINANG_INDO)
        .await
        .unwrap();
    let second = store.get().unwrap();

    assert_ne!(first, second);
    assert_eq!(second.direction, MINANG_INDO);
}

#[tokio::test]
async fn test_workflow_coldStartFailure_shouldLeaveStoreUnchanged() {
    let cache = Arc::new(ModelCache::new(Arc::new(MockLoader::failing())));
    let engine = TranslationEngine::new(cache);
    let store = SessionResultStore::new();

    // A result from earlier in the session
    store.set(
        penerjemah::engine::TranslationResult {
            text: "salamaik pagi".to_string(),
            direction: INDO_MINANG,
        },
        12,
    );
    let before = store.entry().unwrap();

    let outcome = translate_and_store(&engine, &store, "Selamat sore", INDO_MINANG).await;

    assert!(matches!(outcome, Err(AppError::ModelLoad(_))));
    assert_eq!(store.entry().unwrap(), before);
}

#[tokio::test]
async fn test_workflow_validationFailure_shouldLeaveStoreUntouchedAndCacheCold() {
    let loader = Arc::new(MockLoader::echo());
    let cache = Arc::new(ModelCache::new(loader.clone()));
    let engine = TranslationEngine::new(cache);
    let store = SessionResultStore::new();

    let outcome = translate_and_store(&engine, &store, "   ", INDO_MINANG).await;

    assert!(matches!(outcome, Err(AppError::Validation(_))));
    assert!(store.is_empty());
    assert_eq!(loader.total_load_count(), 0);
}

#[tokio::test]
async fn test_workflow_warmConcurrentDirections_shouldRunIndependently() {
    let cache = Arc::new(ModelCache::new(Arc::new(greeting_loader())));
    cache.warm().await.unwrap();

    let engine = Arc::new(TranslationEngine::new(cache));

    let forward = {
        let engine = engine.clone();
        tokio::spawn(async move {
            let request = TranslationRequest::new("selamat pagi", INDO_MINANG);
            engine.translate(&request).await
        })
    };
    let backward = {
        let engine = engine.clone();
        tokio::spawn(async move {
            let request = TranslationRequest::new("salamaik pagi", MINANG_INDO);
            engine.translate(&request).await
        })
    };

    let forward = forward.await.unwrap().unwrap();
    let backward = backward.await.unwrap().unwrap();

    assert_eq!(forward.direction, INDO_MINANG);
    assert_eq!(backward.direction, MINANG_INDO);
}

#[tokio::test]
async fn test_workflow_roundTrip_isNotRequiredToReproduceInput() {
    // Quality expectation only: translating A->B then B->A need not yield
    // the original text, and this suite does not assert that it does.
    let cache = Arc::new(ModelCache::new(Arc::new(greeting_loader())));
    let engine = TranslationEngine::new(cache);

    let forward = engine
        .translate(&TranslationRequest::new("selamat pagi", INDO_MINANG))
        .await
        .unwrap();
    let back = engine
        .translate(&TranslationRequest::new(forward.text, MINANG_INDO))
        .await
        .unwrap();

    assert!(!back.text.is_empty());
}
