/*!
 * Tests for the translation engine
 */

use std::sync::Arc;

use penerjemah::engine::{
    EngineOptions, ModelCache, TranslationEngine, TranslationRequest, MAX_INPUT_CHARS,
};
use penerjemah::errors::{AppError, TranslationError, ValidationError};
use penerjemah::language::TranslationDirection;

use crate::common::mock_models::MockLoader;

const INDO_MINANG: TranslationDirection = TranslationDirection::IndonesianToMinangkabau;

fn engine_over(loader: Arc<MockLoader>) -> TranslationEngine {
    TranslationEngine::new(Arc::new(ModelCache::new(loader)))
}

#[tokio::test]
async fn test_translate_emptyText_shouldFailValidationWithoutTouchingCache() {
    let loader = Arc::new(MockLoader::echo());
    let engine = engine_over(loader.clone());

    let request = TranslationRequest::new("", INDO_MINANG);
    let result = engine.translate(&request).await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::EmptyText))
    ));
    assert_eq!(loader.total_load_count(), 0);
}

#[tokio::test]
async fn test_translate_overLongText_shouldFailAtBoundary() {
    let loader = Arc::new(MockLoader::echo());
    let engine = engine_over(loader.clone());

    let request = TranslationRequest::new("a".repeat(MAX_INPUT_CHARS + 1), INDO_MINANG);
    let result = engine.translate(&request).await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::TooLong { .. }))
    ));
    assert_eq!(loader.total_load_count(), 0);
}

#[tokio::test]
async fn test_translate_validText_shouldReturnResultWithDirection() {
    let engine = engine_over(Arc::new(MockLoader::echo()));

    let request = TranslationRequest::new("selamat pagi", INDO_MINANG);
    let result = engine.translate(&request).await.unwrap();

    assert!(!result.text.is_empty());
    assert_eq!(result.direction, INDO_MINANG);
}

#[tokio::test]
async fn test_translate_sameInputTwice_shouldBeDeterministic() {
    let engine = engine_over(Arc::new(MockLoader::echo()));

    let request = TranslationRequest::new("tarimo kasih sanang hari", INDO_MINANG);
    let first = engine.translate(&request).await.unwrap();
    let second = engine.translate(&request).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_translate_modelLoadFailure_shouldSurfaceModelLoadError() {
    let engine = engine_over(Arc::new(MockLoader::failing()));

    let request = TranslationRequest::new("selamat pagi", INDO_MINANG);
    let result = engine.translate(&request).await;

    assert!(matches!(result, Err(AppError::ModelLoad(_))));
}

#[tokio::test]
async fn test_translate_decodeFailure_shouldSurfaceTranslationError() {
    let engine = engine_over(Arc::new(MockLoader::failing_model()));

    let request = TranslationRequest::new("selamat pagi", INDO_MINANG);
    let result = engine.translate(&request).await;

    assert!(matches!(
        result,
        Err(AppError::Translation(TranslationError::Decode(_)))
    ));
}

#[tokio::test]
async fn test_translate_slowDecode_shouldTimeOut() {
    let cache = Arc::new(ModelCache::new(Arc::new(MockLoader::slow_model(3_000))));
    let engine = TranslationEngine::with_options(
        cache,
        EngineOptions {
            max_concurrent_decodes: 1,
            timeout_secs: 1,
        },
    );

    let request = TranslationRequest::new("selamat pagi", INDO_MINANG);
    let result = engine.translate(&request).await;

    assert!(matches!(
        result,
        Err(AppError::Translation(TranslationError::Timeout(1)))
    ));
}

#[tokio::test]
async fn test_translate_limitedConcurrency_shouldQueueAndComplete() {
    // One decode permit: concurrent calls serialize instead of failing
    let cache = Arc::new(ModelCache::new(Arc::new(MockLoader::slow_model(50))));
    let engine = Arc::new(TranslationEngine::with_options(
        cache,
        EngineOptions {
            max_concurrent_decodes: 1,
            timeout_secs: 30,
        },
    ));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let request = TranslationRequest::new("selamat pagi", INDO_MINANG);
            engine.translate(&request).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}

#[tokio::test]
async fn test_engine_beamParams_shouldBeFixedDefaults() {
    let engine = engine_over(Arc::new(MockLoader::echo()));
    let params = engine.beam_params();

    assert_eq!(params.beam_width, 4);
    assert_eq!(params.max_length, 128);
    assert!((params.length_penalty - 0.6).abs() < f32::EPSILON);
    assert!(params.early_stopping);
}
