/*!
 * Tests for the per-direction model cache
 */

use std::sync::Arc;

use penerjemah::engine::ModelCache;
use penerjemah::errors::ModelLoadError;
use penerjemah::language::TranslationDirection;

use crate::common::mock_models::MockLoader;

const INDO_MINANG: TranslationDirection = TranslationDirection::IndonesianToMinangkabau;
const MINANG_INDO: TranslationDirection = TranslationDirection::MinangkabauToIndonesian;

#[tokio::test]
async fn test_cache_get_repeatedCalls_shouldReturnIdenticalHandle() {
    let loader = Arc::new(MockLoader::echo());
    let cache = ModelCache::new(loader.clone());

    let first = cache.get(INDO_MINANG).await.unwrap();
    let second = cache.get(INDO_MINANG).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.load_count(INDO_MINANG), 1);
}

#[tokio::test]
async fn test_cache_get_concurrentFirstCalls_shouldConstructOnce() {
    let loader = Arc::new(MockLoader::echo().with_load_delay(50));
    let cache = Arc::new(ModelCache::new(loader.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move { cache.get(INDO_MINANG).await }));
    }

    let mut pairs = Vec::new();
    for handle in handles {
        pairs.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(loader.load_count(INDO_MINANG), 1);
    for pair in &pairs[1..] {
        assert!(Arc::ptr_eq(&pairs[0], pair));
    }
}

#[tokio::test]
async fn test_cache_get_differentDirections_shouldUseSeparateSlots() {
    let loader = Arc::new(MockLoader::echo());
    let cache = ModelCache::new(loader.clone());

    let forward = cache.get(INDO_MINANG).await.unwrap();
    let backward = cache.get(MINANG_INDO).await.unwrap();

    assert!(!Arc::ptr_eq(&forward, &backward));
    assert_eq!(forward.direction, INDO_MINANG);
    assert_eq!(backward.direction, MINANG_INDO);
    assert_eq!(loader.load_count(INDO_MINANG), 1);
    assert_eq!(loader.load_count(MINANG_INDO), 1);
}

#[tokio::test]
async fn test_cache_get_afterLoadFailure_shouldRetryConstruction() {
    let loader = Arc::new(MockLoader::failing_times(1));
    let cache = ModelCache::new(loader.clone());

    let first = cache.get(INDO_MINANG).await;
    assert!(matches!(first, Err(ModelLoadError::MissingArtifact(_))));
    assert!(!cache.is_loaded(INDO_MINANG).await);

    // The failure was not cached; the next call constructs successfully
    let second = cache.get(INDO_MINANG).await;
    assert!(second.is_ok());
    assert_eq!(loader.load_count(INDO_MINANG), 2);
}

#[tokio::test]
async fn test_cache_get_persistentFailure_shouldKeepReturningError() {
    let loader = Arc::new(MockLoader::failing());
    let cache = ModelCache::new(loader.clone());

    for _ in 0..3 {
        let result = cache.get(MINANG_INDO).await;
        assert!(matches!(result, Err(ModelLoadError::MissingArtifact(_))));
    }

    assert_eq!(loader.load_count(MINANG_INDO), 3);
    assert!(!cache.is_loaded(MINANG_INDO).await);
}

#[tokio::test]
async fn test_cache_warm_shouldLoadBothDirections() {
    let loader = Arc::new(MockLoader::echo());
    let cache = ModelCache::new(loader.clone());

    cache.warm().await.unwrap();

    assert!(cache.is_loaded(INDO_MINANG).await);
    assert!(cache.is_loaded(MINANG_INDO).await);
    assert_eq!(loader.total_load_count(), 2);

    // Warm again: nothing reloads
    cache.warm().await.unwrap();
    assert_eq!(loader.total_load_count(), 2);
}
