/*!
 * Process-wide model cache.
 *
 * Maps each translation direction to its loaded model/tokenizer pair with
 * at-most-once construction. The first caller for a direction performs the
 * load while later callers wait on the same slot; once populated, a slot is
 * read-only for the rest of the process lifetime.
 *
 * A failed load leaves its slot empty: the failure is not cached, and the
 * next call for that direction retries construction.
 */

use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::artifacts::{ArtifactLoader, LoadedModel};
use crate::errors::ModelLoadError;
use crate::language::TranslationDirection;

/// Per-direction store of loaded model pairs.
///
/// Holds at most one pair per direction; pairs are never evicted or
/// reconstructed once built.
pub struct ModelCache {
    loader: Arc<dyn ArtifactLoader>,
    slots: [Mutex<Option<Arc<LoadedModel>>>; 2],
}

impl ModelCache {
    /// Create an empty cache over the given artifact loader
    pub fn new(loader: Arc<dyn ArtifactLoader>) -> Self {
        Self {
            loader,
            slots: [Mutex::new(None), Mutex::new(None)],
        }
    }

    /// Resolve the pair for a direction, constructing it on first access.
    ///
    /// Construction is serialized per direction; concurrent first callers
    /// wait for the in-flight load and then share its result. Different
    /// directions never block each other.
    pub async fn get(
        &self,
        direction: TranslationDirection,
    ) -> Result<Arc<LoadedModel>, ModelLoadError> {
        let mut slot = self.slots[direction.index()].lock().await;

        if let Some(pair) = slot.as_ref() {
            debug!("Model cache hit for {}", direction);
            return Ok(pair.clone());
        }

        debug!("Model cache miss for {}, loading artifacts", direction);
        match self.loader.load(direction).await {
            Ok(pair) => {
                let pair = Arc::new(pair);
                *slot = Some(pair.clone());
                Ok(pair)
            }
            Err(e) => {
                // Slot stays empty so a later call can retry
                warn!("Model load failed for {}: {}", direction, e);
                Err(e)
            }
        }
    }

    /// Eagerly load both directions
    pub async fn warm(&self) -> Result<(), ModelLoadError> {
        let [first, second] = TranslationDirection::ALL;
        futures::try_join!(self.get(first), self.get(second))?;
        Ok(())
    }

    /// Whether a direction's pair has been constructed
    pub async fn is_loaded(&self, direction: TranslationDirection) -> bool {
        self.slots[direction.index()].lock().await.is_some()
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache").finish_non_exhaustive()
    }
}
