/*!
 * Session-scoped result store.
 *
 * Holds the most recent translation result and its input metadata for the
 * lifetime of one interactive session, independent of any display refresh
 * cycle. One slot only: each successful translation overwrites the previous
 * one, and nothing survives the session.
 */

use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::engine::TranslationResult;

/// Stored result plus the input metadata it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    /// The translation result
    pub result: TranslationResult,
    /// Character count of the source text
    pub source_chars: usize,
    /// When the translation completed
    pub translated_at: DateTime<Utc>,
}

/// One-slot store for the latest translation of a session.
///
/// Cloning shares the slot, so any handle sees the same latest result.
pub struct SessionResultStore {
    /// Session identity, for logs
    id: Uuid,

    /// The single result slot
    slot: Arc<RwLock<Option<SessionEntry>>>,
}

impl SessionResultStore {
    /// Create an empty store for a new session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Identity of the owning session
    pub fn session_id(&self) -> Uuid {
        self.id
    }

    /// Latest result, if any translation has succeeded this session
    pub fn get(&self) -> Option<TranslationResult> {
        self.slot.read().as_ref().map(|entry| entry.result.clone())
    }

    /// Latest entry with its metadata
    pub fn entry(&self) -> Option<SessionEntry> {
        self.slot.read().clone()
    }

    /// Store a new result, overwriting any previous one unconditionally
    pub fn set(&self, result: TranslationResult, source_chars: usize) {
        let direction = result.direction;
        let entry = SessionEntry {
            result,
            source_chars,
            translated_at: Utc::now(),
        };

        let mut slot = self.slot.write();
        *slot = Some(entry);

        debug!(
            "Session {} stored a {} result",
            &self.id.to_string()[..8],
            direction
        );
    }

    /// Drop the stored result
    pub fn clear(&self) {
        let mut slot = self.slot.write();
        *slot = None;
        debug!("Session {} cleared", &self.id.to_string()[..8]);
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.slot.read().is_none()
    }
}

impl Default for SessionResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionResultStore {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            slot: self.slot.clone(),
        }
    }
}

impl std::fmt::Debug for SessionResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionResultStore")
            .field("id", &self.id)
            .field("is_empty", &self.is_empty())
            .finish()
    }
}
