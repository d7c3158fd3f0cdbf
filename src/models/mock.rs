/*!
 * Mock model backends for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockModel::echo()` - Returns the input sequence unchanged
 * - `MockModel::fixed(ids)` - Always returns a fixed output sequence
 * - `MockModel::failing()` - Always fails with a decode error
 * - `MockModel::slow(ms)` - Delays before echoing (for timeout testing)
 * - `MockModel::empty()` - Returns a bare end-marker sequence
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::engine::beam::BeamParams;
use crate::errors::TranslationError;
use crate::models::Seq2SeqModel;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return the input sequence unchanged
    Echo,
    /// Return a fixed output sequence regardless of input
    Fixed(Vec<u32>),
    /// Always fail with a decode error
    Failing,
    /// Delay before echoing, for timeout testing
    Slow {
        /// Delay applied before responding
        delay_ms: u64,
    },
    /// Return only the end marker
    Empty,
}

/// Mock backend with configurable behavior and a call counter
#[derive(Debug)]
pub struct MockModel {
    behavior: MockBehavior,
    eos_token_id: u32,
    generate_count: Arc<AtomicUsize>,
}

impl MockModel {
    /// Create a mock backend with the specified behavior
    pub fn new(behavior: MockBehavior, eos_token_id: u32) -> Self {
        Self {
            behavior,
            eos_token_id,
            generate_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Backend that returns its input unchanged
    pub fn echo(eos_token_id: u32) -> Self {
        Self::new(MockBehavior::Echo, eos_token_id)
    }

    /// Backend that always produces the given output sequence
    pub fn fixed(output: Vec<u32>, eos_token_id: u32) -> Self {
        Self::new(MockBehavior::Fixed(output), eos_token_id)
    }

    /// Backend that always fails
    pub fn failing(eos_token_id: u32) -> Self {
        Self::new(MockBehavior::Failing, eos_token_id)
    }

    /// Backend that delays before echoing
    pub fn slow(delay_ms: u64, eos_token_id: u32) -> Self {
        Self::new(MockBehavior::Slow { delay_ms }, eos_token_id)
    }

    /// Backend that returns a bare end marker
    pub fn empty(eos_token_id: u32) -> Self {
        Self::new(MockBehavior::Empty, eos_token_id)
    }

    /// Number of generate calls observed so far
    pub fn generate_count(&self) -> usize {
        self.generate_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter, for assertions after a move
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.generate_count.clone()
    }
}

#[async_trait]
impl Seq2SeqModel for MockModel {
    async fn generate(
        &self,
        input_ids: &[u32],
        _params: &BeamParams,
    ) -> Result<Vec<u32>, TranslationError> {
        self.generate_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Echo => Ok(input_ids.to_vec()),
            MockBehavior::Fixed(output) => Ok(output.clone()),
            MockBehavior::Failing => Err(TranslationError::Decode(
                "mock backend configured to fail".to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(input_ids.to_vec())
            }
            MockBehavior::Empty => Ok(vec![self.eos_token_id]),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
