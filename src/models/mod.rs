/*!
 * Model backends for the translation pipeline.
 *
 * The decoding capability is an opaque seam: given tokenized input, produce
 * tokenized output. This module defines the trait all backends implement:
 * - `marian`: local ONNX encoder/decoder inference
 * - `mock`: deterministic backends for tests and benches
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::engine::beam::BeamParams;
use crate::errors::TranslationError;

/// Common trait for sequence-to-sequence decoding backends.
///
/// A backend is an immutable, loaded, inference-capable artifact bound to one
/// translation direction. It is expensive to construct and safe to share
/// across any number of concurrent requests once built.
#[async_trait]
pub trait Seq2SeqModel: Send + Sync + Debug {
    /// Generate output token ids for tokenized input via beam search.
    ///
    /// # Arguments
    /// * `input_ids` - Encoded source sequence, end marker included
    /// * `params` - Fixed decoding hyperparameters
    ///
    /// # Returns
    /// * `Result<Vec<u32>, TranslationError>` - The top beam's output sequence
    async fn generate(
        &self,
        input_ids: &[u32],
        params: &BeamParams,
    ) -> Result<Vec<u32>, TranslationError>;

    /// Short backend name for logging
    fn name(&self) -> &str;
}

pub mod marian;
pub mod mock;
