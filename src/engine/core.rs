/*!
 * Core translation engine.
 *
 * This module contains the main TranslationEngine struct and its
 * implementation, which turns a validated request into translated text:
 * tokenize, beam-search decode, detokenize. Model pairs come from the
 * injected ModelCache; the engine itself holds no model state.
 */

use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

use crate::engine::beam::BeamParams;
use crate::engine::cache::ModelCache;
use crate::errors::{AppError, TranslationError, ValidationError};
use crate::language::TranslationDirection;

/// Input length ceiling, in characters, matching the original interface
pub const MAX_INPUT_CHARS: usize = 5000;

/// Token budget for an encoded source sequence
pub const MAX_INPUT_TOKENS: usize = 128;

/// A single translation request, created per user action
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Text to translate
    pub source_text: String,
    /// Which of the two languages is the source
    pub direction: TranslationDirection,
}

impl TranslationRequest {
    /// Create a request for the given text and direction
    pub fn new(source_text: impl Into<String>, direction: TranslationDirection) -> Self {
        Self {
            source_text: source_text.into(),
            direction,
        }
    }

    /// Check the request against the input contract.
    ///
    /// Runs before any model or cache access, so an invalid request never
    /// triggers a model load.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source_text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let length = self.source_text.chars().count();
        if length > MAX_INPUT_CHARS {
            return Err(ValidationError::TooLong {
                length,
                max: MAX_INPUT_CHARS,
            });
        }

        Ok(())
    }
}

/// Result of a successful translation
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    /// Translated text
    pub text: String,
    /// Direction of the request that produced it
    pub direction: TranslationDirection,
}

/// Engine tuning knobs; decoding hyperparameters are fixed and live in
/// `BeamParams::default()`.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Maximum number of decode calls allowed to run at once.
    ///
    /// The decoding resource may be single-threaded or otherwise
    /// constrained, so concurrent calls queue here instead of assuming
    /// unbounded throughput.
    pub max_concurrent_decodes: usize,

    /// Time budget per translate call, in seconds
    pub timeout_secs: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_concurrent_decodes: 1,
            timeout_secs: 30,
        }
    }
}

/// Main translation engine
pub struct TranslationEngine {
    /// Model cache, injected rather than ambient
    cache: Arc<ModelCache>,

    /// Fixed decoding hyperparameters
    beam: BeamParams,

    /// Limits concurrent decode calls
    limiter: Arc<Semaphore>,

    /// Per-call time budget
    timeout: Duration,
}

impl TranslationEngine {
    /// Create an engine with default options
    pub fn new(cache: Arc<ModelCache>) -> Self {
        Self::with_options(cache, EngineOptions::default())
    }

    /// Create an engine with explicit options
    pub fn with_options(cache: Arc<ModelCache>, options: EngineOptions) -> Self {
        Self {
            cache,
            beam: BeamParams::default(),
            limiter: Arc::new(Semaphore::new(options.max_concurrent_decodes.max(1))),
            timeout: Duration::from_secs(options.timeout_secs.max(1)),
        }
    }

    /// The decoding hyperparameters in effect
    pub fn beam_params(&self) -> &BeamParams {
        &self.beam
    }

    /// Translate a single request.
    ///
    /// No retries happen here; a failed call is reported as-is and the
    /// caller decides whether the failure is transient.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, AppError> {
        request.validate()?;

        let pair = self.cache.get(request.direction).await?;

        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|e| TranslationError::ResourceExhausted(e.to_string()))?;

        let started = Instant::now();
        let decode = async {
            let input_ids = pair
                .tokenizer
                .encode(&request.source_text, MAX_INPUT_TOKENS)?;
            debug!(
                "Encoded {} chars into {} tokens for {}",
                request.source_text.chars().count(),
                input_ids.len(),
                request.direction
            );

            let output_ids = pair.model.generate(&input_ids, &self.beam).await?;
            pair.tokenizer.decode(&output_ids)
        };

        let text = tokio::time::timeout(self.timeout, decode)
            .await
            .map_err(|_| TranslationError::Timeout(self.timeout.as_secs()))??;

        info!(
            "Translated {} chars ({}) in {:.2}s",
            request.source_text.chars().count(),
            request.direction,
            started.elapsed().as_secs_f32()
        );

        Ok(TranslationResult {
            text,
            direction: request.direction,
        })
    }
}

impl std::fmt::Debug for TranslationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationEngine")
            .field("beam", &self.beam)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
