/*!
 * Translation engine for the fixed language pair.
 *
 * This module contains the request pipeline from source text to translated
 * text. It is split into several submodules:
 *
 * - `core`: Request validation and the TranslationEngine itself
 * - `cache`: Per-direction model cache with at-most-once construction
 * - `tokenizer`: Text to token-id adapter with length/padding constraints
 * - `beam`: Beam search decoding over a backend-supplied step function
 */

// Re-export main types for easier usage
pub use self::beam::{BeamParams, BeamSearch, Hypothesis};
pub use self::cache::ModelCache;
pub use self::core::{
    EngineOptions, TranslationEngine, TranslationRequest, TranslationResult, MAX_INPUT_CHARS,
    MAX_INPUT_TOKENS,
};
pub use self::tokenizer::TokenizerAdapter;

// Submodules
pub mod beam;
pub mod cache;
pub mod core;
pub mod tokenizer;
