/*!
 * # Penerjemah - Indonesia <-> Minangkabau translation
 *
 * A Rust library for bidirectional text translation between Indonesian and
 * Minangkabau, backed by two local sequence-to-sequence models (one per
 * direction).
 *
 * ## Features
 *
 * - Per-direction model cache with at-most-once construction
 * - Tokenization with silent truncation and batch padding
 * - Beam search decoding with fixed, deterministic hyperparameters
 * - Session-scoped result store independent of any display refresh cycle
 * - Three-way error taxonomy: validation, model load, translation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `language`: The fixed language pair and translation direction
 * - `engine`: The translation request pipeline:
 *   - `engine::core`: Request validation and the TranslationEngine
 *   - `engine::cache`: Per-direction model cache
 *   - `engine::tokenizer`: Text <-> token-id adapter
 *   - `engine::beam`: Beam search decoding
 * - `artifacts`: Model artifact store and the loader seam
 * - `models`: Decoding backends (ONNX inference, test mocks)
 * - `session`: Session-scoped result store
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod artifacts;
pub mod engine;
pub mod errors;
pub mod language;
pub mod models;
pub mod session;

// Re-export main types for easier usage
pub use app_config::Config;
pub use artifacts::{ArtifactLoader, ArtifactStore, LoadedModel};
pub use engine::{ModelCache, TranslationEngine, TranslationRequest, TranslationResult};
pub use errors::{AppError, ModelLoadError, TranslationError, ValidationError};
pub use language::{Language, TranslationDirection};
pub use session::SessionResultStore;
