/*!
 * Model artifact store.
 *
 * Artifacts live in one directory per translation direction, named by
 * `TranslationDirection::artifact_key()`:
 *
 * ```text
 * <root>/indonesia-minangkabau/
 *     encoder_model.onnx
 *     decoder_model.onnx
 *     tokenizer.json
 *     config.json
 * <root>/minangkabau-indonesia/
 *     ...
 * ```
 *
 * Each artifact may carry a `<name>.sha256` sidecar; when present, the file
 * content is verified against it before loading.
 */

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::tokenizer::TokenizerAdapter;
use crate::errors::ModelLoadError;
use crate::language::TranslationDirection;
use crate::models::Seq2SeqModel;
use crate::models::marian::MarianOnnx;

/// Required artifact file names inside a direction directory
const ENCODER_FILE: &str = "encoder_model.onnx";
const DECODER_FILE: &str = "decoder_model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";
const CONFIG_FILE: &str = "config.json";

/// A fully constructed model/tokenizer pair for one direction.
///
/// Immutable after construction; shared behind an `Arc` for the life of the
/// process.
#[derive(Debug)]
pub struct LoadedModel {
    /// Direction this pair serves
    pub direction: TranslationDirection,
    /// Opaque decoding capability
    pub model: Arc<dyn Seq2SeqModel>,
    /// Tokenizer paired with the model
    pub tokenizer: TokenizerAdapter,
}

/// Source of model/tokenizer pairs, keyed by direction.
///
/// The cache talks to this seam only, so tests can substitute counting or
/// failing loaders.
#[async_trait]
pub trait ArtifactLoader: Send + Sync {
    /// Construct the pair for a direction, failing with `ModelLoadError` on
    /// missing or invalid artifacts.
    async fn load(&self, direction: TranslationDirection) -> Result<LoadedModel, ModelLoadError>;
}

/// Decoding-relevant fields of the exported model's `config.json`
#[derive(Debug, Clone, Deserialize)]
struct ModelConfig {
    #[serde(default = "default_token_id")]
    decoder_start_token_id: u32,
    #[serde(default = "default_token_id")]
    eos_token_id: u32,
    #[serde(default)]
    pad_token_id: u32,
}

fn default_token_id() -> u32 {
    2
}

/// Directory-backed artifact store
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the artifacts for a direction
    pub fn direction_dir(&self, direction: TranslationDirection) -> PathBuf {
        self.root.join(direction.artifact_key())
    }

    fn require_file(dir: &Path, name: &str) -> Result<PathBuf, ModelLoadError> {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(ModelLoadError::MissingArtifact(path));
        }
        Ok(path)
    }

    /// Verify a `<name>.sha256` sidecar when one exists
    fn verify_checksum(path: &Path) -> Result<(), ModelLoadError> {
        let sidecar = PathBuf::from(format!("{}.sha256", path.display()));
        if !sidecar.is_file() {
            return Ok(());
        }

        let recorded = std::fs::read_to_string(&sidecar).map_err(|e| {
            ModelLoadError::InvalidArtifact {
                path: sidecar.clone(),
                reason: e.to_string(),
            }
        })?;
        let expected = recorded
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();

        let mut file = File::open(path).map_err(|e| ModelLoadError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(|e| ModelLoadError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let actual = format!("{:x}", hasher.finalize());

        if actual != expected {
            return Err(ModelLoadError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
        debug!("Checksum verified for {}", path.display());
        Ok(())
    }

    fn read_config(path: &Path) -> Result<ModelConfig, ModelLoadError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ModelLoadError::InvalidArtifact {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| ModelLoadError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Blocking load of everything under a direction directory.
    ///
    /// Ordered so the cheap integrity checks run before any session memory is
    /// committed: existence, checksums, config, tokenizer, sessions.
    fn load_blocking(
        dir: PathBuf,
        direction: TranslationDirection,
    ) -> Result<LoadedModel, ModelLoadError> {
        if !dir.is_dir() {
            return Err(ModelLoadError::MissingArtifact(dir));
        }

        let encoder_path = Self::require_file(&dir, ENCODER_FILE)?;
        let decoder_path = Self::require_file(&dir, DECODER_FILE)?;
        let tokenizer_path = Self::require_file(&dir, TOKENIZER_FILE)?;
        let config_path = Self::require_file(&dir, CONFIG_FILE)?;

        for path in [&encoder_path, &decoder_path, &tokenizer_path, &config_path] {
            Self::verify_checksum(path)?;
        }

        let config = Self::read_config(&config_path)?;
        let tokenizer = TokenizerAdapter::from_file(
            &tokenizer_path,
            config.pad_token_id,
            config.eos_token_id,
        )?;

        let model = MarianOnnx::load(
            direction.artifact_key(),
            &encoder_path,
            &decoder_path,
            config.decoder_start_token_id,
            config.eos_token_id,
        )?;

        info!("Loaded model artifacts for {}", direction);
        Ok(LoadedModel {
            direction,
            model: Arc::new(model),
            tokenizer,
        })
    }
}

#[async_trait]
impl ArtifactLoader for ArtifactStore {
    async fn load(&self, direction: TranslationDirection) -> Result<LoadedModel, ModelLoadError> {
        let dir = self.direction_dir(direction);
        debug!("Loading artifacts for {} from {}", direction, dir.display());

        tokio::task::spawn_blocking(move || Self::load_blocking(dir, direction))
            .await
            .map_err(|e| ModelLoadError::Backend(format!("load task failed: {}", e)))?
    }
}
