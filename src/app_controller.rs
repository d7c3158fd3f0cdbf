use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::artifacts::ArtifactStore;
use crate::engine::{
    EngineOptions, ModelCache, TranslationEngine, TranslationRequest, TranslationResult,
};
use crate::errors::AppError;
use crate::language::TranslationDirection;
use crate::session::SessionResultStore;

// @module: Application controller for the translation session

/// Main application controller wiring config, cache, engine and session
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Process-wide model cache
    cache: Arc<ModelCache>,

    // @field: Translation engine over the cache
    engine: TranslationEngine,

    // @field: Result store for this interactive session
    session: SessionResultStore,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let store = ArtifactStore::new(config.models_dir.clone());
        let cache = Arc::new(ModelCache::new(Arc::new(store)));
        let engine = TranslationEngine::with_options(
            cache.clone(),
            EngineOptions {
                max_concurrent_decodes: config.engine.max_concurrent_decodes,
                timeout_secs: config.engine.timeout_secs,
            },
        );

        Ok(Self {
            config,
            cache,
            engine,
            session: SessionResultStore::new(),
        })
    }

    /// Create a controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// The session result store owned by this controller
    pub fn session(&self) -> &SessionResultStore {
        &self.session
    }

    /// Verify that both directions load from the artifact store
    pub async fn check(&self) -> Result<()> {
        let spinner = self.spinner("Memeriksa artefak model...");

        let result = self.cache.warm().await;
        spinner.finish_and_clear();

        match result {
            Ok(()) => {
                info!(
                    "Both model pairs loaded from {}",
                    self.config.models_dir.display()
                );
                Ok(())
            }
            Err(e) => Err(e).context("Model artifact check failed"),
        }
    }

    /// Translate one text and store the result in the session
    pub async fn translate_once(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> Result<TranslationResult, AppError> {
        let request = TranslationRequest::new(text, direction);

        let spinner = self.spinner("Menerjemahkan...");
        let outcome = self.engine.translate(&request).await;
        spinner.finish_and_clear();

        let result = outcome?;
        self.session
            .set(result.clone(), request.source_text.chars().count());
        Ok(result)
    }

    /// Translate lines from standard input until EOF.
    ///
    /// Failures are reported and the session continues; the stored result is
    /// only replaced by a later success.
    pub async fn run_interactive(&self, direction: TranslationDirection) -> Result<()> {
        info!(
            "Interactive session {} ({}); enter text, Ctrl-D to finish",
            &self.session.session_id().to_string()[..8],
            direction
        );

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            match self.translate_once(&line, direction).await {
                Ok(result) => println!("{}", result.text),
                Err(AppError::Validation(e)) => {
                    warn!("Mohon masukkan teks yang ingin diterjemahkan ({})", e);
                }
                Err(e) => {
                    error!("Terjadi kesalahan saat menerjemahkan: {}", e);
                }
            }
        }

        if let Some(entry) = self.session.entry() {
            info!(
                "Session done; last result: {} chars ({})",
                entry.result.text.chars().count(),
                entry.result.direction
            );
        }
        Ok(())
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
