/*!
 * Tokenizer adapter for a loaded model.
 *
 * Wraps text to token-id conversion for one model, enforcing the length and
 * padding constraints of the decoding backend. Truncation is silent: input
 * past the length ceiling is dropped, not rejected. Callers that care about
 * the boundary validate character counts before encoding.
 */

use std::path::Path;
use std::sync::Arc;

use tokenizers::Tokenizer;

use crate::errors::{ModelLoadError, TranslationError};

/// Text to token-id adapter, paired 1:1 with a model handle.
///
/// Stateless aside from its configuration; cloning shares the underlying
/// tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerAdapter {
    tokenizer: Arc<Tokenizer>,
    pad_token_id: u32,
    eos_token_id: u32,
}

impl TokenizerAdapter {
    /// Wrap an already-loaded tokenizer
    pub fn new(tokenizer: Tokenizer, pad_token_id: u32, eos_token_id: u32) -> Self {
        Self {
            tokenizer: Arc::new(tokenizer),
            pad_token_id,
            eos_token_id,
        }
    }

    /// Load a `tokenizer.json` from the artifact store
    pub fn from_file(
        path: &Path,
        pad_token_id: u32,
        eos_token_id: u32,
    ) -> Result<Self, ModelLoadError> {
        let tokenizer =
            Tokenizer::from_file(path).map_err(|e| ModelLoadError::Tokenizer(e.to_string()))?;
        Ok(Self::new(tokenizer, pad_token_id, eos_token_id))
    }

    /// Pad token id used to fill short sequences in a batch
    pub fn pad_token_id(&self) -> u32 {
        self.pad_token_id
    }

    /// End-of-sequence marker id
    pub fn eos_token_id(&self) -> u32 {
        self.eos_token_id
    }

    /// Encode text into token ids, truncating silently at `max_length`.
    ///
    /// The returned sequence always ends with the end marker, even when the
    /// input was truncated to make room for it.
    pub fn encode(&self, text: &str, max_length: usize) -> Result<Vec<u32>, TranslationError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| TranslationError::Tokenize(e.to_string()))?;

        let mut ids: Vec<u32> = encoding.get_ids().to_vec();
        ids.truncate(max_length);

        match ids.last() {
            Some(&last) if last == self.eos_token_id => {}
            Some(_) if ids.len() == max_length => {
                // No room left; replace the final token with the end marker
                *ids.last_mut().expect("non-empty after truncate") = self.eos_token_id;
            }
            _ => ids.push(self.eos_token_id),
        }

        Ok(ids)
    }

    /// Encode several texts, padding each to the width of the longest.
    pub fn encode_batch(
        &self,
        texts: &[&str],
        max_length: usize,
    ) -> Result<Vec<Vec<u32>>, TranslationError> {
        let mut batch = texts
            .iter()
            .map(|text| self.encode(text, max_length))
            .collect::<Result<Vec<_>, _>>()?;

        let width = batch.iter().map(|ids| ids.len()).max().unwrap_or(0);
        for ids in &mut batch {
            ids.resize(width, self.pad_token_id);
        }

        Ok(batch)
    }

    /// Decode token ids into plain text, stripping model-internal control
    /// tokens from the output.
    pub fn decode(&self, ids: &[u32]) -> Result<String, TranslationError> {
        let text = self
            .tokenizer
            .decode(ids, true)
            .map_err(|e| TranslationError::Tokenize(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}
