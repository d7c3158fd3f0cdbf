/*!
 * ONNX encoder/decoder backend.
 *
 * Drives a Marian-style exported pair of sessions: the encoder runs once per
 * request, the decoder runs autoregressively under beam search. Sessions
 * need exclusive access to run, so each is wrapped in a mutex and the whole
 * decode happens on a blocking thread.
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use ort::session::Session;
use ort::value::{Tensor, TensorValueType};

use crate::engine::beam::{BeamParams, BeamSearch, Hypothesis};
use crate::errors::{ModelLoadError, TranslationError};
use crate::models::Seq2SeqModel;

/// Loaded ONNX encoder/decoder pair bound to one translation direction
pub struct MarianOnnx {
    name: String,
    encoder: Arc<StdMutex<Session>>,
    decoder: Arc<StdMutex<Session>>,
    decoder_start_token_id: u32,
    eos_token_id: u32,
}

impl MarianOnnx {
    /// Load both sessions from exported ONNX files
    pub fn load(
        name: &str,
        encoder_path: &Path,
        decoder_path: &Path,
        decoder_start_token_id: u32,
        eos_token_id: u32,
    ) -> Result<Self, ModelLoadError> {
        let encoder = Self::load_session(encoder_path)?;
        let decoder = Self::load_session(decoder_path)?;

        Ok(Self {
            name: name.to_string(),
            encoder: Arc::new(StdMutex::new(encoder)),
            decoder: Arc::new(StdMutex::new(decoder)),
            decoder_start_token_id,
            eos_token_id,
        })
    }

    fn load_session(path: &Path) -> Result<Session, ModelLoadError> {
        Session::builder()
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| ModelLoadError::Backend(format!("{}: {}", path.display(), e)))
    }

    /// Encoder pass: input ids to hidden states, flattened with their shape
    fn run_encoder(
        encoder: &Arc<StdMutex<Session>>,
        input_ids: &[i64],
    ) -> Result<(Vec<usize>, Vec<f32>), TranslationError> {
        let seq_len = input_ids.len();
        let ids_tensor =
            Tensor::<i64>::from_array(([1usize, seq_len], input_ids.to_vec().into_boxed_slice()))
                .map_err(|e| TranslationError::Decode(e.to_string()))?;
        let mask: Vec<i64> = vec![1; seq_len];
        let mask_tensor = Tensor::<i64>::from_array(([1usize, seq_len], mask.into_boxed_slice()))
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let mut guard = encoder
            .lock()
            .map_err(|_| TranslationError::Decode("encoder lock poisoned".to_string()))?;
        let mut outputs = guard
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor
            ])
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let hidden = outputs
            .remove("last_hidden_state")
            .ok_or_else(|| TranslationError::Decode("encoder returned no hidden state".to_string()))?
            .downcast::<TensorValueType<f32>>()
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let (shape, data) = hidden.extract_tensor();
        let shape: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        if shape.len() != 3 {
            return Err(TranslationError::Decode(format!(
                "unexpected encoder output shape: {:?}",
                shape
            )));
        }
        Ok((shape, data.to_vec()))
    }

    /// One decoder pass for a partial output sequence; returns the last
    /// position's logits.
    fn run_decoder(
        decoder: &Arc<StdMutex<Session>>,
        decoder_ids: &[i64],
        encoder_shape: &[usize],
        encoder_hidden: &[f32],
    ) -> Result<Vec<f32>, TranslationError> {
        let src_len = encoder_shape[1];
        let hidden_size = encoder_shape[2];
        let out_len = decoder_ids.len();

        let ids_tensor =
            Tensor::<i64>::from_array(([1usize, out_len], decoder_ids.to_vec().into_boxed_slice()))
                .map_err(|e| TranslationError::Decode(e.to_string()))?;
        let mask: Vec<i64> = vec![1; src_len];
        let mask_tensor = Tensor::<i64>::from_array(([1usize, src_len], mask.into_boxed_slice()))
            .map_err(|e| TranslationError::Decode(e.to_string()))?;
        let hidden_tensor = Tensor::<f32>::from_array((
            [1usize, src_len, hidden_size],
            encoder_hidden.to_vec().into_boxed_slice(),
        ))
        .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let mut guard = decoder
            .lock()
            .map_err(|_| TranslationError::Decode("decoder lock poisoned".to_string()))?;
        let mut outputs = guard
            .run(ort::inputs![
                "encoder_attention_mask" => mask_tensor,
                "input_ids" => ids_tensor,
                "encoder_hidden_states" => hidden_tensor
            ])
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let logits = outputs
            .remove("logits")
            .ok_or_else(|| TranslationError::Decode("decoder returned no logits".to_string()))?
            .downcast::<TensorValueType<f32>>()
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let (shape, data) = logits.extract_tensor();
        let shape: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        let vocab_size = *shape.last().ok_or_else(|| {
            TranslationError::Decode("decoder logits have no vocab dimension".to_string())
        })?;
        if data.len() < vocab_size {
            return Err(TranslationError::Decode(format!(
                "decoder logits too short: {} values for vocab {}",
                data.len(),
                vocab_size
            )));
        }

        // Logits for the last generated position only
        let start = data.len() - vocab_size;
        Ok(data[start..].to_vec())
    }

    /// Normalize logits to log probabilities and keep the top candidates
    fn top_log_probs(logits: &[f32], keep: usize) -> Vec<(u32, f32)> {
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let log_sum: f32 = logits.iter().map(|&x| (x - max).exp()).sum::<f32>().ln();

        let mut scored: Vec<(u32, f32)> = logits
            .iter()
            .enumerate()
            .map(|(id, &x)| (id as u32, x - max - log_sum))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(keep);
        scored
    }
}

#[async_trait]
impl Seq2SeqModel for MarianOnnx {
    async fn generate(
        &self,
        input_ids: &[u32],
        params: &BeamParams,
    ) -> Result<Vec<u32>, TranslationError> {
        let encoder = self.encoder.clone();
        let decoder = self.decoder.clone();
        let input: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
        let params = *params;
        let start_id = self.decoder_start_token_id;
        let eos_id = self.eos_token_id;

        tokio::task::spawn_blocking(move || {
            let (encoder_shape, encoder_hidden) = Self::run_encoder(&encoder, &input)?;

            let search = BeamSearch::new(params, eos_id);
            let best = search.search(|hypotheses: &[Hypothesis]| {
                hypotheses
                    .iter()
                    .map(|hypothesis| {
                        let mut decoder_ids: Vec<i64> = Vec::with_capacity(hypothesis.tokens.len() + 1);
                        decoder_ids.push(start_id as i64);
                        decoder_ids.extend(hypothesis.tokens.iter().map(|&id| id as i64));

                        let logits = Self::run_decoder(
                            &decoder,
                            &decoder_ids,
                            &encoder_shape,
                            &encoder_hidden,
                        )?;
                        Ok(Self::top_log_probs(&logits, params.beam_width))
                    })
                    .collect()
            })?;

            Ok(best.tokens)
        })
        .await
        .map_err(|e| TranslationError::Decode(format!("decode task failed: {}", e)))?
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MarianOnnx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarianOnnx")
            .field("name", &self.name)
            .field("decoder_start_token_id", &self.decoder_start_token_id)
            .field("eos_token_id", &self.eos_token_id)
            .finish()
    }
}
