/*!
 * Beam search decoding.
 *
 * Explores a fixed number of candidate output sequences in parallel and
 * returns the highest-scoring complete one. Scores are length-normalized so
 * the penalty discourages degenerate short or runaway long outputs.
 */

use crate::errors::TranslationError;

/// Fixed decoding hyperparameters.
///
/// These are not request-configurable; every translation uses the same
/// settings, which makes decoding deterministic for a given model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamParams {
    /// Number of hypotheses kept alive at each step
    pub beam_width: usize,
    /// Hard cap on generated sequence length
    pub max_length: usize,
    /// Exponent applied to sequence length when normalizing scores
    pub length_penalty: f32,
    /// Stop as soon as enough hypotheses have reached the end marker
    pub early_stopping: bool,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            beam_width: 4,
            max_length: 128,
            length_penalty: 0.6,
            early_stopping: true,
        }
    }
}

/// A candidate output sequence under construction
#[derive(Debug, Clone)]
pub struct Hypothesis {
    /// Token sequence generated so far, end marker included once finished
    pub tokens: Vec<u32>,
    /// Cumulative log probability of the sequence
    pub log_prob: f32,
    /// Whether the sequence has reached the end marker
    pub finished: bool,
}

impl Hypothesis {
    fn start() -> Self {
        Self {
            tokens: Vec::new(),
            log_prob: 0.0,
            finished: false,
        }
    }

    /// Length-normalized score used for ranking
    pub fn score(&self, length_penalty: f32) -> f32 {
        let length = self.tokens.len().max(1) as f32;
        self.log_prob / length.powf(length_penalty)
    }
}

/// Beam search decoder over a step function supplied by the model backend.
///
/// The decoder itself knows nothing about tensors; the backend provides, for
/// each live hypothesis, the candidate next tokens with their log
/// probabilities.
pub struct BeamSearch {
    params: BeamParams,
    eos_token_id: u32,
}

impl BeamSearch {
    /// Create a decoder with the given parameters and end marker
    pub fn new(params: BeamParams, eos_token_id: u32) -> Self {
        Self {
            params,
            eos_token_id,
        }
    }

    /// Run the search and return the best finished hypothesis.
    ///
    /// `next_log_probs` receives the live (unfinished) hypotheses and must
    /// return, per hypothesis, candidate `(token_id, log_prob)` pairs. Backend
    /// failures propagate unchanged.
    pub fn search<F>(&self, mut next_log_probs: F) -> Result<Hypothesis, TranslationError>
    where
        F: FnMut(&[Hypothesis]) -> Result<Vec<Vec<(u32, f32)>>, TranslationError>,
    {
        let penalty = self.params.length_penalty;
        let mut beam = vec![Hypothesis::start()];
        let mut finished: Vec<Hypothesis> = Vec::new();

        for _step in 0..self.params.max_length {
            if beam.is_empty() {
                break;
            }

            let expansions = next_log_probs(&beam)?;
            if expansions.len() != beam.len() {
                return Err(TranslationError::Decode(format!(
                    "backend returned {} expansions for {} hypotheses",
                    expansions.len(),
                    beam.len()
                )));
            }

            let mut candidates = Vec::new();
            for (hypothesis, next_tokens) in beam.iter().zip(expansions) {
                for (token_id, log_prob) in next_tokens {
                    let mut extended = hypothesis.clone();
                    extended.tokens.push(token_id);
                    extended.log_prob += log_prob;

                    if token_id == self.eos_token_id {
                        extended.finished = true;
                        finished.push(extended);
                    } else {
                        candidates.push(extended);
                    }
                }
            }

            candidates.sort_by(|a, b| b.score(penalty).total_cmp(&a.score(penalty)));
            candidates.truncate(self.params.beam_width);
            beam = candidates;

            // All beams have reached the end marker
            if self.params.early_stopping && finished.len() >= self.params.beam_width {
                break;
            }
        }

        finished.extend(beam);
        finished
            .into_iter()
            .max_by(|a, b| a.score(penalty).total_cmp(&b.score(penalty)))
            .ok_or_else(|| TranslationError::Decode("beam search produced no hypothesis".to_string()))
    }
}
