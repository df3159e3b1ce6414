//! ModelParams - Transformer hyperparameter record

use serde::{Deserialize, Serialize};

/// Hyperparameters for one Transformer configuration.
///
/// Records are `Copy`: every lookup hands out its own value, so callers can
/// adjust fields (batch size, TPU switches) without touching the stored presets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    // Input
    /// Maximum number of tokens per batch of examples.
    pub default_batch_size: usize,
    pub default_batch_size_tpu: usize,
    /// Maximum number of tokens per example.
    pub max_length: usize,

    // Model
    pub initializer_gain: f64,
    pub vocab_size: usize,
    #[serde(alias = "hidden_dim")]
    pub hidden_size: usize,
    #[serde(alias = "num_layers")]
    pub num_hidden_layers: usize,
    pub num_heads: usize,
    /// Inner dimension of the feed-forward network.
    pub filter_size: usize,

    // Dropout (training only)
    pub layer_postprocess_dropout: f64,
    pub attention_dropout: f64,
    pub relu_dropout: f64,

    // Training
    pub label_smoothing: f64,
    pub learning_rate: f64,
    pub learning_rate_decay_rate: f64,
    pub learning_rate_warmup_steps: usize,

    // Adam
    pub optimizer_adam_beta1: f64,
    pub optimizer_adam_beta2: f64,
    pub optimizer_adam_epsilon: f64,

    // Prediction
    pub extra_decode_length: usize,
    pub beam_size: usize,
    /// Length normalization strength in beam search.
    pub alpha: f64,

    // Accelerator
    pub use_tpu: bool,
    pub static_batch: bool,
    pub allow_ffn_pad: bool,
}

impl ModelParams {
    /// Default tokens-per-batch for the target hardware.
    pub fn default_batch_size_for(&self, on_tpu: bool) -> usize {
        if on_tpu {
            self.default_batch_size_tpu
        } else {
            self.default_batch_size
        }
    }

    /// Per-head attention width.
    pub fn head_dim(&self) -> usize {
        self.hidden_size / self.num_heads
    }
}
