//! Parameter Set Presets - Stored hyperparameter tables
//!
//! Single-device presets are looked up by name. Runs on more than one device
//! use the dedicated multi-GPU records, which only exist for `base` and `big`.
//! Multi-GPU records never change shape-defining fields (hidden size, heads).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::params::ModelParams;
use crate::error::{ParamsError, Result};

pub const BASE_PARAMS: ModelParams = ModelParams {
    default_batch_size: 2048,
    default_batch_size_tpu: 32768,
    max_length: 256,

    initializer_gain: 1.0,
    vocab_size: 33708,
    hidden_size: 512,
    num_hidden_layers: 6,
    num_heads: 8,
    filter_size: 2048,

    layer_postprocess_dropout: 0.1,
    attention_dropout: 0.1,
    relu_dropout: 0.1,

    label_smoothing: 0.1,
    learning_rate: 2.0,
    learning_rate_decay_rate: 1.0,
    learning_rate_warmup_steps: 16000,

    optimizer_adam_beta1: 0.9,
    optimizer_adam_beta2: 0.997,
    optimizer_adam_epsilon: 1e-9,

    extra_decode_length: 50,
    beam_size: 4,
    alpha: 0.6,

    use_tpu: false,
    static_batch: false,
    allow_ffn_pad: true,
};

/// Smaller batch than BASE on TPU due to memory limits.
pub const BIG_PARAMS: ModelParams = ModelParams {
    default_batch_size: 4096,
    default_batch_size_tpu: 16384,
    hidden_size: 1024,
    filter_size: 4096,
    num_heads: 16,
    ..BASE_PARAMS
};

pub const TINY_PARAMS: ModelParams = ModelParams {
    default_batch_size: 1024,
    default_batch_size_tpu: 1024,
    hidden_size: 32,
    num_heads: 4,
    filter_size: 256,
    ..BASE_PARAMS
};

pub const BASE_MULTI_GPU_PARAMS: ModelParams = ModelParams {
    learning_rate_warmup_steps: 8000,
    ..BASE_PARAMS
};

pub const BIG_MULTI_GPU_PARAMS: ModelParams = ModelParams {
    layer_postprocess_dropout: 0.3,
    learning_rate_warmup_steps: 8000,
    ..BIG_PARAMS
};

/// Named parameter sets
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSet {
    /// Small model for tests and smoke runs
    Tiny,
    Base,
    /// Larger batch, embedding/hidden size and filter size
    #[default]
    Big,
}

impl ParamSet {
    pub const ALL: [ParamSet; 3] = [ParamSet::Tiny, ParamSet::Base, ParamSet::Big];

    pub fn name(&self) -> &'static str {
        match self {
            ParamSet::Tiny => "tiny",
            ParamSet::Base => "base",
            ParamSet::Big => "big",
        }
    }

    /// Resolve this set for a run on `num_gpus` devices.
    pub fn params(self, num_gpus: usize) -> Result<ModelParams> {
        if num_gpus > 1 {
            return match self {
                ParamSet::Big => Ok(BIG_MULTI_GPU_PARAMS),
                ParamSet::Base => Ok(BASE_MULTI_GPU_PARAMS),
                ParamSet::Tiny => Err(ParamsError::InvalidArgument {
                    param_set: self.name().to_string(),
                    num_gpus,
                }),
            };
        }
        Ok(self.single_device_params())
    }

    fn single_device_params(self) -> ModelParams {
        match self {
            ParamSet::Tiny => TINY_PARAMS,
            ParamSet::Base => BASE_PARAMS,
            ParamSet::Big => BIG_PARAMS,
        }
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamSet {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self> {
        ParamSet::ALL
            .into_iter()
            .find(|set| set.name() == s)
            .ok_or_else(|| ParamsError::UnknownParamSet {
                name: s.to_string(),
            })
    }
}

/// Gets the predefined model params for `param_set` on `num_gpus` devices.
///
/// With more than one device only `base` and `big` resolve; any other name
/// is an invalid argument. Otherwise an unrecognized name is a lookup error.
pub fn get_model_params(param_set: &str, num_gpus: usize) -> Result<ModelParams> {
    if num_gpus > 1 {
        let set = param_set
            .parse::<ParamSet>()
            .map_err(|_| ParamsError::InvalidArgument {
                param_set: param_set.to_string(),
                num_gpus,
            })?;
        tracing::debug!("Using multi-GPU params for '{}' ({} GPUs)", set, num_gpus);
        return set.params(num_gpus);
    }

    let set = param_set.parse::<ParamSet>()?;
    set.params(num_gpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrips_names() {
        for set in ParamSet::ALL {
            assert_eq!(set.name().parse::<ParamSet>(), Ok(set));
            assert_eq!(set.to_string(), set.name());
        }
        assert!("BIG".parse::<ParamSet>().is_err());
    }

    #[test]
    fn test_default_is_big() {
        assert_eq!(ParamSet::default(), ParamSet::Big);
    }

    #[test]
    fn test_multi_gpu_keeps_model_shape() {
        for (single, multi) in [
            (BASE_PARAMS, BASE_MULTI_GPU_PARAMS),
            (BIG_PARAMS, BIG_MULTI_GPU_PARAMS),
        ] {
            assert_eq!(single.hidden_size, multi.hidden_size);
            assert_eq!(single.num_heads, multi.num_heads);
            assert_eq!(single.filter_size, multi.filter_size);
            assert_eq!(single.num_hidden_layers, multi.num_hidden_layers);
            assert_eq!(multi.learning_rate_warmup_steps, 8000);
        }
    }

    #[test]
    fn test_tiny_overrides_base() {
        assert_eq!(TINY_PARAMS.hidden_size, 32);
        assert_eq!(TINY_PARAMS.num_heads, 4);
        assert_eq!(TINY_PARAMS.filter_size, 256);
        assert_eq!(TINY_PARAMS.vocab_size, BASE_PARAMS.vocab_size);
        assert_eq!(TINY_PARAMS.beam_size, BASE_PARAMS.beam_size);
    }

    #[test]
    fn test_zero_gpus_uses_single_device_table() {
        assert_eq!(ParamSet::Tiny.params(0), Ok(TINY_PARAMS));
        assert_eq!(ParamSet::Big.params(0), Ok(BIG_PARAMS));
    }
}
