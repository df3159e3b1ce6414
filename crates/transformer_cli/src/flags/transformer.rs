//! Transformer Arguments - model selection, run mode, BLEU and warm start

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use transformer_core::ParamSet;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Train,
    Eval,
    Predict,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Train => "train",
            Mode::Eval => "eval",
            Mode::Predict => "predict",
        };
        f.write_str(name)
    }
}

#[derive(Args, Debug, Clone)]
pub struct TransformerArgs {
    /// Parameter set to use when creating and training the model. The
    /// parameters define the input shape (batch size and max length), model
    /// configuration (size of embedding, # of hidden layers, etc.), and various
    /// other settings. The big parameter set increases the default batch size,
    /// embedding/hidden size, and filter size.
    #[arg(
        long = "param_set",
        visible_alias = "mp",
        value_enum,
        default_value_t = ParamSet::Big
    )]
    pub param_set: ParamSet,

    /// Whether the batches in the dataset should have static shapes. Dynamic
    /// shapes group inputs to minimize padding tokens. When the input shape must
    /// be static (e.g. running on TPU) this setting is ignored and static
    /// batching is always used.
    #[arg(long = "static_batch", action)]
    pub static_batch: bool,

    /// The number of training steps for each epoch.
    #[arg(long = "steps_per_epoch", visible_alias = "sbe", default_value_t = 1000)]
    pub steps_per_epoch: u64,

    /// The number of initial epoch for training.
    #[arg(long = "init_epoch", visible_alias = "is", default_value_t = 0)]
    pub init_epoch: u32,

    /// The initial model weights to load.
    #[arg(long = "init_weight_path", visible_alias = "iwp")]
    pub init_weight_path: Option<String>,

    /// The initial timestamp for logdir.
    #[arg(long = "init_logdir_timestamp", visible_alias = "ilt")]
    pub init_logdir_timestamp: Option<String>,

    /// The number of steps used in validation.
    #[arg(long = "validation_steps", visible_alias = "vs", default_value_t = 64)]
    pub validation_steps: u64,

    /// Path to source file containing text to translate when calculating the
    /// official BLEU score. Both --bleu_source and --bleu_ref must be set. Use
    /// --stop_threshold to stop training based on the uncased BLEU score.
    #[arg(long = "bleu_source", visible_alias = "bls")]
    pub bleu_source: Option<String>,

    /// Path to the reference translations used when calculating the official
    /// BLEU score. Both --bleu_source and --bleu_ref must be set.
    #[arg(long = "bleu_ref", visible_alias = "blr")]
    pub bleu_ref: Option<String>,

    /// Path to subtoken vocabulary file. If the training data was downloaded and
    /// encoded with the data tools, look in data_dir to find the vocab file.
    #[arg(long = "vocab_file", visible_alias = "vf")]
    pub vocab_file: Option<String>,

    /// mode: train, eval, or predict
    #[arg(long = "mode", value_enum, default_value_t = Mode::Train)]
    pub mode: Mode,
}
