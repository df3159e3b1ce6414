//! Base Arguments - directories, epochs, batch size and devices

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How work is spread over the available devices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStrategy {
    /// No distribution strategy
    Off,
    /// A single device
    #[value(name = "one_device")]
    OneDevice,
    /// Synchronous replication over local GPUs
    #[default]
    Mirrored,
    #[value(name = "parameter_server")]
    ParameterServer,
}

impl DistributionStrategy {
    /// Whether the strategy can drive more than one device.
    pub fn supports_multiple_devices(&self) -> bool {
        !matches!(
            self,
            DistributionStrategy::Off | DistributionStrategy::OneDevice
        )
    }
}

impl fmt::Display for DistributionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistributionStrategy::Off => "off",
            DistributionStrategy::OneDevice => "one_device",
            DistributionStrategy::Mirrored => "mirrored",
            DistributionStrategy::ParameterServer => "parameter_server",
        };
        f.write_str(name)
    }
}

#[derive(Args, Debug, Clone)]
pub struct BaseArgs {
    /// The location of the input data.
    #[arg(long = "data_dir", visible_alias = "dd", default_value = "/tmp/translate_ende")]
    pub data_dir: String,

    /// The location of the model checkpoint files.
    #[arg(
        long = "model_dir",
        visible_alias = "md",
        default_value = "/tmp/transformer_model"
    )]
    pub model_dir: String,

    /// If set, model_dir will be removed if it exists.
    #[arg(long = "clean", action)]
    pub clean: bool,

    /// The number of epochs used to train.
    #[arg(long = "train_epochs", visible_alias = "te", default_value = "10")]
    pub train_epochs: Option<u32>,

    /// The number of training epochs to run between evaluations.
    #[arg(long = "epochs_between_evals", visible_alias = "ebe", default_value_t = 1)]
    pub epochs_between_evals: u32,

    /// Stop training once the evaluation metric reaches this threshold.
    #[arg(long = "stop_threshold", visible_alias = "st")]
    pub stop_threshold: Option<f64>,

    /// Batch size for training and evaluation. Defaults to the parameter set's batch size.
    #[arg(long = "batch_size", visible_alias = "bs")]
    pub batch_size: Option<usize>,

    /// How many GPUs to use at each worker.
    #[arg(long = "num_gpus", visible_alias = "ng", default_value_t = 1)]
    pub num_gpus: usize,

    /// Directory to export the trained model to (SavedModel-style).
    #[arg(long = "export_dir", visible_alias = "ed")]
    pub export_dir: Option<String>,

    /// The distribution strategy to use.
    #[arg(
        long = "distribution_strategy",
        visible_alias = "ds",
        value_enum,
        default_value_t = DistributionStrategy::Mirrored
    )]
    pub distribution_strategy: DistributionStrategy,
}
