//! Cross-flag validators
//!
//! Each validator inspects several flags at once and rejects inconsistent
//! combinations. They run in declaration order after parsing; the first
//! failure aborts startup.

use crate::cli::Flags;
use crate::flags::{is_set, DistributionStrategy, Mode};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("--train_epochs must be defined in train mode")]
    TrainEpochsRequired,

    #[error("Both or neither --bleu_source and --bleu_ref must be defined.")]
    BleuFilesMismatch,

    #[error("--vocab_file must be defined if --bleu_source and --bleu_ref are defined.")]
    BleuVocabFileRequired,

    #[error("--vocab_file must be defined if --export_dir is set.")]
    ExportVocabFileRequired,

    #[error("--{flag} must be a Cloud Storage path (gs://...) when running on TPU, got '{value}'")]
    CloudStorageRequired { flag: &'static str, value: String },

    #[error(
        "--distribution_strategy={strategy} cannot be used with --num_gpus={num_gpus}; \
         use mirrored or parameter_server for more than one GPU"
    )]
    StrategyDeviceMismatch {
        strategy: DistributionStrategy,
        num_gpus: usize,
    },
}

type Validator = fn(&Flags) -> Result<(), ValidationError>;

/// Registered validators, in the order they run.
pub const VALIDATORS: &[(&str, Validator)] = &[
    ("train_limits", check_train_limits),
    ("bleu_files", check_bleu_files),
    ("bleu_vocab_file", check_bleu_vocab_file),
    ("export_vocab_file", check_export_vocab_file),
    ("cloud_storage", check_cloud_storage),
    ("distribution_strategy", check_distribution_strategy),
];

pub fn validate(flags: &Flags) -> Result<(), ValidationError> {
    for (name, check) in VALIDATORS {
        if let Err(e) = check(flags) {
            tracing::debug!("Flag validator '{}' rejected the configuration: {}", name, e);
            return Err(e);
        }
    }
    Ok(())
}

/// Training needs a positive epoch count.
pub fn check_train_limits(flags: &Flags) -> Result<(), ValidationError> {
    if flags.transformer.mode == Mode::Train && !flags.base.train_epochs.is_some_and(|n| n > 0) {
        return Err(ValidationError::TrainEpochsRequired);
    }
    Ok(())
}

pub fn check_bleu_files(flags: &Flags) -> Result<(), ValidationError> {
    let t = &flags.transformer;
    if t.bleu_source.is_some() != t.bleu_ref.is_some() {
        return Err(ValidationError::BleuFilesMismatch);
    }
    Ok(())
}

pub fn check_bleu_vocab_file(flags: &Flags) -> Result<(), ValidationError> {
    let t = &flags.transformer;
    if is_set(&t.bleu_source) && is_set(&t.bleu_ref) && t.vocab_file.is_none() {
        return Err(ValidationError::BleuVocabFileRequired);
    }
    Ok(())
}

pub fn check_export_vocab_file(flags: &Flags) -> Result<(), ValidationError> {
    if is_set(&flags.base.export_dir) && flags.transformer.vocab_file.is_none() {
        return Err(ValidationError::ExportVocabFileRequired);
    }
    Ok(())
}

/// TPU workers cannot reach local disks: every directory must live in GCS.
pub fn check_cloud_storage(flags: &Flags) -> Result<(), ValidationError> {
    if !flags.device.on_tpu() {
        return Ok(());
    }

    let dirs = [
        ("data_dir", Some(&flags.base.data_dir)),
        ("model_dir", Some(&flags.base.model_dir)),
        ("export_dir", flags.base.export_dir.as_ref()),
    ];
    for (flag, value) in dirs {
        if let Some(value) = value {
            if !value.starts_with("gs://") {
                return Err(ValidationError::CloudStorageRequired {
                    flag,
                    value: value.clone(),
                });
            }
        }
    }
    Ok(())
}

pub fn check_distribution_strategy(flags: &Flags) -> Result<(), ValidationError> {
    let strategy = flags.base.distribution_strategy;
    let num_gpus = flags.base.num_gpus;
    if num_gpus > 1 && !strategy.supports_multiple_devices() {
        return Err(ValidationError::StrategyDeviceMismatch { strategy, num_gpus });
    }
    Ok(())
}
