use crate::flags::{BaseArgs, BenchmarkArgs, DeviceArgs, PerformanceArgs, TransformerArgs};
use crate::validate::{self, ValidationError};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "transformer",
    author,
    version,
    about = "Train, evaluate and export the Transformer translation model",
    long_about = None
)]
pub struct Flags {
    #[command(flatten)]
    pub base: BaseArgs,

    #[command(flatten)]
    pub performance: PerformanceArgs,

    #[command(flatten)]
    pub benchmark: BenchmarkArgs,

    #[command(flatten)]
    pub device: DeviceArgs,

    #[command(flatten)]
    pub transformer: TransformerArgs,
}

impl Flags {
    /// Parse the process arguments and run every cross-flag validator.
    /// Exits with a usage error on failure.
    pub fn parse_validated() -> Self {
        match Self::try_parse_validated_from(std::env::args_os()) {
            Ok(flags) => flags,
            Err(e) => e.exit(),
        }
    }

    /// Like [`Flags::parse_validated`], but returns the error instead of exiting.
    pub fn try_parse_validated_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let flags = Self::try_parse_from(args)?;
        flags.validate().map_err(usage_error)?;
        Ok(flags)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate(self)
    }

    /// Static shapes are mandatory on TPU regardless of --static_batch.
    pub fn effective_static_batch(&self) -> bool {
        self.transformer.static_batch || self.device.on_tpu()
    }
}

/// Wrap a message in a clap usage error so it is reported like a parse failure.
pub fn usage_error(msg: impl std::fmt::Display) -> clap::Error {
    Flags::command().error(ErrorKind::ValueValidation, msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{BenchmarkLoggerType, DistributionStrategy, Mode};
    use transformer_core::ParamSet;

    #[test]
    fn test_command_is_well_formed() {
        Flags::command().debug_assert();
    }

    #[test]
    fn test_defaults() -> anyhow::Result<()> {
        let flags = Flags::try_parse_from(["transformer"])?;

        assert_eq!(flags.transformer.param_set, ParamSet::Big);
        assert_eq!(flags.transformer.mode, Mode::Train);
        assert!(!flags.transformer.static_batch);
        assert_eq!(flags.transformer.steps_per_epoch, 1000);
        assert_eq!(flags.transformer.init_epoch, 0);
        assert_eq!(flags.transformer.validation_steps, 64);
        assert!(flags.transformer.init_weight_path.is_none());
        assert!(flags.transformer.init_logdir_timestamp.is_none());
        assert!(flags.transformer.bleu_source.is_none());
        assert!(flags.transformer.bleu_ref.is_none());
        assert!(flags.transformer.vocab_file.is_none());

        assert_eq!(flags.base.data_dir, "/tmp/translate_ende");
        assert_eq!(flags.base.model_dir, "/tmp/transformer_model");
        assert_eq!(flags.base.batch_size, None);
        assert_eq!(flags.base.train_epochs, Some(10));
        assert_eq!(flags.base.num_gpus, 1);
        assert_eq!(
            flags.base.distribution_strategy,
            DistributionStrategy::Mirrored
        );
        assert_eq!(
            flags.benchmark.benchmark_logger_type,
            BenchmarkLoggerType::Base
        );
        assert_eq!(flags.device.num_tpu_shards, 8);
        assert!(flags.performance.num_parallel_calls >= 1);
        Ok(())
    }

    #[test]
    fn test_short_aliases() -> anyhow::Result<()> {
        let flags = Flags::try_parse_from([
            "transformer",
            "--mp",
            "tiny",
            "--sbe",
            "10",
            "--is",
            "2",
            "--iwp",
            "weights.ckpt",
            "--ilt",
            "20190101-000000",
            "--vs",
            "8",
            "--bls",
            "src.txt",
            "--blr",
            "ref.txt",
            "--vf",
            "vocab.ende",
        ])?;

        let t = &flags.transformer;
        assert_eq!(t.param_set, ParamSet::Tiny);
        assert_eq!(t.steps_per_epoch, 10);
        assert_eq!(t.init_epoch, 2);
        assert_eq!(t.init_weight_path.as_deref(), Some("weights.ckpt"));
        assert_eq!(t.init_logdir_timestamp.as_deref(), Some("20190101-000000"));
        assert_eq!(t.validation_steps, 8);
        assert_eq!(t.bleu_source.as_deref(), Some("src.txt"));
        assert_eq!(t.bleu_ref.as_deref(), Some("ref.txt"));
        assert_eq!(t.vocab_file.as_deref(), Some("vocab.ende"));
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_param_set() {
        let err = Flags::try_parse_from(["transformer", "--param_set", "huge"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_static_batch_forced_on_tpu() -> anyhow::Result<()> {
        let flags = Flags::try_parse_from(["transformer", "--tpu", "node-1"])?;
        assert!(!flags.transformer.static_batch);
        assert!(flags.effective_static_batch());

        let flags = Flags::try_parse_from(["transformer"])?;
        assert!(!flags.effective_static_batch());
        Ok(())
    }

    #[test]
    fn test_validation_failure_is_usage_error() {
        let err = Flags::try_parse_validated_from(["transformer", "--bleu_source", "src.txt"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err
            .to_string()
            .contains("Both or neither --bleu_source and --bleu_ref must be defined."));
    }
}
