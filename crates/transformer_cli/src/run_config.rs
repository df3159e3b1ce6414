//! Run Configuration - resolved parameter set merged with run-level flags
//!
//! This is the value handed to the train/eval/predict drivers. It is written
//! next to the checkpoints as `run_config.json`.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use transformer_core::{ModelParams, ParamSet, ParamsError};

use crate::cli::Flags;
use crate::flags::{is_set, DistributionStrategy, Mode};

pub const RUN_CONFIG_FILE: &str = "run_config.json";

/// Log directory timestamps, e.g. `20191231-235959`.
const LOGDIR_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TpuConfig {
    pub name: String,
    pub zone: Option<String>,
    pub gcp_project: Option<String>,
    pub num_shards: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: Mode,
    pub param_set: ParamSet,
    pub model: ModelParams,

    // Locations
    pub data_dir: String,
    pub model_dir: String,
    pub log_dir: String,
    pub export_dir: Option<String>,
    pub vocab_file: Option<String>,
    pub init_weight_path: Option<String>,

    // Schedule
    pub batch_size: usize,
    pub train_epochs: Option<u32>,
    pub epochs_between_evals: u32,
    pub init_epoch: u32,
    pub steps_per_epoch: u64,
    pub validation_steps: u64,
    pub stop_threshold: Option<f64>,

    // BLEU
    pub bleu_source: Option<String>,
    pub bleu_ref: Option<String>,

    // Devices
    pub num_gpus: usize,
    pub distribution_strategy: DistributionStrategy,
    pub tpu: Option<TpuConfig>,
    pub num_parallel_calls: usize,
    pub use_synthetic_data: bool,
    pub all_reduce_alg: Option<String>,
}

impl RunConfig {
    /// Resolve the run configuration from validated flags.
    pub fn from_flags(flags: &Flags) -> std::result::Result<Self, ParamsError> {
        Self::from_flags_at(flags, Local::now())
    }

    /// Same as [`RunConfig::from_flags`] with an explicit clock for the log directory.
    pub fn from_flags_at(
        flags: &Flags,
        now: DateTime<Local>,
    ) -> std::result::Result<Self, ParamsError> {
        let base = &flags.base;
        let t = &flags.transformer;
        let on_tpu = flags.device.on_tpu();

        let mut model = t.param_set.params(base.num_gpus)?;
        model.use_tpu = on_tpu;
        model.static_batch = flags.effective_static_batch();

        let batch_size = base
            .batch_size
            .unwrap_or_else(|| model.default_batch_size_for(on_tpu));

        let timestamp = match t.init_logdir_timestamp.as_deref() {
            Some(ts) if !ts.is_empty() => ts.to_string(),
            _ => now.format(LOGDIR_TIMESTAMP_FORMAT).to_string(),
        };
        let log_dir = format!("{}/logs/{}", base.model_dir.trim_end_matches('/'), timestamp);

        let tpu = flags.device.tpu.as_ref().filter(|_| on_tpu).map(|name| TpuConfig {
            name: name.clone(),
            zone: flags.device.tpu_zone.clone(),
            gcp_project: flags.device.tpu_gcp_project.clone(),
            num_shards: flags.device.num_tpu_shards,
        });

        Ok(Self {
            mode: t.mode,
            param_set: t.param_set,
            model,
            data_dir: base.data_dir.clone(),
            model_dir: base.model_dir.clone(),
            log_dir,
            export_dir: base.export_dir.clone().filter(|d| !d.is_empty()),
            vocab_file: t.vocab_file.clone(),
            init_weight_path: t.init_weight_path.clone(),
            batch_size,
            train_epochs: base.train_epochs,
            epochs_between_evals: base.epochs_between_evals,
            init_epoch: t.init_epoch,
            steps_per_epoch: t.steps_per_epoch,
            validation_steps: t.validation_steps,
            stop_threshold: base.stop_threshold,
            bleu_source: t.bleu_source.clone(),
            bleu_ref: t.bleu_ref.clone(),
            num_gpus: base.num_gpus,
            distribution_strategy: base.distribution_strategy,
            tpu,
            num_parallel_calls: flags.performance.num_parallel_calls,
            use_synthetic_data: flags.performance.use_synthetic_data,
            all_reduce_alg: flags.performance.all_reduce_alg.clone(),
        })
    }

    /// BLEU is computed only when both files were given.
    pub fn computes_bleu(&self) -> bool {
        is_set(&self.bleu_source) && is_set(&self.bleu_ref)
    }

    /// Directories on Cloud Storage are not written by this process.
    pub fn model_dir_is_remote(&self) -> bool {
        self.model_dir.starts_with("gs://")
    }

    pub fn log_summary(&self) {
        info!("--- Transformer Run Configuration ---");
        info!("Mode:        {}", self.mode);
        info!(
            "Param set:   {} (hidden {}, layers {}, heads {}, filter {})",
            self.param_set,
            self.model.hidden_size,
            self.model.num_hidden_layers,
            self.model.num_heads,
            self.model.filter_size
        );
        info!("Batch size:  {} tokens (static: {})", self.batch_size, self.model.static_batch);
        info!(
            "Devices:     {} GPU(s), strategy {}",
            self.num_gpus, self.distribution_strategy
        );
        if let Some(tpu) = &self.tpu {
            info!("TPU:         {} ({} shards)", tpu.name, tpu.num_shards);
        }
        info!("Data dir:    {}", self.data_dir);
        info!("Model dir:   {}", self.model_dir);
        info!("Log dir:     {}", self.log_dir);
        if let Some(epochs) = self.train_epochs {
            info!(
                "Schedule:    {} epochs x {} steps (starting at epoch {})",
                epochs, self.steps_per_epoch, self.init_epoch
            );
        }
        if self.computes_bleu() {
            info!("BLEU:        enabled");
        }
        if let Some(dir) = &self.export_dir {
            info!("Export dir:  {}", dir);
        }
    }

    /// Write the configuration as pretty JSON into `dir`, creating it if needed.
    pub fn save_json(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let path = dir.join(RUN_CONFIG_FILE);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)?;

        info!("💾 Saved run configuration to {}", path.display());
        Ok(path)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid run configuration in {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;
    use transformer_core::model::presets::{BIG_MULTI_GPU_PARAMS, TINY_PARAMS};

    fn parse(args: &[&str]) -> Flags {
        let argv = std::iter::once("transformer").chain(args.iter().copied());
        Flags::try_parse_from(argv).expect("flags should parse")
    }

    fn fixed_clock() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2019, 6, 1, 12, 30, 5)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_batch_size_falls_back_to_param_set() -> anyhow::Result<()> {
        let config = RunConfig::from_flags_at(&parse(&["--mp", "tiny"]), fixed_clock())?;
        assert_eq!(config.batch_size, TINY_PARAMS.default_batch_size);
        assert_eq!(config.model, TINY_PARAMS);

        let config =
            RunConfig::from_flags_at(&parse(&["--mp", "tiny", "--bs", "64"]), fixed_clock())?;
        assert_eq!(config.batch_size, 64);
        Ok(())
    }

    #[test]
    fn test_multi_gpu_resolution() -> anyhow::Result<()> {
        let config = RunConfig::from_flags_at(&parse(&["--num_gpus", "4"]), fixed_clock())?;
        assert_eq!(config.model, BIG_MULTI_GPU_PARAMS);
        assert_eq!(config.num_gpus, 4);

        let err = RunConfig::from_flags_at(&parse(&["--mp", "tiny", "--ng", "2"]), fixed_clock())
            .unwrap_err();
        assert!(matches!(err, ParamsError::InvalidArgument { num_gpus: 2, .. }));
        Ok(())
    }

    #[test]
    fn test_tpu_forces_static_batch_and_tpu_batch() -> anyhow::Result<()> {
        let flags = parse(&[
            "--tpu",
            "node-1",
            "--tpu_zone",
            "us-central1-b",
            "--data_dir",
            "gs://b/data",
            "--model_dir",
            "gs://b/model",
        ]);
        let config = RunConfig::from_flags_at(&flags, fixed_clock())?;

        assert!(config.model.use_tpu);
        assert!(config.model.static_batch);
        assert_eq!(config.batch_size, 16384);
        assert!(config.model_dir_is_remote());

        let tpu = config.tpu.expect("tpu config");
        assert_eq!(tpu.name, "node-1");
        assert_eq!(tpu.zone.as_deref(), Some("us-central1-b"));
        assert_eq!(tpu.num_shards, 8);
        Ok(())
    }

    #[test]
    fn test_log_dir_timestamp() -> anyhow::Result<()> {
        let config = RunConfig::from_flags_at(&parse(&["--md", "/tmp/m/"]), fixed_clock())?;
        assert_eq!(config.log_dir, "/tmp/m/logs/20190601-123005");

        let config = RunConfig::from_flags_at(
            &parse(&["--md", "/tmp/m", "--ilt", "20180101-000000"]),
            fixed_clock(),
        )?;
        assert_eq!(config.log_dir, "/tmp/m/logs/20180101-000000");
        Ok(())
    }

    #[test]
    fn test_computes_bleu() -> anyhow::Result<()> {
        let config = RunConfig::from_flags_at(&parse(&[]), fixed_clock())?;
        assert!(!config.computes_bleu());

        let flags = parse(&["--bls", "a", "--blr", "b", "--vf", "v"]);
        assert!(RunConfig::from_flags_at(&flags, fixed_clock())?.computes_bleu());
        Ok(())
    }

    #[test]
    fn test_save_and_load_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model_dir = dir.path().join("model");
        let config = RunConfig::from_flags_at(&parse(&["--mp", "base"]), fixed_clock())?;

        let path = config.save_json(&model_dir)?;
        assert_eq!(path, model_dir.join(RUN_CONFIG_FILE));

        let loaded = RunConfig::load_json(&path)?;
        assert_eq!(loaded.param_set, config.param_set);
        assert_eq!(loaded.batch_size, config.batch_size);
        assert_eq!(loaded.log_dir, config.log_dir);
        assert_eq!(loaded.model.hidden_size, config.model.hidden_size);
        assert_eq!(
            loaded.model.learning_rate_warmup_steps,
            config.model.learning_rate_warmup_steps
        );

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(raw["param_set"], "base");
        assert_eq!(raw["mode"], "train");
        assert_eq!(raw["distribution_strategy"], "mirrored");
        Ok(())
    }
}
