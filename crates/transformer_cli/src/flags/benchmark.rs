//! Benchmark Arguments - benchmark run logging

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkLoggerType {
    /// Log benchmark results through the process logger
    #[default]
    #[value(alias = "BaseBenchmarkLogger")]
    Base,
    /// Write benchmark results under --benchmark_log_dir
    #[value(alias = "BenchmarkFileLogger")]
    File,
}

#[derive(Args, Debug, Clone)]
pub struct BenchmarkArgs {
    /// The type of benchmark logger to use.
    #[arg(
        long = "benchmark_logger_type",
        visible_alias = "blt",
        value_enum,
        default_value_t = BenchmarkLoggerType::Base
    )]
    pub benchmark_logger_type: BenchmarkLoggerType,

    /// The location of the benchmark logging.
    #[arg(long = "benchmark_log_dir", visible_alias = "bld")]
    pub benchmark_log_dir: Option<String>,

    /// Identifier of the benchmark test, used to group runs.
    #[arg(long = "benchmark_test_id", visible_alias = "bti")]
    pub benchmark_test_id: Option<String>,
}
