//! Flags Module - Argument groups of the `transformer` binary
//!
//! - BaseArgs: directories, epochs, batch size, devices, export
//! - PerformanceArgs: input pipeline and all-reduce tuning
//! - BenchmarkArgs: benchmark logging
//! - DeviceArgs: TPU selection
//! - TransformerArgs: parameter set, mode, BLEU and warm-start options
//!
//! Long names are snake_case. Multi-letter short names are visible long aliases.

pub mod base;
pub mod benchmark;
pub mod device;
pub mod performance;
pub mod transformer;

pub use base::{BaseArgs, DistributionStrategy};
pub use benchmark::{BenchmarkArgs, BenchmarkLoggerType};
pub use device::DeviceArgs;
pub use performance::PerformanceArgs;
pub use transformer::{Mode, TransformerArgs};

/// Absl-style "is set": present and non-empty.
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
