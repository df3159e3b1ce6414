//! Transformer command-line configuration
//!
//! Declares the flags of the `transformer` binary, checks cross-flag
//! consistency and resolves the run configuration handed to the
//! train/eval/predict drivers.

pub mod cli;
pub mod flags;
pub mod run_config;
pub mod validate;

pub use cli::Flags;
pub use run_config::RunConfig;
pub use validate::ValidationError;
