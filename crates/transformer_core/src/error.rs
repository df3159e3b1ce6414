//! Parameter lookup errors

use thiserror::Error;

/// Result type alias for parameter-set lookups.
pub type Result<T> = std::result::Result<T, ParamsError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// The parameter set has no variant for the requested device count.
    #[error("Not valid params: param_set={param_set} num_gpus={num_gpus}")]
    InvalidArgument { param_set: String, num_gpus: usize },

    /// The name is not one of the known parameter sets.
    #[error("Unknown parameter set '{name}' (expected one of: tiny, base, big)")]
    UnknownParamSet { name: String },
}
