//! Transformer Core
//!
//! Hyperparameter tables for the Transformer translation model.
//! Maps a named parameter set and a device count to a concrete `ModelParams` record.

pub mod error;
pub mod model;

pub use error::{ParamsError, Result};
pub use model::{get_model_params, ModelParams, ParamSet};
