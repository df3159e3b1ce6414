//! Model Module - Transformer hyperparameters
//!
//! - ModelParams: the hyperparameter record consumed by the train/eval/predict drivers
//! - ParamSet: the closed set of named presets (tiny, base, big)
//! - get_model_params: resolves a preset name and device count to a record

pub mod params;
pub mod presets;

pub use params::ModelParams;
pub use presets::{get_model_params, ParamSet};
