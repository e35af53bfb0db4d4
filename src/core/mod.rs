//! Numerical engine: framework indexing, fixed-point solving, sampling.

pub mod categorizer;
pub mod framework;
pub mod matrix;
pub mod sampler;
pub mod weights;
