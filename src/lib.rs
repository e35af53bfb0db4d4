//! argoscope: fixed-point categorizer scores for weighted argumentation
//! frameworks, sampled over random weight draws.
//!
//! The pipeline is: build an [`ArgumentSet`] and attack relation, let the
//! [`Sampler`] draw seeded random weight vectors, solve each one to its
//! categorizer fixed point, and collect the score vectors into a
//! [`SampleMatrix`] for downstream geometry.

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::RunConfig;
pub use crate::core::categorizer::{solve, CategorizerParams, Solution};
pub use crate::core::framework::{ArgumentSet, Attack, AttackerIndex, ResolvedIndex};
pub use crate::core::matrix::SampleMatrix;
pub use crate::core::sampler::{sample, SampleParams, Sampler};
pub use crate::core::weights::Weights;
pub use crate::error::{Error, Result};
