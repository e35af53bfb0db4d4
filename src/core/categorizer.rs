//! core/categorizer.rs
//! Fixed-point h-categorizer solver.
//!
//! Recurrence: HC_{k+1}(a) = w(a) / (1 + Σ_{b attacks a} HC_k(b)).
//! Updates are synchronous (Jacobi): every new score is computed from a
//! frozen snapshot of the previous iteration, so results do not depend on
//! argument processing order. The denominator is 1 + a non-negative sum,
//! so the recurrence is defined for all non-negative weights.

use tracing::debug;

use crate::core::framework::{ArgumentSet, ResolvedIndex};
use crate::core::weights::Weights;
use crate::error::{Error, Result};

/// Solver parameters.
#[derive(Clone, Copy, Debug)]
pub struct CategorizerParams {
    /// Iteration cap; the solver may stop earlier on convergence.
    pub max_iter: u32,
    /// Convergence tolerance on the max component-wise score delta.
    pub epsilon: f64,
}

impl Default for CategorizerParams {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            epsilon: 1e-4,
        }
    }
}

impl CategorizerParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_iter < 1 {
            return Err(Error::InvalidParams("max_iter must be >= 1".into()));
        }
        if !(self.epsilon > 0.0) || !self.epsilon.is_finite() {
            return Err(Error::InvalidParams(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Converged (or iteration-capped) score vector, in argument-set order.
#[derive(Clone, Debug)]
pub struct Solution {
    pub scores: Vec<f64>,
    /// Iterations actually computed.
    pub iterations: u32,
    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,
}

impl Solution {
    /// Map-style access by label.
    pub fn get(&self, set: &ArgumentSet, label: &str) -> Option<f64> {
        set.index_of(label).map(|i| self.scores[i])
    }

    /// Score row in the set's column order, for matrix assembly.
    pub fn to_row(&self) -> Vec<f64> {
        self.scores.clone()
    }
}

/// Run the fixed-point iteration for one weight assignment.
pub fn solve(
    set: &ArgumentSet,
    index: &ResolvedIndex,
    weights: &Weights,
    params: CategorizerParams,
) -> Result<Solution> {
    params.validate()?;
    if index.len() != set.len() {
        return Err(Error::InvalidParams(format!(
            "attacker index covers {} arguments, set has {}",
            index.len(),
            set.len()
        )));
    }

    let n = set.len();
    let mut current = weights.to_vec();
    let mut next = vec![0.0f64; n];
    let mut iterations = 0u32;
    let mut converged = false;

    for _ in 0..params.max_iter {
        iterations += 1;
        let mut max_diff = 0.0f64;
        for a in 0..n {
            let sum: f64 = index.attackers_of(a).iter().map(|&b| current[b]).sum();
            next[a] = weights.get(a) / (1.0 + sum);
            let diff = (next[a] - current[a]).abs();
            if diff > max_diff {
                max_diff = diff;
            }
        }
        std::mem::swap(&mut current, &mut next);
        if max_diff < params.epsilon {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "categorizer solve finished");
    Ok(Solution {
        scores: current,
        iterations,
        converged,
    })
}
