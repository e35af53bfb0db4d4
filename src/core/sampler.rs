//! core/sampler.rs
//! Monte Carlo sampling of categorizer score vectors under random weights.
//!
//! One seeded generator drives the whole run: each iteration draws |A|
//! uniforms in [0, 1) in argument order, applies any controlled overrides
//! *after* the draw (the draw is consumed either way, so runs with and
//! without pinning share the same random stream), solves, and writes one
//! matrix row. The parallel path pre-generates every row from the same
//! stream and farms out only the solving, so it is bit-identical to the
//! sequential path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::core::categorizer::{solve, CategorizerParams, Solution};
use crate::core::framework::{ArgumentSet, Attack, AttackerIndex, ResolvedIndex};
use crate::core::matrix::SampleMatrix;
use crate::core::weights::Weights;
use crate::error::{Error, Result};

/// Sampling run parameters.
#[derive(Clone, Copy, Debug)]
pub struct SampleParams {
    /// Solver convergence tolerance.
    pub epsilon: f64,
    /// Solver iteration cap.
    pub max_iter: u32,
    /// Number of random weight vectors to draw.
    pub n_samples: usize,
    /// Seed for the weight generator; fully determines the run.
    pub seed: u64,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            max_iter: 1000,
            n_samples: 10_000,
            seed: 42,
        }
    }
}

impl SampleParams {
    fn categorizer(&self) -> CategorizerParams {
        CategorizerParams {
            max_iter: self.max_iter,
            epsilon: self.epsilon,
        }
    }
}

/// Prepared sampling run: attacker index resolved once, controlled
/// arguments validated up front.
pub struct Sampler {
    set: ArgumentSet,
    index: ResolvedIndex,
    params: SampleParams,
    // (argument index, pinned weight), sorted by index.
    controlled: Vec<(usize, f64)>,
    stop: Option<Arc<AtomicBool>>,
}

impl Sampler {
    pub fn new(
        set: &ArgumentSet,
        attacks: &[Attack],
        controlled: &HashMap<String, f64>,
        params: SampleParams,
    ) -> Result<Self> {
        if set.is_empty() {
            return Err(Error::EmptyArgumentSet);
        }
        params.categorizer().validate()?;

        let index = AttackerIndex::build(set, attacks).resolve(set)?;

        let mut pinned = Vec::with_capacity(controlled.len());
        for (label, &value) in controlled {
            let idx = set
                .index_of(label)
                .ok_or_else(|| Error::UnknownArgument(label.clone()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidWeight {
                    argument: label.clone(),
                    value,
                });
            }
            pinned.push((idx, value));
        }
        pinned.sort_by_key(|&(idx, _)| idx);

        Ok(Self {
            set: set.clone(),
            index,
            params,
            controlled: pinned,
            stop: None,
        })
    }

    /// Cooperative cancellation: the flag is checked between iterations and
    /// aborts the run with [`Error::Cancelled`].
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Draw one weight row and apply the controlled overrides.
    fn draw_row(&self, rng: &mut StdRng) -> Vec<f64> {
        let mut row: Vec<f64> = (0..self.set.len()).map(|_| rng.random::<f64>()).collect();
        for &(idx, value) in &self.controlled {
            row[idx] = value;
        }
        row
    }

    fn solve_row(&self, row: Vec<f64>) -> Result<Solution> {
        let weights = Weights::from_vec(&self.set, row)?;
        solve(&self.set, &self.index, &weights, self.params.categorizer())
    }

    /// Run sequentially, one row at a time.
    pub fn run(&self) -> Result<SampleMatrix> {
        let n = self.set.len();
        debug!(
            n_samples = self.params.n_samples,
            n_args = n,
            seed = self.params.seed,
            "sampling run start"
        );

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut matrix = SampleMatrix::zeros(self.params.n_samples, n);
        let mut capped = 0usize;

        for i in 0..self.params.n_samples {
            if self.stopped() {
                return Err(Error::Cancelled);
            }
            let solution = self.solve_row(self.draw_row(&mut rng))?;
            if !solution.converged {
                capped += 1;
            }
            matrix.row_mut(i).copy_from_slice(&solution.scores);
        }

        if capped > 0 {
            warn!(
                rows = capped,
                max_iter = self.params.max_iter,
                "rows hit the iteration cap without converging"
            );
        }
        Ok(matrix)
    }

    /// Run with a worker pool. Draws are pre-generated from the single
    /// seeded stream, so the output matches [`Sampler::run`] exactly.
    pub fn run_parallel(&self, workers: usize) -> Result<SampleMatrix> {
        if workers <= 1 || self.params.n_samples <= 1 {
            return self.run();
        }

        let n = self.set.len();
        debug!(
            n_samples = self.params.n_samples,
            n_args = n,
            workers,
            seed = self.params.seed,
            "parallel sampling run start"
        );

        // Draw phase: sequential, to preserve the exact random stream.
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut rows = Vec::with_capacity(self.params.n_samples);
        for _ in 0..self.params.n_samples {
            rows.push(self.draw_row(&mut rng));
        }

        let mut matrix = SampleMatrix::zeros(self.params.n_samples, n);
        let mut capped = 0usize;

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, Vec<f64>)>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<Result<(usize, Solution)>>();

        std::thread::scope(|scope| -> Result<()> {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    while let Ok((i, row)) = job_rx.recv() {
                        let res = self.solve_row(row).map(|solution| (i, solution));
                        if result_tx.send(res).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(result_tx);

            let mut sent = 0usize;
            let mut cancelled = false;
            for (i, row) in rows.into_iter().enumerate() {
                if self.stopped() {
                    cancelled = true;
                    break;
                }
                // Workers only exit once job_tx is dropped below.
                job_tx
                    .send((i, row))
                    .map_err(|_| Error::InvalidParams("worker pool shut down early".into()))?;
                sent += 1;
            }
            drop(job_tx);
            if cancelled {
                return Err(Error::Cancelled);
            }

            for _ in 0..sent {
                let (i, solution) = result_rx
                    .recv()
                    .map_err(|_| Error::InvalidParams("worker pool shut down early".into()))??;
                if !solution.converged {
                    capped += 1;
                }
                matrix.row_mut(i).copy_from_slice(&solution.scores);
            }
            Ok(())
        })?;

        if capped > 0 {
            warn!(
                rows = capped,
                max_iter = self.params.max_iter,
                "rows hit the iteration cap without converging"
            );
        }
        Ok(matrix)
    }
}

/// One-shot sampling run: build, validate, and run sequentially.
pub fn sample(
    set: &ArgumentSet,
    attacks: &[Attack],
    controlled: &HashMap<String, f64>,
    params: SampleParams,
) -> Result<SampleMatrix> {
    Sampler::new(set, attacks, controlled, params)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params(n_samples: usize) -> SampleParams {
        SampleParams {
            n_samples,
            ..SampleParams::default()
        }
    }

    #[test]
    fn matrix_shape_matches_request() {
        let set = ArgumentSet::new(["A", "B", "C"]).unwrap();
        let attacks = [Attack::new("B", "A")];
        let m = sample(&set, &attacks, &HashMap::new(), small_params(25)).unwrap();
        assert_eq!(m.n_rows(), 25);
        assert_eq!(m.n_cols(), 3);
    }

    #[test]
    fn zero_samples_gives_an_empty_matrix() {
        let set = ArgumentSet::new(["A"]).unwrap();
        let m = sample(&set, &[], &HashMap::new(), small_params(0)).unwrap();
        assert_eq!(m.n_rows(), 0);
        assert_eq!(m.n_cols(), 1);
    }

    #[test]
    fn empty_argument_set_is_rejected() {
        let set = ArgumentSet::new(Vec::<String>::new()).unwrap();
        let err = sample(&set, &[], &HashMap::new(), small_params(10)).unwrap_err();
        assert!(matches!(err, Error::EmptyArgumentSet));
    }

    #[test]
    fn unknown_controlled_argument_is_rejected() {
        let set = ArgumentSet::new(["A"]).unwrap();
        let controlled = HashMap::from([("Z".to_string(), 0.5)]);
        let err = sample(&set, &[], &controlled, small_params(10)).unwrap_err();
        assert!(matches!(err, Error::UnknownArgument(l) if l == "Z"));
    }

    #[test]
    fn unattacked_scores_stay_in_unit_interval() {
        // Unattacked arguments keep their draw, which lives in [0, 1).
        let set = ArgumentSet::new(["A", "B"]).unwrap();
        let m = sample(&set, &[], &HashMap::new(), small_params(200)).unwrap();
        for &v in m.as_slice() {
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn stop_flag_cancels_the_run() {
        let set = ArgumentSet::new(["A", "B"]).unwrap();
        let stop = Arc::new(AtomicBool::new(true));
        let sampler = Sampler::new(&set, &[], &HashMap::new(), small_params(100))
            .unwrap()
            .with_stop_flag(stop);
        assert!(matches!(sampler.run().unwrap_err(), Error::Cancelled));
        assert!(matches!(
            sampler.run_parallel(4).unwrap_err(),
            Error::Cancelled
        ));
    }
}
