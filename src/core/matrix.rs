//! core/matrix.rs
//! Row-major sample matrix: one row per weight draw, one column per argument.

use std::io::{self, Write};

/// Flat row-major f64 matrix. Rows are sampling iterations, columns follow
/// the argument-set order. Immutable once handed out by the sampler.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleMatrix {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl SampleMatrix {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            data: vec![0.0; n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.n_cols;
        &mut self.data[start..start + self.n_cols]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n_cols + j]
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.n_rows).map(|i| self.get(i, j)).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn column_min(&self, j: usize) -> f64 {
        (0..self.n_rows).map(|i| self.get(i, j)).fold(f64::INFINITY, f64::min)
    }

    pub fn column_max(&self, j: usize) -> f64 {
        (0..self.n_rows)
            .map(|i| self.get(i, j))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn column_mean(&self, j: usize) -> f64 {
        if self.n_rows == 0 {
            return f64::NAN;
        }
        self.column(j).iter().sum::<f64>() / self.n_rows as f64
    }

    /// Write the matrix as CSV, headers first.
    pub fn write_csv<W: Write>(&self, headers: &[String], out: &mut W) -> io::Result<()> {
        debug_assert_eq!(headers.len(), self.n_cols);
        writeln!(out, "{}", headers.join(","))?;
        for i in 0..self.n_rows {
            let row: Vec<String> = self.row(i).iter().map(|v| format!("{v}")).collect();
            writeln!(out, "{}", row.join(","))?;
        }
        Ok(())
    }
}
