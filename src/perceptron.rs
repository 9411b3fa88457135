//! Single-layer threshold unit trained with the classic perceptron rule.
//!
//! There is no separate bias term: append a constant `1.0` column to every
//! input (as [`crate::train::nand_samples`] does) and the last weight acts as
//! the bias.

use tracing::{debug, info};

use crate::activation::heaviside;
use crate::error::{NnError, Result};

/// Output returned by the step function when the weighted sum is exactly zero.
const STEP_AT_ZERO: f64 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    weights: Vec<f64>,
    eta: f64,
}

impl Perceptron {
    /// Zero-initialized perceptron over `inputs` features.
    pub fn new(inputs: usize, eta: f64) -> Result<Perceptron> {
        if inputs == 0 {
            return Err(NnError::InvalidDimension { rows: 1, cols: 0 });
        }
        debug!(inputs, eta, "initialized perceptron");
        Ok(Perceptron { weights: vec![0.0; inputs], eta })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// `heaviside(w · x)`.
    pub fn predict(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.weights.len() {
            return Err(NnError::LengthMismatch {
                what: "input",
                expected: self.weights.len(),
                actual: x.len(),
            });
        }
        let z: f64 = self.weights.iter().zip(x.iter()).map(|(w, x)| w * x).sum();
        Ok(heaviside(z, STEP_AT_ZERO))
    }

    pub fn predict_all(&self, xs: &[Vec<f64>]) -> Result<Vec<f64>> {
        xs.iter().map(|x| self.predict(x)).collect()
    }

    /// Runs `epochs` passes over the samples in order, applying
    /// `w += (y - y_pred) * eta * x` after each one.
    ///
    /// Returns the number of epochs actually run: training stops early once
    /// a full pass makes no mistakes.
    pub fn fit(&mut self, xs: &[Vec<f64>], ys: &[f64], epochs: usize) -> Result<usize> {
        if xs.is_empty() {
            return Err(NnError::EmptyTrainingSet);
        }
        if xs.len() != ys.len() {
            return Err(NnError::LengthMismatch {
                what: "labels",
                expected: xs.len(),
                actual: ys.len(),
            });
        }

        for epoch in 1..=epochs {
            let mut mistakes = 0;
            for (x, &y) in xs.iter().zip(ys.iter()) {
                let error = y - self.predict(x)?;
                if error != 0.0 {
                    mistakes += 1;
                    for (w, xi) in self.weights.iter_mut().zip(x.iter()) {
                        *w += error * self.eta * xi;
                    }
                }
            }
            debug!(epoch, mistakes, "perceptron epoch");
            if mistakes == 0 {
                info!(epoch, weights = ?self.weights, "perceptron converged");
                return Ok(epoch);
            }
        }

        Ok(epochs)
    }
}
