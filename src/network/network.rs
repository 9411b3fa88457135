use rand::Rng;
use tracing::debug;

use crate::activation::{dsigmoid, sigmoid};
use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// Step size applied to every gradient.
pub const LEARNING_RATE: f64 = 0.1;

/// A fully connected input → hidden → output network with sigmoid units.
///
/// Parameters live in four matrices owned by the network:
/// - `weights_ih` — `hidden x input`
/// - `weights_ho` — `output x hidden`
/// - `bias_h`     — `hidden x 1`
/// - `bias_o`     — `output x 1`
///
/// Only [`NeuralNetwork::train`] mutates them.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    weights_ih: Matrix,
    weights_ho: Matrix,
    bias_h: Matrix,
    bias_o: Matrix,
    learning_rate: f64,
}

/// Activations produced by one forward pass, kept for backprop.
struct Forward {
    inputs: Matrix,
    hidden: Matrix,
    outputs: Matrix,
}

impl NeuralNetwork {
    /// Builds a network with every weight and bias drawn uniformly from [-1, 1].
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize) -> Result<NeuralNetwork> {
        NeuralNetwork::with_rng(input_nodes, hidden_nodes, output_nodes, &mut rand::thread_rng())
    }

    /// Same as [`NeuralNetwork::new`] but draws initial parameters from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        rng: &mut R,
    ) -> Result<NeuralNetwork> {
        let mut weights_ih = Matrix::new(hidden_nodes, input_nodes)?;
        let mut weights_ho = Matrix::new(output_nodes, hidden_nodes)?;
        weights_ih.randomize_with(rng);
        weights_ho.randomize_with(rng);

        let mut bias_h = Matrix::new(hidden_nodes, 1)?;
        let mut bias_o = Matrix::new(output_nodes, 1)?;
        bias_h.randomize_with(rng);
        bias_o.randomize_with(rng);

        debug!(input_nodes, hidden_nodes, output_nodes, "initialized network");

        Ok(NeuralNetwork {
            input_size: input_nodes,
            hidden_size: hidden_nodes,
            output_size: output_nodes,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
            learning_rate: LEARNING_RATE,
        })
    }

    /// Runs inference on one example. Parameters are left untouched.
    pub fn feed_forward(&self, input_array: &[f64]) -> Result<Vec<f64>> {
        check_len("input", self.input_size, input_array.len())?;
        Ok(self.forward(input_array)?.outputs.to_array())
    }

    /// One step of online gradient descent on a single labelled example.
    ///
    /// Both lengths are validated before anything is touched, so an `Err`
    /// leaves the network exactly as it was.
    pub fn train(&mut self, input_array: &[f64], target_array: &[f64]) -> Result<()> {
        check_len("input", self.input_size, input_array.len())?;
        check_len("target", self.output_size, target_array.len())?;

        let Forward { inputs, hidden, outputs } = self.forward(input_array)?;
        let targets = Matrix::from_array(target_array)?;

        // error = targets - outputs
        let output_errors = Matrix::subtract(&targets, &outputs)?;

        // outputs are post-sigmoid, so dsigmoid applies directly
        let mut output_gradient = outputs.mapped(dsigmoid);
        output_gradient.hadamard(&output_errors)?;
        output_gradient.scale(self.learning_rate);

        let weight_ho_delta = Matrix::multiply(&output_gradient, &hidden.transpose())?;

        // Must see weights_ho before this step's update.
        let hidden_errors = Matrix::multiply(&self.weights_ho.transpose(), &output_errors)?;

        let mut hidden_gradient = hidden.mapped(dsigmoid);
        hidden_gradient.hadamard(&hidden_errors)?;
        hidden_gradient.scale(self.learning_rate);

        let weight_ih_delta = Matrix::multiply(&hidden_gradient, &inputs.transpose())?;

        self.weights_ho.add(&weight_ho_delta)?;
        self.bias_o.add(&output_gradient)?;
        self.weights_ih.add(&weight_ih_delta)?;
        self.bias_h.add(&hidden_gradient)?;

        Ok(())
    }

    fn forward(&self, input_array: &[f64]) -> Result<Forward> {
        let inputs = Matrix::from_array(input_array)?;

        let mut hidden = Matrix::multiply(&self.weights_ih, &inputs)?;
        hidden.add(&self.bias_h)?;
        hidden.apply_in_place(sigmoid);

        let mut outputs = Matrix::multiply(&self.weights_ho, &hidden)?;
        outputs.add(&self.bias_o)?;
        outputs.apply_in_place(sigmoid);

        Ok(Forward { inputs, hidden, outputs })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn weights_ih(&self) -> &Matrix {
        &self.weights_ih
    }

    pub fn weights_ho(&self) -> &Matrix {
        &self.weights_ho
    }

    pub fn bias_h(&self) -> &Matrix {
        &self.bias_h
    }

    pub fn bias_o(&self) -> &Matrix {
        &self.bias_o
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(NnError::LengthMismatch { what, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> NeuralNetwork {
        NeuralNetwork::with_rng(2, 2, 1, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn params(nn: &NeuralNetwork) -> [Matrix; 4] {
        [
            nn.weights_ih().clone(),
            nn.weights_ho().clone(),
            nn.bias_h().clone(),
            nn.bias_o().clone(),
        ]
    }

    #[test]
    fn parameter_shapes_follow_layer_sizes() {
        let nn = NeuralNetwork::new(3, 5, 2).unwrap();
        assert_eq!(nn.weights_ih().shape(), (5, 3));
        assert_eq!(nn.weights_ho().shape(), (2, 5));
        assert_eq!(nn.bias_h().shape(), (5, 1));
        assert_eq!(nn.bias_o().shape(), (2, 1));
        assert_eq!(nn.learning_rate(), 0.1);
        assert_eq!((nn.input_size(), nn.hidden_size(), nn.output_size()), (3, 5, 2));
    }

    #[test]
    fn zero_sized_layers_are_rejected() {
        // The error names the parameter matrix whose shape came out empty.
        assert_eq!(
            NeuralNetwork::new(0, 3, 1).unwrap_err(),
            NnError::InvalidDimension { rows: 3, cols: 0 }
        );
        assert_eq!(
            NeuralNetwork::new(2, 0, 1).unwrap_err(),
            NnError::InvalidDimension { rows: 0, cols: 2 }
        );
        assert_eq!(
            NeuralNetwork::new(2, 3, 0).unwrap_err(),
            NnError::InvalidDimension { rows: 0, cols: 3 }
        );
    }

    #[test]
    fn same_seed_same_network() {
        assert_eq!(params(&seeded(3)), params(&seeded(3)));
    }

    #[test]
    fn feed_forward_does_not_mutate_parameters() {
        let nn = seeded(11);
        let before = params(&nn);
        nn.feed_forward(&[0.3, -0.7]).unwrap();
        let after = params(&nn);
        for (b, a) in before.iter().zip(after.iter()) {
            let same_bits = b.to_array().iter().zip(a.to_array().iter())
                .all(|(x, y)| x.to_bits() == y.to_bits());
            assert!(same_bits);
        }
    }

    #[test]
    fn train_moves_every_parameter_matrix() {
        let mut nn = seeded(5);
        let before = params(&nn);
        nn.train(&[1.0, 0.0], &[1.0]).unwrap();
        for (b, a) in before.iter().zip(params(&nn).iter()) {
            assert_ne!(b, a);
        }
    }

    #[test]
    fn hidden_errors_use_pre_update_weights() {
        let mut nn = seeded(21);
        let inputs = [1.0, 0.0];
        let targets = [1.0];

        // Recompute the expected hidden-bias update by hand from a snapshot.
        let w_ho = nn.weights_ho().clone();
        let x = Matrix::from_array(&inputs).unwrap();
        let mut hidden = Matrix::multiply(nn.weights_ih(), &x).unwrap();
        hidden.add(nn.bias_h()).unwrap();
        hidden.apply_in_place(sigmoid);
        let output = nn.feed_forward(&inputs).unwrap()[0];
        let output_error = targets[0] - output;

        let bias_h_before = nn.bias_h().to_array();
        nn.train(&inputs, &targets).unwrap();
        let bias_h_after = nn.bias_h().to_array();

        for j in 0..2 {
            let h = hidden.data[j][0];
            let expected = dsigmoid(h) * w_ho.data[0][j] * output_error * LEARNING_RATE;
            let actual = bias_h_after[j] - bias_h_before[j];
            assert!((expected - actual).abs() < 1e-12, "unit {j}: {expected} vs {actual}");
        }
    }

    #[test]
    fn wrong_lengths_are_reported_without_side_effects() {
        let mut nn = seeded(2);
        let before = params(&nn);

        assert_eq!(
            nn.feed_forward(&[1.0]),
            Err(NnError::LengthMismatch { what: "input", expected: 2, actual: 1 })
        );
        assert_eq!(
            nn.train(&[1.0, 0.0, 1.0], &[1.0]),
            Err(NnError::LengthMismatch { what: "input", expected: 2, actual: 3 })
        );
        assert_eq!(
            nn.train(&[1.0, 0.0], &[1.0, 0.0]),
            Err(NnError::LengthMismatch { what: "target", expected: 1, actual: 2 })
        );
        assert_eq!(params(&nn), before);
    }

    proptest! {
        #[test]
        fn fresh_network_outputs_lie_in_open_unit_interval(
            seed in any::<u64>(),
            a in -10.0f64..10.0,
            b in -10.0f64..10.0,
        ) {
            let out = seeded(seed).feed_forward(&[a, b]).unwrap();
            prop_assert_eq!(out.len(), 1);
            prop_assert!(out[0] > 0.0 && out[0] < 1.0);
        }
    }
}
