use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::{NnError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::NeuralNetwork;
use crate::train::sample::Sample;

/// Trains `network` for `iterations` steps, each on one sample drawn
/// uniformly at random (with replacement) from `samples`.
///
/// Every `log_every` steps the mean squared error over the whole set is
/// logged; `0` turns logging off. Returns that error measured after the
/// final step.
pub fn train_random<R: Rng + ?Sized>(
    network: &mut NeuralNetwork,
    samples: &[Sample],
    iterations: usize,
    log_every: usize,
    rng: &mut R,
) -> Result<f64> {
    if samples.is_empty() {
        return Err(NnError::EmptyTrainingSet);
    }

    for step in 1..=iterations {
        let sample = samples.choose(rng).ok_or(NnError::EmptyTrainingSet)?;
        network.train(&sample.inputs, &sample.targets)?;

        if log_every > 0 && step % log_every == 0 {
            let loss = mean_squared_error(network, samples)?;
            info!(step, iterations, loss, "training");
        }
    }

    mean_squared_error(network, samples)
}

/// Mean of the per-sample MSE over `samples`, without touching parameters.
pub fn mean_squared_error(network: &NeuralNetwork, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Err(NnError::EmptyTrainingSet);
    }
    let mut total = 0.0;
    for sample in samples {
        if sample.targets.len() != network.output_size() {
            return Err(NnError::LengthMismatch {
                what: "target",
                expected: network.output_size(),
                actual: sample.targets.len(),
            });
        }
        let output = network.feed_forward(&sample.inputs)?;
        total += MseLoss::loss(&output, &sample.targets);
    }
    Ok(total / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::sample::xor_samples;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_training_set_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut nn = NeuralNetwork::with_rng(2, 2, 1, &mut rng).unwrap();
        assert_eq!(train_random(&mut nn, &[], 10, 0, &mut rng), Err(NnError::EmptyTrainingSet));
        assert_eq!(mean_squared_error(&nn, &[]), Err(NnError::EmptyTrainingSet));
    }

    #[test]
    fn mis_shaped_sample_surfaces_length_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut nn = NeuralNetwork::with_rng(2, 2, 1, &mut rng).unwrap();
        let bad = vec![Sample::new(vec![1.0], vec![0.0])];
        assert!(matches!(
            train_random(&mut nn, &bad, 5, 0, &mut rng),
            Err(NnError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn mis_shaped_targets_are_not_scored() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut nn = NeuralNetwork::with_rng(2, 2, 1, &mut rng).unwrap();
        let bad = vec![Sample::new(vec![1.0, 0.0], vec![1.0, 0.0, 0.0])];
        let expected = Err(NnError::LengthMismatch { what: "target", expected: 1, actual: 3 });
        assert_eq!(mean_squared_error(&nn, &bad), expected);
        assert_eq!(train_random(&mut nn, &bad, 0, 0, &mut rng), expected);
        // Scoring and training agree on what a bad sample is.
        assert_eq!(
            nn.train(&bad[0].inputs, &bad[0].targets).unwrap_err(),
            expected.unwrap_err()
        );
    }

    #[test]
    fn repeated_steps_fit_a_single_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut nn = NeuralNetwork::with_rng(2, 2, 1, &mut rng).unwrap();
        let samples = vec![Sample::new(vec![1.0, 0.0], vec![1.0])];
        let before = mean_squared_error(&nn, &samples).unwrap();
        let after = train_random(&mut nn, &samples, 500, 100, &mut rng).unwrap();
        assert!(after < before, "{after} !< {before}");
    }

    #[test]
    fn zero_iterations_is_a_measurement() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut nn = NeuralNetwork::with_rng(2, 2, 1, &mut rng).unwrap();
        let samples = xor_samples();
        let before = nn.weights_ih().clone();
        let loss = train_random(&mut nn, &samples, 0, 0, &mut rng).unwrap();
        assert_eq!(nn.weights_ih(), &before);
        assert_eq!(loss, mean_squared_error(&nn, &samples).unwrap());
    }
}
