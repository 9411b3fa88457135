pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod perceptron;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use network::network::NeuralNetwork;
pub use perceptron::Perceptron;
pub use loss::mse::MseLoss;
pub use train::{train_random, Sample, TrainConfig};
