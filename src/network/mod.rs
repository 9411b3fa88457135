pub mod network;

pub use network::{NeuralNetwork, LEARNING_RATE};
