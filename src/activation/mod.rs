pub mod activation;

pub use activation::{dsigmoid, heaviside, sigmoid};
