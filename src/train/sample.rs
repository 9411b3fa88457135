use serde::{Deserialize, Serialize};

/// One labelled example: an input vector and the output it should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Sample {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> Sample {
        Sample { inputs, targets }
    }
}

/// Exclusive-or over two binary inputs.
pub fn xor_samples() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
    ]
}

/// NAND over two binary inputs. The trailing `1.0` is the bias column.
pub fn nand_samples() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 0.0, 1.0], vec![1.0]),
        Sample::new(vec![0.0, 1.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0, 1.0], vec![0.0]),
    ]
}
