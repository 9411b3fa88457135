use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NnError, Result};

/// Settings for one XOR-style training run.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```json
/// { "hidden_nodes": 4, "iterations": 50000, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    /// Number of single-example training steps.
    pub iterations: usize,
    /// Log the training-set error every this many steps; `0` disables.
    pub log_every: usize,
    /// Fixed RNG seed for reproducible runs; `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            input_nodes: 2,
            hidden_nodes: 2,
            output_nodes: 1,
            iterations: 100_000,
            log_every: 10_000,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Reads a config from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| NnError::Config(format!("{}: {e}", path.display())))?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| NnError::Config(format!("{}: {e}", path.display())))
    }
}
