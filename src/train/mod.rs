pub mod loop_fn;
pub mod sample;
pub mod train_config;

pub use loop_fn::{mean_squared_error, train_random};
pub use sample::{nand_samples, xor_samples, Sample};
pub use train_config::TrainConfig;
