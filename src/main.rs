use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ferrite_mlp::train::{nand_samples, xor_samples};
use ferrite_mlp::{train_random, NeuralNetwork, Perceptron, TrainConfig};

/// Runs the bundled training demos.
#[derive(Parser, Debug)]
#[command(name = "ferrite-mlp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a sigmoid network on XOR and print its predictions.
    Xor {
        /// JSON run configuration; flags below override its fields.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        hidden: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Train a perceptron on NAND and print its predictions.
    Nand {
        #[arg(long, default_value_t = 100)]
        epochs: usize,
        #[arg(long, default_value_t = 0.5)]
        eta: f64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Xor { config, iterations, hidden, seed } => {
            let mut cfg = match config {
                Some(path) => TrainConfig::load_json(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => TrainConfig::default(),
            };
            if let Some(n) = iterations {
                cfg.iterations = n;
            }
            if let Some(n) = hidden {
                cfg.hidden_nodes = n;
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            run_xor(&cfg)
        }
        Command::Nand { epochs, eta } => run_nand(epochs, eta),
    }
}

fn run_xor(cfg: &TrainConfig) -> anyhow::Result<()> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let samples = xor_samples();

    let mut network = NeuralNetwork::with_rng(cfg.input_nodes, cfg.hidden_nodes, cfg.output_nodes, &mut rng)?;
    info!(?cfg, "training on xor");
    let loss = train_random(&mut network, &samples, cfg.iterations, cfg.log_every, &mut rng)?;
    info!(loss, "done");

    let mut separated = true;
    for sample in &samples {
        let output = network.feed_forward(&sample.inputs)?;
        println!("{:?} -> {:.4?}", sample.inputs, output);
        separated &= (output[0] - sample.targets[0]).abs() < 0.5;
    }
    if !separated {
        warn!("network did not separate xor; try another --seed or more --hidden units");
    }
    Ok(())
}

fn run_nand(epochs: usize, eta: f64) -> anyhow::Result<()> {
    let samples = nand_samples();
    let xs: Vec<Vec<f64>> = samples.iter().map(|s| s.inputs.clone()).collect();
    let ys: Vec<f64> = samples.iter().map(|s| s.targets[0]).collect();

    let mut perceptron = Perceptron::new(xs[0].len(), eta)?;
    let ran = perceptron.fit(&xs, &ys, epochs)?;
    info!(epochs = ran, weights = ?perceptron.weights(), "perceptron trained");

    for (x, y) in xs.iter().zip(perceptron.predict_all(&xs)?) {
        println!("{:?} -> {}", &x[..2], y);
    }
    Ok(())
}
