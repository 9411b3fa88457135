use ferrite_mlp::train::xor_samples;
use ferrite_mlp::NeuralNetwork;
use rand::seq::SliceRandom;

fn main() -> ferrite_mlp::Result<()> {
    let mut network = NeuralNetwork::new(2, 2, 1)?;
    let samples = xor_samples();
    let mut rng = rand::thread_rng();

    for _ in 0..100_000 {
        if let Some(sample) = samples.choose(&mut rng) {
            network.train(&sample.inputs, &sample.targets)?;
        }
    }

    for input in [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [1.0, 0.0]] {
        println!("Input: {:?} -> Output: {:.4}", input, network.feed_forward(&input)?[0]);
    }
    Ok(())
}
