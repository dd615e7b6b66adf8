// Runs a randomly initialized Elman network over a sine wave and logs what comes out.
//
//   cargo run --features toys --bin elman-demo -- [config.json]
//
// Set RUST_LOG=elman_rnn=trace to see every step.

use elman_rnn::*;
use std::error::Error;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_CONFIG: &str = r#"{
    "hidden_size": 16,
    "input_size": 1,
    "output_size": 1,
    "init": {"kind": "uniform", "scale": 0.3},
    "seed": 1234
}"#;

pub fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ElmanConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ElmanConfig::from_json_str(DEFAULT_CONFIG)?,
    };
    info!(
        hidden = config.hidden_size(),
        inputs = config.input_size(),
        outputs = config.output_size(),
        "loaded config"
    );

    let network: ElmanRNN = config.build()?;
    let inputs: Vec<Vec<f64>> = (0..50)
        .map(|t| vec![(t as f64 * 0.25).sin(); network.num_inputs()])
        .collect();

    let mut st = network.start();
    let outputs = propagate_sequence(&mut st, &inputs)?;
    for (t, (x, y)) in inputs.iter().zip(outputs.iter()).enumerate() {
        info!("t={} x={:?} y={:?}", t, x, y);
    }
    info!("final hidden state: {:?}", st.hidden());
    Ok(())
}
