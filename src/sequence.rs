use crate::error::Result;
use crate::rnn::{RNNState, RNN};
use rayon::prelude::*;
use tracing::debug;

/// Feeds `inputs` through `state` one time step at a time and collects every output.
///
/// Stops at the first failing step; `state` then holds the hidden state of the last step that
/// succeeded.
pub fn propagate_sequence<S>(state: &mut S, inputs: &[Vec<S::InputType>]) -> Result<Vec<Vec<S::OutputType>>>
where
    S: RNNState,
    S::OutputType: Clone,
{
    let mut outputs = Vec::with_capacity(inputs.len());
    for x in inputs.iter() {
        outputs.push(state.propagate(x)?.to_vec());
    }
    Ok(outputs)
}

/// Runs independent sequences in parallel. Every sequence starts from a fresh state of
/// `network`; the network itself is only read.
pub fn propagate_sequences_par<N, T>(network: &N, sequences: &[Vec<Vec<T>>]) -> Result<Vec<Vec<Vec<T>>>>
where
    N: RNN + Sync,
    N::RNNState: RNNState<InputType = T, OutputType = T>,
    T: Clone + Send + Sync,
{
    debug!(nsequences = sequences.len(), "propagating sequences in parallel");
    sequences
        .par_iter()
        .map(|seq| {
            let mut st = network.start();
            propagate_sequence(&mut st, seq)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elman::ElmanRNN;
    use crate::error::RNNError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_sequence(rng: &mut StdRng, len: usize, width: usize) -> Vec<Vec<f64>> {
        (0..len)
            .map(|_| (0..width).map(|_| rng.random_range(-1.0..1.0)).collect())
            .collect()
    }

    #[test]
    fn sequence_matches_manual_steps() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = ElmanRNN::new(4, 2, 3);
        network.randomize_with_rng(&mut rng, 0.5).unwrap();
        let inputs = random_sequence(&mut rng, 10, 2);

        let mut st = network.start();
        let outputs = propagate_sequence(&mut st, &inputs).unwrap();

        let mut manual = network.start();
        for (x, y) in inputs.iter().zip(outputs.iter()) {
            assert_eq!(manual.propagate(x).unwrap(), y.as_slice());
        }
        assert_eq!(outputs.len(), 10);
        assert_eq!(st.hidden(), manual.hidden());
    }

    #[test]
    fn sequence_stops_at_bad_step() {
        let mut network = ElmanRNN::new(3, 2, 1);
        network.randomize_with_rng(&mut StdRng::seed_from_u64(1), 0.5).unwrap();
        let inputs = vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5], vec![0.6, 0.7]];

        let mut st = network.start();
        let result = propagate_sequence(&mut st, &inputs);
        assert!(matches!(
            result,
            Err(RNNError::DimensionMismatch { actual: 1, .. })
        ));

        let mut expected = network.start();
        expected.propagate(&inputs[0]).unwrap();
        expected.propagate(&inputs[1]).unwrap();
        assert_eq!(st.hidden(), expected.hidden());
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut network = ElmanRNN::new(8, 3, 2);
        network.randomize_with_rng(&mut rng, 0.3).unwrap();
        let sequences: Vec<Vec<Vec<f64>>> = (0..32)
            .map(|i| random_sequence(&mut rng, 5 + i % 7, 3))
            .collect();

        let parallel = propagate_sequences_par(&network, &sequences).unwrap();
        for (seq, got) in sequences.iter().zip(parallel.iter()) {
            let mut st = network.start();
            assert_eq!(&propagate_sequence(&mut st, seq).unwrap(), got);
        }
    }

    #[test]
    fn parallel_reports_errors() {
        let network = ElmanRNN::new(2, 2, 2);
        let sequences = vec![vec![vec![0.0, 0.0]], vec![vec![0.0]]];
        assert!(propagate_sequences_par(&network, &sequences).is_err());
    }
}
