use criterion::{black_box, criterion_group, criterion_main, Criterion};
use elman_rnn::elman::*;
use elman_rnn::rnn::*;
use elman_rnn::sequence::*;

pub fn elman_benchmark(c: &mut Criterion) {
    let mut network = ElmanRNN::new(100, 8, 8);
    network.randomize();
    c.bench_function("elman f64 8-100-8 propagate", |b| {
        let mut st = network.start();
        b.iter(|| {
            st.propagate(black_box(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]))
                .unwrap();
        })
    });

    let mut network32 = ElmanRNNF32::new(100, 8, 8);
    network32.randomize();
    c.bench_function("elman f32 8-100-8 propagate", |b| {
        let mut st = network32.start();
        b.iter(|| {
            st.propagate(black_box(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]))
                .unwrap();
        })
    });

    let mut network = ElmanRNN::new(8, 5, 1);
    network.randomize();
    c.bench_function("elman f64 5-8-1 step", |b| {
        let mut hidden = vec![0.0; 8];
        b.iter(|| step(&mut hidden, black_box(&[0.0, 0.0, 0.0, 0.0, 0.0]), &network).unwrap())
    });

    let mut network = ElmanRNN::new(32, 4, 2);
    network.randomize();
    let sequences: Vec<Vec<Vec<f64>>> = (0..64).map(|_| vec![vec![0.5; 4]; 100]).collect();
    c.bench_function("elman f64 64x100 sequences parallel", |b| {
        b.iter(|| propagate_sequences_par(black_box(&network), black_box(&sequences)).unwrap())
    });
}

criterion_group!(benches, elman_benchmark);
criterion_main!(benches);
