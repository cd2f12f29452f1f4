//! Simulation and conversion benchmarks on random networks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench conversion
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logic_nets::bdd::BddConfig;
use logic_nets::convert::{convert, rebuild, ConvertConfig};
use logic_nets::network::{Network, NetworkKind};
use logic_nets::signal::Signal;
use logic_nets::simulate::{simulate, simulate_truth_tables};
use logic_nets::store::{Kind, ObjectRef};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// Helper: random AIG with a few outputs
// ============================================================================

fn random_aig(num_inputs: usize, num_gates: usize, seed: u64) -> Network {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut net = Network::new(NetworkKind::Aig);
    let mut signals: Vec<Signal> = (0..num_inputs).map(|i| net.add_input(format!("x{}", i))).collect();
    for _ in 0..num_gates {
        let a = signals[rng.random_range(0..signals.len())] ^ rng.random_bool(0.5);
        let b = signals[rng.random_range(0..signals.len())] ^ rng.random_bool(0.5);
        let s = if rng.random_bool(0.2) {
            net.create_xor(a, b)
        } else {
            net.create_and(a, b)
        };
        signals.push(s);
    }
    for i in 0..4 {
        net.add_output(format!("y{}", i), signals[signals.len() - 1 - i]);
    }
    net
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    for num_gates in [100, 1000, 5000] {
        let net = random_aig(16, num_gates, 1);
        group.throughput(Throughput::Elements(num_gates as u64));
        group.bench_with_input(BenchmarkId::new("bdd", num_gates), &net, |b, net| {
            b.iter(|| simulate(net, &BddConfig::default()));
        });
        group.bench_with_input(BenchmarkId::new("truth_table", num_gates), &net, |b, net| {
            b.iter(|| simulate_truth_tables(net));
        });
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for num_gates in [1000, 10000] {
        let net = random_aig(32, num_gates, 2);
        group.throughput(Throughput::Elements(num_gates as u64));
        for detect in [false, true] {
            let name = if detect { "aig_to_mig_patterns" } else { "aig_to_mig_plain" };
            group.bench_with_input(BenchmarkId::new(name, num_gates), &net, |b, net| {
                b.iter(|| rebuild(net, NetworkKind::Mig, detect));
            });
        }
    }
    group.finish();
}

fn bench_truth_table_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("truth_table_to_aig");
    group.sample_size(20);
    let config = ConvertConfig::default();
    for num_inputs in [6, 10, 14] {
        let net = random_aig(num_inputs, 200, 3);
        let tables = simulate_truth_tables(&net);
        group.bench_with_input(BenchmarkId::from_parameter(num_inputs), &tables, |b, tables| {
            b.iter(|| convert(ObjectRef::TruthTable(tables), Kind::Aig, &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simulate, bench_rebuild, bench_truth_table_synthesis);
criterion_main!(benches);
