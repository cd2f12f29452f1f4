//! Comparisons between two networks with the same interface.

use log::debug;

use crate::bdd::{Bdd, BddConfig};
use crate::error::{Error, Result};
use crate::network::Network;
use crate::reference::Ref;
use crate::simulate::{evaluate, simulate_with, BddSimulator};
use crate::store::Kind;

fn check_interface(a: &Network, b: &Network) -> Result<()> {
    if a.num_inputs() != b.num_inputs() || a.num_outputs() != b.num_outputs() {
        return Err(Error::InterfaceMismatch {
            left_inputs: a.num_inputs(),
            left_outputs: a.num_outputs(),
            right_inputs: b.num_inputs(),
            right_outputs: b.num_outputs(),
        });
    }
    Ok(())
}

/// Output functions of both networks in one shared manager.
fn shared_outputs(bdd: &Bdd, a: &Network, b: &Network) -> (Vec<Ref>, Vec<Ref>) {
    let sim = BddSimulator::new(bdd);
    (simulate_with(a, &sim), simulate_with(b, &sim))
}

/// Whether both networks compute the same function on every output, position by position.
pub fn equivalent(a: &Network, b: &Network) -> Result<bool> {
    check_interface(a, b)?;
    let bdd = Bdd::with_config(&BddConfig::default());
    let (fa, fb) = shared_outputs(&bdd, a, b);
    Ok(fa == fb)
}

/// Fraction of input assignments on which at least one output differs.
pub fn error_rate(a: &Network, b: &Network) -> Result<f64> {
    check_interface(a, b)?;
    let bdd = Bdd::with_config(&BddConfig::default());
    let (fa, fb) = shared_outputs(&bdd, a, b);
    let diff = bdd.apply_or_many(fa.into_iter().zip(fb).map(|(x, y)| bdd.apply_xor(x, y)));

    let rate = bdd.sat_density(diff);
    debug!("error rate: {}", rate);
    Ok(rate)
}

/// Largest absolute difference between the outputs read as unsigned numbers,
/// output 0 being the least significant bit.
///
/// Enumerates all assignments, so the input count must not exceed `limit`.
pub fn worst_case_error(a: &Network, b: &Network, limit: usize) -> Result<u64> {
    check_interface(a, b)?;
    let n = a.num_inputs();
    if n > limit || n >= 64 {
        return Err(Error::unsupported(
            a.kind().into(),
            Kind::TruthTable,
            format!("{} inputs exceed the limit of {}", n, limit),
        ));
    }
    if a.num_outputs() > 64 {
        return Err(Error::unsupported(
            a.kind().into(),
            Kind::TruthTable,
            format!("{} outputs do not fit a 64-bit word", a.num_outputs()),
        ));
    }

    let word = |bits: Vec<bool>| -> u64 {
        bits.iter()
            .enumerate()
            .fold(0, |acc, (i, &bit)| acc | ((bit as u64) << i))
    };

    let mut worst = 0;
    let mut assignment = vec![false; n];
    for m in 0u64..(1u64 << n) {
        for (j, bit) in assignment.iter_mut().enumerate() {
            *bit = (m >> j) & 1 != 0;
        }
        let x = word(evaluate(a, &assignment));
        let y = word(evaluate(b, &assignment));
        worst = worst.max(x.abs_diff(y));
    }
    debug!("worst-case error: {}", worst);
    Ok(worst)
}
