//! Structural and semantic statistics.

use std::fmt::{Display, Formatter};

use num_bigint::BigUint;

use crate::bdd::BddConfig;
use crate::function::BooleanFunctionSet;
use crate::gate::GateType;
use crate::network::Network;
use crate::signal::Signal;
use crate::simulate::simulate;

/// Number of internal nodes.
pub fn size(network: &Network) -> usize {
    network.num_gates()
}

/// Level of every node: 0 for the constant and the inputs, one more than the
/// deepest fan-in for a gate.
pub fn levels(network: &Network) -> Vec<usize> {
    let mut levels = vec![0; network.num_nodes()];
    for (id, gate) in network.gates() {
        levels[id] = 1 + gate.inputs().iter().map(|s| levels[s.node()]).max().unwrap_or(0);
    }
    levels
}

/// Longest input-to-output path, counted in gates.
pub fn depth(network: &Network) -> usize {
    let levels = levels(network);
    network
        .outputs()
        .iter()
        .map(|s| levels[s.node()])
        .max()
        .unwrap_or(0)
}

/// Gate fan-in edges carrying the complement bit.
///
/// Constant fan-ins are not counted: a constant one is a tied input rather
/// than an inverted edge.
pub fn complemented_edges(network: &Network) -> usize {
    network
        .gates()
        .flat_map(|(_, g)| g.inputs().iter().copied())
        .filter(|s| s.is_complemented() && !s.is_const())
        .count()
}

/// Number of NOT gates needed to materialize the complemented edges.
///
/// Every node referenced through at least one complemented fan-in or output
/// edge needs exactly one inverter.
pub fn inverters(network: &Network) -> usize {
    let mut inverted = vec![false; network.num_nodes()];
    let fanins = network.gates().flat_map(|(_, g)| g.inputs().iter().copied());
    for s in fanins.chain(network.outputs().iter().copied()) {
        if s.is_complemented() && !s.is_const() {
            inverted[s.node()] = true;
        }
    }
    inverted.into_iter().filter(|&b| b).count()
}

/// Number of references to every node, output references included.
pub fn fanout_counts(network: &Network) -> Vec<usize> {
    let mut counts = vec![0; network.num_nodes()];
    let fanins = network.gates().flat_map(|(_, g)| g.inputs().iter().copied());
    for s in fanins.chain(network.outputs().iter().copied()) {
        counts[s.node()] += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateCounts {
    pub and: usize,
    pub or: usize,
    pub xor: usize,
    pub maj: usize,
    /// Majority gates without a constant fan-in.
    pub real_maj: usize,
}

pub fn gate_counts(network: &Network) -> GateCounts {
    let mut counts = GateCounts::default();
    for (_, gate) in network.gates() {
        match gate.gate_type() {
            GateType::And => counts.and += 1,
            GateType::Or => counts.or += 1,
            GateType::Xor => counts.xor += 1,
            GateType::Maj => {
                counts.maj += 1;
                if !gate.inputs().iter().any(|s: &Signal| s.is_const()) {
                    counts.real_maj += 1;
                }
            }
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStatistics {
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub size: usize,
    pub depth: usize,
    pub complemented_edges: usize,
    pub inverters: usize,
    pub gate_counts: GateCounts,
    /// Per-output minterm counts, when requested.
    pub minterm_counts: Option<Vec<f64>>,
}

pub fn statistics(network: &Network, with_minterms: bool) -> NetworkStatistics {
    let minterm_counts = with_minterms.then(|| {
        let set = simulate(network, &BddConfig::default());
        (0..set.num_outputs()).map(|i| set.minterm_count(i)).collect()
    });
    NetworkStatistics {
        num_inputs: network.num_inputs(),
        num_outputs: network.num_outputs(),
        size: size(network),
        depth: depth(network),
        complemented_edges: complemented_edges(network),
        inverters: inverters(network),
        gate_counts: gate_counts(network),
        minterm_counts,
    }
}

impl Display for NetworkStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "i/o = {}/{}, size = {}, depth = {}, complemented edges = {}, inverters = {}",
            self.num_inputs, self.num_outputs, self.size, self.depth, self.complemented_edges, self.inverters
        )?;
        let g = &self.gate_counts;
        write!(
            f,
            ", and/or/xor/maj = {}/{}/{}/{} ({} real maj)",
            g.and, g.or, g.xor, g.maj, g.real_maj
        )?;
        if let Some(minterms) = &self.minterm_counts {
            write!(f, ", minterms = {:?}", minterms)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatistics {
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub num_nodes: usize,
    pub max_fanout: usize,
    pub complement_edges: usize,
    pub level_sizes: Vec<usize>,
    pub minterms: Vec<f64>,
    pub exact_minterms: Vec<BigUint>,
    pub path_counts: Vec<f64>,
    pub paths_to_one: Vec<f64>,
}

pub fn function_statistics(set: &BooleanFunctionSet) -> FunctionStatistics {
    let outputs = 0..set.num_outputs();
    FunctionStatistics {
        num_inputs: set.num_inputs(),
        num_outputs: set.num_outputs(),
        num_nodes: set.num_nodes(),
        max_fanout: set.max_fanout(),
        complement_edges: set.complement_edges(),
        level_sizes: set.level_sizes(),
        minterms: outputs.clone().map(|i| set.minterm_count(i)).collect(),
        exact_minterms: outputs.clone().map(|i| set.minterm_count_exact(i)).collect(),
        path_counts: outputs.clone().map(|i| set.path_count(i)).collect(),
        paths_to_one: outputs.map(|i| set.path_count_to_one(i)).collect(),
    }
}

impl Display for FunctionStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "i/o = {}/{}, nodes = {}, max fanout = {}, complement edges = {}, levels = {:?}",
            self.num_inputs,
            self.num_outputs,
            self.num_nodes,
            self.max_fanout,
            self.complement_edges,
            self.level_sizes
        )?;
        write!(f, ", minterms = {:?}, paths = {:?}", self.minterms, self.path_counts)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::network::NetworkKind;

    fn xor_aig() -> Network {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let f = net.create_xor(a, b);
        net.add_output("f", f);
        net
    }

    #[test]
    fn test_xor_aig() {
        let net = xor_aig();
        let stats = statistics(&net, true);

        assert_eq!(stats.size, 3);
        assert_eq!(stats.depth, 2);
        assert_eq!(stats.minterm_counts, Some(vec![2.0]));
        assert_eq!(stats.gate_counts.and, 3);
        // p = and(a,!b), q = and(!a,b), r = and(!p,!q), f = !r
        assert_eq!(stats.complemented_edges, 4);
        assert_eq!(stats.inverters, 5);
    }

    #[test]
    fn test_levels_and_fanout() {
        let mut net = Network::new(NetworkKind::Mixed);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");
        let m = net.create_maj(a, b, c);
        let x = net.create_xor(m, a);
        net.add_output("x", x);
        net.add_output("m", m);

        let levels = levels(&net);
        assert_eq!(levels[a.node()], 0);
        assert_eq!(levels[m.node()], 1);
        assert_eq!(levels[x.node()], 2);
        assert_eq!(depth(&net), 2);

        let fanout = fanout_counts(&net);
        assert_eq!(fanout[a.node()], 2);
        assert_eq!(fanout[m.node()], 2);

        let counts = gate_counts(&net);
        assert_eq!(counts.maj, 1);
        assert_eq!(counts.real_maj, 1);
        assert_eq!(counts.xor, 1);
    }

    #[test]
    fn test_empty_network() {
        let net = Network::new(NetworkKind::Mig);
        let stats = statistics(&net, false);
        assert_eq!(stats.size, 0);
        assert_eq!(stats.depth, 0);
        assert_eq!(stats.minterm_counts, None);
    }

    #[test]
    fn test_mig_constant_fanins() {
        let mut net = Network::new(NetworkKind::Mig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let f = net.create_or(a, b);
        net.add_output("f", f);

        let counts = gate_counts(&net);
        assert_eq!(counts.maj, 1);
        assert_eq!(counts.real_maj, 0);
        assert_eq!(complemented_edges(&net), 0);
        assert_eq!(inverters(&net), 0);
    }

    #[test]
    fn test_function_statistics() {
        let net = xor_aig();
        let set = simulate(&net, &BddConfig::default());
        let stats = function_statistics(&set);

        assert_eq!(stats.num_nodes, 3);
        assert_eq!(stats.minterms, vec![2.0]);
        assert_eq!(stats.exact_minterms, vec![BigUint::from(2u32)]);
        assert_eq!(stats.path_counts, vec![4.0]);
        assert_eq!(stats.paths_to_one, vec![2.0]);
        assert_eq!(stats.level_sizes, vec![1, 1]);
    }
}
