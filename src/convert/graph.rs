//! Graph-to-graph rebuilding with majority and xor recognition.
//!
//! The rebuild starts from the outputs and only materializes what they need.
//! Before a node is copied gate by gate, a small window of AND-like nodes
//! around it is compared against two shapes:
//!
//! ```text
//! majority:  n = AND(!p, !q),  p = AND(a, b),  q = AND(c, !AND(!a, !b))   =>  n = !MAJ(a, b, c)
//! xor:       n = AND(!p, !q),  p = AND(x, y),  q = AND(!x, !y)           =>  n = XOR(x, y)
//! ```
//!
//! A signal counts as an AND when it points at an AND gate or a majority with
//! a constant-0 fan-in, or when it is the complement of an OR gate or of a
//! majority with a constant-1 fan-in. A match is emitted through the target's
//! `create_maj` / `create_xor`; the inner nodes of the window are then only
//! built if something else refers to them.

use log::{debug, info};

use crate::gate::GateType;
use crate::network::{Network, NetworkKind, Node};
use crate::signal::{NodeId, Signal};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Plan {
    /// `MAJ(leaves)`, complemented when the flag is set.
    Maj([Signal; 3], bool),
    /// `XOR(leaves)`, complemented when the flag is set.
    Xor([Signal; 2], bool),
    /// Copy the gate through the target's builders.
    Copy,
}

impl Plan {
    fn leaves(&self) -> &[Signal] {
        match self {
            Plan::Maj(leaves, _) => leaves,
            Plan::Xor(leaves, _) => leaves,
            Plan::Copy => &[],
        }
    }
}

/// Fan-ins of `s` when `s` computes an AND of them.
fn as_and(net: &Network, s: Signal) -> Option<[Signal; 2]> {
    if s.is_const() {
        return None;
    }
    let gate = net.gate(s.node())?;
    if s.is_complemented() {
        gate.as_or().map(|[x, y]| [!x, !y])
    } else {
        gate.as_and()
    }
}

fn same_pair([a, b]: [Signal; 2], [c, d]: [Signal; 2]) -> bool {
    (a == c && b == d) || (a == d && b == c)
}

/// Majority window below `AND(f0, f1)`.
fn match_maj(net: &Network, f0: Signal, f1: Signal) -> Option<[Signal; 3]> {
    for (pp, qq) in [(f0, f1), (f1, f0)] {
        if let (Some([a, b]), Some([u, v])) = (as_and(net, !pp), as_and(net, !qq)) {
            for (c, nt) in [(u, v), (v, u)] {
                match as_and(net, !nt) {
                    Some(t) if same_pair(t, [!a, !b]) => return Some([a, b, c]),
                    _ => {}
                }
            }
        }
    }
    None
}

/// Xor window below `AND(f0, f1)`.
fn match_xor(net: &Network, f0: Signal, f1: Signal) -> Option<[Signal; 2]> {
    let [x, y] = as_and(net, !f0)?;
    let q = as_and(net, !f1)?;
    same_pair(q, [!x, !y]).then_some([x, y])
}

fn match_window(net: &Network, id: NodeId) -> Plan {
    let n = Signal::from_node(id);
    // Try the node itself, then its complement (e.g. an OR node).
    for (s, flip) in [(n, false), (!n, true)] {
        if let Some([f0, f1]) = as_and(net, s) {
            if let Some(leaves) = match_maj(net, f0, f1) {
                // s = !MAJ, n = s ^ flip
                return Plan::Maj(leaves, !flip);
            }
            if let Some(leaves) = match_xor(net, f0, f1) {
                return Plan::Xor(leaves, flip);
            }
        }
    }
    Plan::Copy
}

/// Rebuild `source` as a network of kind `target`.
///
/// Only the transitive fan-in of the outputs is built. Inputs and outputs keep
/// their names and order.
pub fn rebuild(source: &Network, target: NetworkKind, detect_patterns: bool) -> Network {
    let mut net = Network::new(target).with_name(source.name());
    let mut map: Vec<Option<Signal>> = vec![None; source.num_nodes()];
    let mut plans: Vec<Option<Plan>> = vec![None; source.num_nodes()];

    map[0] = Some(Signal::zero());
    for (i, s) in source.inputs().enumerate() {
        map[s.node()] = Some(net.add_input(source.input_name(i)));
    }

    let mut matched = 0usize;
    let mut stack: Vec<(NodeId, bool)> = source.outputs().iter().map(|s| (s.node(), false)).collect();

    while let Some((id, ready)) = stack.pop() {
        if map[id].is_some() {
            continue;
        }
        let plan = *plans[id].get_or_insert_with(|| {
            if detect_patterns {
                match_window(source, id)
            } else {
                Plan::Copy
            }
        });

        if !ready {
            stack.push((id, true));
            let deps: Vec<NodeId> = match plan {
                Plan::Copy => source.fanins(id).iter().map(|s| s.node()).collect(),
                _ => plan.leaves().iter().map(|s| s.node()).collect(),
            };
            stack.extend(deps.into_iter().filter(|&d| map[d].is_none()).map(|d| (d, false)));
            continue;
        }

        let m = |s: Signal| -> Signal {
            let base = map[s.node()].unwrap_or_else(|| panic!("n{} is built before its fan-in", s.node()));
            base ^ s.is_complemented()
        };

        let signal = match plan {
            Plan::Maj([a, b, c], complemented) => {
                debug!("rebuild: n{} is a majority of {}, {}, {}", id, a, b, c);
                matched += 1;
                let (a, b, c) = (m(a), m(b), m(c));
                net.create_maj(a, b, c) ^ complemented
            }
            Plan::Xor([x, y], complemented) => {
                debug!("rebuild: n{} is a xor of {}, {}", id, x, y);
                matched += 1;
                let (x, y) = (m(x), m(y));
                net.create_xor(x, y) ^ complemented
            }
            Plan::Copy => match source.node(id) {
                Node::Gate(g) => {
                    let f: Vec<Signal> = g.inputs().iter().map(|&s| m(s)).collect();
                    match g.gate_type() {
                        GateType::And => net.create_and(f[0], f[1]),
                        GateType::Or => net.create_or(f[0], f[1]),
                        GateType::Xor => net.create_xor(f[0], f[1]),
                        GateType::Maj => net.create_maj(f[0], f[1], f[2]),
                    }
                }
                Node::Constant | Node::Input(_) => unreachable!("n{} is mapped up front", id),
            },
        };
        map[id] = Some(signal);
    }

    for (i, &s) in source.outputs().iter().enumerate() {
        let base = map[s.node()].unwrap_or_else(|| panic!("Output {} was not built", s));
        net.add_output(source.output_name(i), base ^ s.is_complemented());
    }

    info!(
        "rebuild: {} ({} gates) -> {} ({} gates), {} windows matched",
        source.kind(),
        source.num_gates(),
        target,
        net.num_gates(),
        matched
    );
    net
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::analysis::gate_counts;
    use crate::simulate::simulate_truth_tables;

    fn maj_aig() -> Network {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");
        let m = net.create_maj(a, b, c);
        net.add_output("m", m);
        net.add_output("nm", !m);
        net
    }

    #[test]
    fn test_majority_window() {
        let aig = maj_aig();
        let mig = rebuild(&aig, NetworkKind::Mig, true);

        assert_eq!(mig.num_gates(), 1);
        assert_eq!(gate_counts(&mig).real_maj, 1);
        assert_eq!(simulate_truth_tables(&mig), simulate_truth_tables(&aig));
    }

    #[test]
    fn test_without_patterns() {
        let aig = maj_aig();
        let mig = rebuild(&aig, NetworkKind::Mig, false);

        assert_eq!(mig.num_gates(), aig.num_gates());
        assert_eq!(gate_counts(&mig).real_maj, 0);
        assert_eq!(simulate_truth_tables(&mig), simulate_truth_tables(&aig));
    }

    #[test]
    fn test_xor_window() {
        let mut aig = Network::new(NetworkKind::Aig);
        let a = aig.add_input("a");
        let b = aig.add_input("b");
        let x = aig.create_xor(a, b);
        aig.add_output("x", x);

        let mixed = rebuild(&aig, NetworkKind::Mixed, true);
        assert_eq!(mixed.num_gates(), 1);
        assert_eq!(gate_counts(&mixed).xor, 1);
        assert_eq!(simulate_truth_tables(&mixed), simulate_truth_tables(&aig));

        // And back: the MIG decomposition is recognized as a xor as well.
        let mig = rebuild(&aig, NetworkKind::Mig, true);
        let back = rebuild(&mig, NetworkKind::Mixed, true);
        assert_eq!(gate_counts(&back).xor, 1);
        assert_eq!(simulate_truth_tables(&back), simulate_truth_tables(&aig));
    }

    #[test]
    fn test_dangling_nodes_are_dropped() {
        let mut aig = Network::new(NetworkKind::Aig);
        let a = aig.add_input("a");
        let b = aig.add_input("b");
        let f = aig.create_and(a, b);
        let _unused = aig.create_and(a, !b);
        aig.add_output("f", f);

        let copy = rebuild(&aig, NetworkKind::Aig, true);
        assert_eq!(copy.num_gates(), 1);
        assert_eq!(copy.num_inputs(), 2);
        assert!(copy.check().is_ok());
    }

    #[test]
    fn test_shared_inner_node_is_kept() {
        let mut aig = Network::new(NetworkKind::Aig);
        let a = aig.add_input("a");
        let b = aig.add_input("b");
        let c = aig.add_input("c");
        let m = aig.create_maj(a, b, c);
        let ab = aig.create_and(a, b);
        aig.add_output("m", m);
        aig.add_output("ab", ab);

        let mixed = rebuild(&aig, NetworkKind::Mixed, true);
        let counts = gate_counts(&mixed);
        assert_eq!(counts.real_maj, 1);
        assert_eq!(counts.and, 1);
        assert_eq!(simulate_truth_tables(&mixed), simulate_truth_tables(&aig));
    }
}
