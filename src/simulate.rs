//! Topological simulation of networks.
//!
//! A [`Simulator`] supplies the value domain: decision diagrams, bit-parallel
//! truth tables or plain booleans. [`simulate_with`] visits every node of the
//! outputs' cone exactly once, in topological order, and applies edge
//! polarities right before a value is consumed.

use log::{debug, info};

use crate::bdd::{Bdd, BddConfig};
use crate::expr::{ExprId, ExprNode, Expression};
use crate::function::BooleanFunctionSet;
use crate::gate::GateType;
use crate::network::{Network, Node};
use crate::reference::Ref;
use crate::signal::Signal;
use crate::truth_table::{num_rows, TruthTable, TruthTableSet};

pub trait Simulator {
    type Value: Clone;

    fn constant(&self, value: bool) -> Self::Value;
    fn input(&self, index: usize) -> Self::Value;
    fn complement(&self, value: &Self::Value) -> Self::Value;
    fn and(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn or(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn xor(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn maj(&self, a: &Self::Value, b: &Self::Value, c: &Self::Value) -> Self::Value;
}

/// Values of all outputs of `network`, in output order.
pub fn simulate_with<S: Simulator>(network: &Network, sim: &S) -> Vec<S::Value> {
    let mut values: Vec<Option<S::Value>> = vec![None; network.num_nodes()];

    let edge = |values: &[Option<S::Value>], s: Signal| -> S::Value {
        let v = values[s.node()]
            .as_ref()
            .unwrap_or_else(|| panic!("n{} is used before it is evaluated", s.node()));
        if s.is_complemented() {
            sim.complement(v)
        } else {
            v.clone()
        }
    };

    let order = network.topological_order(network.outputs());
    debug!("simulate: {} nodes in the cone", order.len());

    for id in order {
        let value = match network.node(id) {
            Node::Constant => sim.constant(false),
            Node::Input(i) => sim.input(*i),
            Node::Gate(g) => {
                let fanins: Vec<S::Value> = g.inputs().iter().map(|&s| edge(&values, s)).collect();
                match g.gate_type() {
                    GateType::And => sim.and(&fanins[0], &fanins[1]),
                    GateType::Or => sim.or(&fanins[0], &fanins[1]),
                    GateType::Xor => sim.xor(&fanins[0], &fanins[1]),
                    GateType::Maj => sim.maj(&fanins[0], &fanins[1], &fanins[2]),
                }
            }
        };
        values[id] = Some(value);
    }

    network.outputs().iter().map(|&s| edge(&values, s)).collect()
}

/// Decision-diagram domain; input `i` is variable `i + 1` of the manager.
pub struct BddSimulator<'a> {
    bdd: &'a Bdd,
}

impl<'a> BddSimulator<'a> {
    pub fn new(bdd: &'a Bdd) -> Self {
        Self { bdd }
    }
}

impl Simulator for BddSimulator<'_> {
    type Value = Ref;

    fn constant(&self, value: bool) -> Ref {
        if value {
            self.bdd.one()
        } else {
            self.bdd.zero()
        }
    }

    fn input(&self, index: usize) -> Ref {
        self.bdd.mk_var(index as u32 + 1)
    }

    fn complement(&self, value: &Ref) -> Ref {
        -*value
    }

    fn and(&self, a: &Ref, b: &Ref) -> Ref {
        self.bdd.apply_and(*a, *b)
    }

    fn or(&self, a: &Ref, b: &Ref) -> Ref {
        self.bdd.apply_or(*a, *b)
    }

    fn xor(&self, a: &Ref, b: &Ref) -> Ref {
        self.bdd.apply_xor(*a, *b)
    }

    fn maj(&self, a: &Ref, b: &Ref, c: &Ref) -> Ref {
        self.bdd.apply_maj(*a, *b, *c)
    }
}

/// Bit-parallel domain over all `2^num_vars` assignments at once.
pub struct TruthTableSimulator {
    num_vars: usize,
}

impl TruthTableSimulator {
    /// # Panics
    ///
    /// Panics if `num_vars` exceeds [`MAX_VARS`][crate::truth_table::MAX_VARS].
    pub fn new(num_vars: usize) -> Self {
        num_rows(num_vars);
        Self { num_vars }
    }
}

impl Simulator for TruthTableSimulator {
    type Value = TruthTable;

    fn constant(&self, value: bool) -> TruthTable {
        if value {
            TruthTable::one(self.num_vars)
        } else {
            TruthTable::zero(self.num_vars)
        }
    }

    fn input(&self, index: usize) -> TruthTable {
        TruthTable::var(self.num_vars, index)
    }

    fn complement(&self, value: &TruthTable) -> TruthTable {
        value.complement()
    }

    fn and(&self, a: &TruthTable, b: &TruthTable) -> TruthTable {
        a.and(b)
    }

    fn or(&self, a: &TruthTable, b: &TruthTable) -> TruthTable {
        a.or(b)
    }

    fn xor(&self, a: &TruthTable, b: &TruthTable) -> TruthTable {
        a.xor(b)
    }

    fn maj(&self, a: &TruthTable, b: &TruthTable, c: &TruthTable) -> TruthTable {
        a.maj(b, c)
    }
}

/// Single input assignment.
pub struct PatternSimulator<'a> {
    assignment: &'a [bool],
}

impl<'a> PatternSimulator<'a> {
    pub fn new(assignment: &'a [bool]) -> Self {
        Self { assignment }
    }
}

impl Simulator for PatternSimulator<'_> {
    type Value = bool;

    fn constant(&self, value: bool) -> bool {
        value
    }

    fn input(&self, index: usize) -> bool {
        self.assignment[index]
    }

    fn complement(&self, value: &bool) -> bool {
        !value
    }

    fn and(&self, a: &bool, b: &bool) -> bool {
        *a && *b
    }

    fn or(&self, a: &bool, b: &bool) -> bool {
        *a || *b
    }

    fn xor(&self, a: &bool, b: &bool) -> bool {
        a ^ b
    }

    fn maj(&self, a: &bool, b: &bool, c: &bool) -> bool {
        (*a && *b) || (*a && *c) || (*b && *c)
    }
}

/// Exact semantics of every output, in a fresh manager owned by the result.
pub fn simulate(network: &Network, config: &BddConfig) -> BooleanFunctionSet {
    BooleanFunctionSet::build(config, network.input_names().to_vec(), |bdd| {
        let roots = simulate_with(network, &BddSimulator::new(bdd));
        info!(
            "simulate: {} outputs of '{}' into {} decision-diagram nodes ({} cache hits, {} misses)",
            roots.len(),
            network.name(),
            bdd.num_nodes(),
            bdd.cache_hits(),
            bdd.cache_misses()
        );
        network.output_names().iter().cloned().zip(roots).collect()
    })
}

/// Truth tables of every output.
///
/// Enumerates `2^n` rows per table; [`convert`][crate::convert::convert]
/// checks the input count against a configurable limit first.
///
/// # Panics
///
/// Panics if the network has more than [`MAX_VARS`][crate::truth_table::MAX_VARS] inputs.
pub fn simulate_truth_tables(network: &Network) -> TruthTableSet {
    let tables = simulate_with(network, &TruthTableSimulator::new(network.num_inputs()));
    let mut set = TruthTableSet::new(network.input_names().to_vec());
    for (name, table) in network.output_names().iter().zip(tables) {
        set.add_output(name.clone(), table);
    }
    set
}

/// Value of an expression in the domain of `sim`.
///
/// Expression inputs map to simulator inputs by position.
pub fn simulate_expression<S: Simulator>(expr: &Expression, sim: &S) -> S::Value {
    let mut values: Vec<Option<S::Value>> = vec![None; expr.nodes().len()];
    for id in expr.reachable() {
        let get = |i: ExprId| values[i].clone().unwrap_or_else(|| panic!("e{} is used before it is evaluated", i));
        let value = match expr.node(id) {
            ExprNode::Const(b) => sim.constant(b),
            ExprNode::Var(i) => sim.input(i),
            ExprNode::Not(a) => sim.complement(&get(a)),
            ExprNode::And(a, b) => sim.and(&get(a), &get(b)),
            ExprNode::Or(a, b) => sim.or(&get(a), &get(b)),
            ExprNode::Xor(a, b) => sim.xor(&get(a), &get(b)),
            ExprNode::Maj(a, b, c) => sim.maj(&get(a), &get(b), &get(c)),
        };
        values[id] = Some(value);
    }
    values[expr.root()]
        .take()
        .unwrap_or_else(|| panic!("Root e{} was not evaluated", expr.root()))
}

/// Output values under one input assignment.
pub fn evaluate(network: &Network, assignment: &[bool]) -> Vec<bool> {
    assert_eq!(
        assignment.len(),
        network.num_inputs(),
        "Expected {} inputs, got {}",
        network.num_inputs(),
        assignment.len()
    );
    simulate_with(network, &PatternSimulator::new(assignment))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::network::NetworkKind;

    fn full_adder(kind: NetworkKind) -> Network {
        let mut net = Network::new(kind);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");
        let ab = net.create_xor(a, b);
        let sum = net.create_xor(ab, c);
        let carry = net.create_maj(a, b, c);
        net.add_output("sum", sum);
        net.add_output("carry", carry);
        net
    }

    #[test]
    fn test_simulators_agree() {
        for kind in [NetworkKind::Aig, NetworkKind::Mig, NetworkKind::Mixed] {
            let net = full_adder(kind);
            let set = simulate(&net, &BddConfig::default());
            let tables = simulate_truth_tables(&net);

            for i in 0..8usize {
                let v = [(i & 1) != 0, (i & 2) != 0, (i & 4) != 0];
                let out = evaluate(&net, &v);
                let ones = v.iter().filter(|&&x| x).count();
                assert_eq!(out, vec![ones % 2 == 1, ones >= 2], "{:?} at {:?}", kind, v);
                assert_eq!(set.eval(0, &v), out[0]);
                assert_eq!(set.eval(1, &v), out[1]);
                assert_eq!(tables.output(0).get(i), out[0]);
                assert_eq!(tables.output(1).get(i), out[1]);
            }
        }
    }

    #[test]
    fn test_complemented_output() {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let f = net.create_and(a, b);
        net.add_output("nand", !f);
        net.add_output("zero", Signal::zero());
        net.add_output("one", Signal::one());

        let set = simulate(&net, &BddConfig::default());
        assert_eq!(set.output(0), -set.bdd().apply_and(set.bdd().mk_var(1), set.bdd().mk_var(2)));
        assert_eq!(set.output(1), set.bdd().zero());
        assert_eq!(set.output(2), set.bdd().one());
        assert_eq!(set.minterm_count(0), 3.0);
    }

    #[test]
    fn test_same_function_same_handle() {
        let aig = full_adder(NetworkKind::Aig);
        let mig = full_adder(NetworkKind::Mig);

        let bdd = Bdd::default();
        let sim = BddSimulator::new(&bdd);
        let f = simulate_with(&aig, &sim);
        let g = simulate_with(&mig, &sim);
        assert_eq!(f, g);
    }

    #[test]
    fn test_simulate_expression() {
        let mut b = crate::expr::ExpressionBuilder::with_inputs(3);
        let (x0, x1, x2) = (b.var(0), b.var(1), b.var(2));
        let m = b.maj(x0, x1, x2);
        let nx = b.not(x0);
        let root = b.xor(m, nx);
        let expr = b.build(root, "f");

        let table = simulate_expression(&expr, &TruthTableSimulator::new(3));
        let bdd = Bdd::default();
        let f = simulate_expression(&expr, &BddSimulator::new(&bdd));
        for i in 0..8usize {
            let v = [(i & 1) != 0, (i & 2) != 0, (i & 4) != 0];
            assert_eq!(table.get(i), expr.eval(&v));
            assert_eq!(bdd.eval(f, &v), expr.eval(&v));
            assert_eq!(simulate_expression(&expr, &PatternSimulator::new(&v)), expr.eval(&v));
        }
    }

    #[test]
    #[should_panic(expected = "limited to 32 variables, got 70")]
    fn test_truth_tables_of_wide_network() {
        let mut net = Network::new(NetworkKind::Aig);
        let inputs: Vec<_> = (0..70).map(|i| net.add_input(format!("x{}", i))).collect();
        net.add_output("f", inputs[0]);
        simulate_truth_tables(&net);
    }
}
