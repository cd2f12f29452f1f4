//! Gate-level Boolean networks.
//!
//! A [`Network`] is an arena of nodes in topological order: node 0 is the
//! constant, inputs and gates follow, and a gate may only reference nodes that
//! already exist. Inverters are implicit, occupying the polarity bit of a
//! [`Signal`]. Gates are normalized and structurally hashed on insertion, so
//! building the same gate twice yields the same node.
//!
//! Which gates may appear is decided by the [`NetworkKind`]. The `create_*`
//! builders accept every operation on every kind and decompose into the
//! native gates when needed.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{Error, Result};
use crate::gate::{Gate, GateType};
use crate::signal::{NodeId, Signal};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NetworkKind {
    /// And-inverter graph.
    Aig,
    /// Majority-inverter graph.
    Mig,
    /// And, Or, Xor and Maj gates together.
    Mixed,
}

impl NetworkKind {
    pub fn is_native(self, gate_type: GateType) -> bool {
        match self {
            NetworkKind::Aig => gate_type == GateType::And,
            NetworkKind::Mig => gate_type == GateType::Maj,
            NetworkKind::Mixed => true,
        }
    }
}

impl Display for NetworkKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NetworkKind::Aig => "AIG",
            NetworkKind::Mig => "MIG",
            NetworkKind::Mixed => "mixed network",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Constant,
    /// Primary input with its position among the inputs.
    Input(usize),
    Gate(Gate),
}

#[derive(Debug, Clone)]
pub struct Network {
    kind: NetworkKind,
    name: String,
    nodes: Vec<Node>,
    inputs: Vec<NodeId>,
    input_names: Vec<String>,
    outputs: Vec<Signal>,
    output_names: Vec<String>,
    strash: HashMap<Gate, NodeId>,
}

/// Result of normalizing a gate before insertion.
enum Normalized {
    /// The gate folded into an existing signal.
    Folded(Signal),
    /// Canonical gate and whether its output must be complemented.
    Gate(Gate, bool),
}

fn sorted2(a: Signal, b: Signal) -> (Signal, Signal) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn normalize(gate: Gate) -> Normalized {
    match gate.gate_type() {
        GateType::And => {
            let (a, b) = sorted2(gate.inputs()[0], gate.inputs()[1]);
            if a == Signal::zero() || a == !b {
                Normalized::Folded(Signal::zero())
            } else if a == Signal::one() || a == b {
                Normalized::Folded(b)
            } else {
                Normalized::Gate(Gate::and(a, b), false)
            }
        }
        GateType::Or => {
            let (a, b) = sorted2(gate.inputs()[0], gate.inputs()[1]);
            if a == Signal::one() || a == !b {
                Normalized::Folded(Signal::one())
            } else if a == Signal::zero() || a == b {
                Normalized::Folded(b)
            } else {
                Normalized::Gate(Gate::or(a, b), false)
            }
        }
        GateType::Xor => {
            let [a, b] = [gate.inputs()[0], gate.inputs()[1]];
            let complemented = a.is_complemented() ^ b.is_complemented();
            let (a, b) = sorted2(a.regular(), b.regular());
            if a == Signal::zero() {
                Normalized::Folded(b ^ complemented)
            } else if a == b {
                Normalized::Folded(Signal::zero() ^ complemented)
            } else {
                Normalized::Gate(Gate::xor(a, b), complemented)
            }
        }
        GateType::Maj => {
            let mut s = [gate.inputs()[0], gate.inputs()[1], gate.inputs()[2]];
            s.sort();
            let [a, b, c] = s;
            if a == b || b == c {
                return Normalized::Folded(b);
            }
            if a == !b {
                return Normalized::Folded(c);
            }
            if b == !c {
                return Normalized::Folded(a);
            }
            if a == !c {
                return Normalized::Folded(b);
            }
            // Self-duality: maj(!a,!b,!c) = !maj(a,b,c).
            let complemented = s.iter().filter(|x| x.is_complemented()).count() >= 2;
            if complemented {
                s = s.map(|x| !x);
                s.sort();
            }
            Normalized::Gate(Gate::maj(s[0], s[1], s[2]), complemented)
        }
    }
}

/// Substitute `index` into `pattern` at `{}`, or append it when there is no placeholder.
fn expand_pattern(pattern: &str, index: usize) -> String {
    if pattern.contains("{}") {
        pattern.replace("{}", &index.to_string())
    } else {
        format!("{}{}", pattern, index)
    }
}

// Constructors
impl Network {
    pub fn new(kind: NetworkKind) -> Self {
        Self {
            kind,
            name: String::new(),
            nodes: vec![Node::Constant],
            inputs: Vec::new(),
            input_names: Vec::new(),
            outputs: Vec::new(),
            output_names: Vec::new(),
            strash: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

// Getters
impl Network {
    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of nodes, the constant and the inputs included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn num_gates(&self) -> usize {
        self.nodes.len() - 1 - self.inputs.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn gate(&self, id: NodeId) -> Option<&Gate> {
        match &self.nodes[id] {
            Node::Gate(g) => Some(g),
            _ => None,
        }
    }

    pub fn is_gate(&self, id: NodeId) -> bool {
        matches!(self.nodes[id], Node::Gate(_))
    }

    pub fn is_input(&self, id: NodeId) -> bool {
        matches!(self.nodes[id], Node::Input(_))
    }

    /// Fan-ins of a node; empty for the constant and the inputs.
    pub fn fanins(&self, id: NodeId) -> &[Signal] {
        match &self.nodes[id] {
            Node::Gate(g) => g.inputs(),
            _ => &[],
        }
    }

    /// All nodes in topological order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Internal nodes in topological order.
    pub fn gates(&self) -> impl Iterator<Item = (NodeId, &Gate)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(id, node)| match node {
            Node::Gate(g) => Some((id, g)),
            _ => None,
        })
    }

    pub fn input(&self, index: usize) -> Signal {
        Signal::from_node(self.inputs[index])
    }

    pub fn inputs(&self) -> impl Iterator<Item = Signal> + '_ {
        self.inputs.iter().map(|&id| Signal::from_node(id))
    }

    pub fn input_name(&self, index: usize) -> &str {
        &self.input_names[index]
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.input_names.iter().position(|n| n == name)
    }

    pub fn output(&self, index: usize) -> Signal {
        self.outputs[index]
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    pub fn output_name(&self, index: usize) -> &str {
        &self.output_names[index]
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.output_names.iter().position(|n| n == name)
    }
}

// Construction
impl Network {
    pub fn add_input(&mut self, name: impl Into<String>) -> Signal {
        let id = self.nodes.len();
        self.nodes.push(Node::Input(self.inputs.len()));
        self.inputs.push(id);
        self.input_names.push(name.into());
        Signal::from_node(id)
    }

    pub fn add_output(&mut self, name: impl Into<String>, signal: Signal) {
        assert!(
            signal.node() < self.nodes.len(),
            "Output {} does not exist",
            signal
        );
        self.outputs.push(signal);
        self.output_names.push(name.into());
    }

    /// Redirect an existing output to another signal.
    pub fn set_output(&mut self, index: usize, signal: Signal) {
        assert!(
            signal.node() < self.nodes.len(),
            "Output {} does not exist",
            signal
        );
        self.outputs[index] = signal;
    }

    /// Add a native gate, normalized and hash-consed.
    ///
    /// Panics when the gate type is not native to the network kind or when a
    /// fan-in references a missing node.
    pub fn add_gate(&mut self, gate: Gate) -> Signal {
        assert!(
            self.kind.is_native(gate.gate_type()),
            "{} gates are not native to {}",
            gate.gate_type(),
            self.kind
        );
        for s in gate.inputs() {
            assert!(
                s.node() < self.nodes.len(),
                "Fan-in {} of {} does not exist",
                s,
                gate
            );
        }

        match normalize(gate) {
            Normalized::Folded(s) => {
                debug!("add_gate: {} folded to {}", gate, s);
                s
            }
            Normalized::Gate(g, complemented) => {
                let id = match self.strash.get(&g) {
                    Some(&id) => {
                        debug!("add_gate: {} is n{}", g, id);
                        id
                    }
                    None => {
                        let id = self.nodes.len();
                        self.nodes.push(Node::Gate(g));
                        self.strash.insert(g, id);
                        id
                    }
                };
                Signal::new(id, complemented)
            }
        }
    }

    pub fn create_not(&mut self, a: Signal) -> Signal {
        !a
    }

    pub fn create_and(&mut self, a: Signal, b: Signal) -> Signal {
        match self.kind {
            NetworkKind::Aig | NetworkKind::Mixed => self.add_gate(Gate::and(a, b)),
            NetworkKind::Mig => self.add_gate(Gate::maj(a, b, Signal::zero())),
        }
    }

    pub fn create_or(&mut self, a: Signal, b: Signal) -> Signal {
        match self.kind {
            NetworkKind::Aig => !self.add_gate(Gate::and(!a, !b)),
            NetworkKind::Mig => self.add_gate(Gate::maj(a, b, Signal::one())),
            NetworkKind::Mixed => self.add_gate(Gate::or(a, b)),
        }
    }

    pub fn create_xor(&mut self, a: Signal, b: Signal) -> Signal {
        match self.kind {
            NetworkKind::Aig => {
                let p = self.create_and(a, !b);
                let q = self.create_and(!a, b);
                !self.create_and(!p, !q)
            }
            NetworkKind::Mig => {
                let either = self.create_or(a, b);
                let both = self.create_and(a, b);
                self.create_and(either, !both)
            }
            NetworkKind::Mixed => self.add_gate(Gate::xor(a, b)),
        }
    }

    pub fn create_maj(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        match self.kind {
            NetworkKind::Mig | NetworkKind::Mixed => self.add_gate(Gate::maj(a, b, c)),
            NetworkKind::Aig => {
                let fanins = [a, b, c];
                if let Some(k) = fanins.iter().position(|s| s.is_const()) {
                    let x = fanins[(k + 1) % 3];
                    let y = fanins[(k + 2) % 3];
                    return if fanins[k] == Signal::zero() {
                        self.create_and(x, y)
                    } else {
                        self.create_or(x, y)
                    };
                }
                let both = self.create_and(a, b);
                let either = self.create_or(a, b);
                let rest = self.create_and(c, either);
                self.create_or(both, rest)
            }
        }
    }

    pub fn create_nand(&mut self, a: Signal, b: Signal) -> Signal {
        !self.create_and(a, b)
    }

    pub fn create_nor(&mut self, a: Signal, b: Signal) -> Signal {
        !self.create_or(a, b)
    }

    pub fn create_xnor(&mut self, a: Signal, b: Signal) -> Signal {
        !self.create_xor(a, b)
    }

    /// If-then-else: `s ? t : e`.
    pub fn create_mux(&mut self, s: Signal, t: Signal, e: Signal) -> Signal {
        let then = self.create_and(s, t);
        let other = self.create_and(!s, e);
        self.create_or(then, other)
    }

    /// Balanced conjunction; the empty conjunction is one.
    pub fn create_and_many(&mut self, signals: impl IntoIterator<Item = Signal>) -> Signal {
        let signals = signals.into_iter().collect();
        self.reduce_balanced(signals, Signal::one(), Self::create_and)
    }

    /// Balanced disjunction; the empty disjunction is zero.
    pub fn create_or_many(&mut self, signals: impl IntoIterator<Item = Signal>) -> Signal {
        let signals = signals.into_iter().collect();
        self.reduce_balanced(signals, Signal::zero(), Self::create_or)
    }

    pub fn create_xor_many(&mut self, signals: impl IntoIterator<Item = Signal>) -> Signal {
        let signals = signals.into_iter().collect();
        self.reduce_balanced(signals, Signal::zero(), Self::create_xor)
    }

    fn reduce_balanced(
        &mut self,
        mut level: Vec<Signal>,
        empty: Signal,
        op: fn(&mut Self, Signal, Signal) -> Signal,
    ) -> Signal {
        if level.is_empty() {
            return empty;
        }
        while level.len() > 1 {
            let mut next = Vec::with_capacity((level.len() + 1) / 2);
            for pair in level.chunks(2) {
                next.push(match *pair {
                    [a, b] => op(self, a, b),
                    [a] => a,
                    _ => unreachable!(),
                });
            }
            level = next;
        }
        level[0]
    }
}

// Traversal
impl Network {
    /// Nodes in the transitive fan-in of `roots`, marked by node id.
    pub(crate) fn cone_mask(&self, roots: &[Signal]) -> Vec<bool> {
        let mut mark = vec![false; self.nodes.len()];
        let mut stack: Vec<NodeId> = roots.iter().map(|s| s.node()).collect();
        while let Some(id) = stack.pop() {
            if mark[id] {
                continue;
            }
            mark[id] = true;
            stack.extend(self.fanins(id).iter().map(|s| s.node()).filter(|&f| !mark[f]));
        }
        mark
    }

    /// Nodes of the cone of `roots` in topological order.
    pub fn topological_order(&self, roots: &[Signal]) -> Vec<NodeId> {
        self.cone_mask(roots)
            .into_iter()
            .enumerate()
            .filter_map(|(id, m)| m.then_some(id))
            .collect()
    }

    /// Copy the selected outputs and their cone into a fresh network.
    ///
    /// All inputs are kept in their original order.
    fn extract(&self, outputs: &[usize]) -> Network {
        let mut net = Network::new(self.kind).with_name(self.name.clone());
        let mut map = vec![Signal::zero(); self.nodes.len()];
        for (i, &id) in self.inputs.iter().enumerate() {
            map[id] = net.add_input(self.input_names[i].clone());
        }

        let roots: Vec<Signal> = outputs.iter().map(|&o| self.outputs[o]).collect();
        for id in self.topological_order(&roots) {
            if let Node::Gate(g) = &self.nodes[id] {
                let fanins: Vec<Signal> = g
                    .inputs()
                    .iter()
                    .map(|&s| map[s.node()] ^ s.is_complemented())
                    .collect();
                map[id] = net.add_gate(g.with_inputs(&fanins));
            }
        }

        for &o in outputs {
            let s = self.outputs[o];
            net.add_output(self.output_names[o].clone(), map[s.node()] ^ s.is_complemented());
        }
        net
    }

    /// Network restricted to the outputs at `indices` and their transitive fan-in.
    pub fn cone(&self, indices: &[usize]) -> Result<Network> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.outputs.len()) {
            return Err(Error::InvalidReference(format!(
                "output index {} out of range (network has {} outputs)",
                bad,
                self.outputs.len()
            )));
        }
        Ok(self.extract(indices))
    }

    /// [`cone`][Network::cone] with outputs selected by name.
    pub fn cone_by_names(&self, names: &[&str]) -> Result<Network> {
        let indices = names
            .iter()
            .map(|name| {
                self.output_index(name)
                    .ok_or_else(|| Error::InvalidReference(format!("unknown output '{}'", name)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.extract(&indices))
    }

    /// Copy of the network without dangling nodes.
    pub fn cleanup(&self) -> Network {
        let all: Vec<usize> = (0..self.outputs.len()).collect();
        let net = self.extract(&all);
        debug!(
            "cleanup: {} -> {} gates",
            self.num_gates(),
            net.num_gates()
        );
        net
    }
}

// Naming
impl Network {
    /// Rename inputs and outputs from `(old, new)` pairs.
    ///
    /// Every old name is resolved before anything is renamed.
    pub fn rename(&mut self, inputs: &[(&str, &str)], outputs: &[(&str, &str)]) -> Result<()> {
        let input_ids = inputs
            .iter()
            .map(|(old, _)| {
                self.input_index(old)
                    .ok_or_else(|| Error::InvalidReference(format!("unknown input '{}'", old)))
            })
            .collect::<Result<Vec<_>>>()?;
        let output_ids = outputs
            .iter()
            .map(|(old, _)| {
                self.output_index(old)
                    .ok_or_else(|| Error::InvalidReference(format!("unknown output '{}'", old)))
            })
            .collect::<Result<Vec<_>>>()?;

        for (i, (_, new)) in input_ids.into_iter().zip(inputs) {
            self.input_names[i] = new.to_string();
        }
        for (i, (_, new)) in output_ids.into_iter().zip(outputs) {
            self.output_names[i] = new.to_string();
        }
        Ok(())
    }

    /// Replace every input and output name by a numbered pattern, e.g. `"x{}"`.
    ///
    /// Numbering starts at 1.
    pub fn make_names_unique(&mut self, input_pattern: &str, output_pattern: &str) {
        for (i, name) in self.input_names.iter_mut().enumerate() {
            *name = expand_pattern(input_pattern, i + 1);
        }
        for (i, name) in self.output_names.iter_mut().enumerate() {
            *name = expand_pattern(output_pattern, i + 1);
        }
    }
}

// Validation
impl Network {
    /// Verify the structural invariants.
    pub fn check(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Invariant(msg));

        if self.nodes.first() != Some(&Node::Constant) {
            return fail("node 0 is not the constant".to_string());
        }
        if self.inputs.len() != self.input_names.len() || self.outputs.len() != self.output_names.len() {
            return fail("names do not match the interface".to_string());
        }
        for (i, &id) in self.inputs.iter().enumerate() {
            if self.nodes.get(id) != Some(&Node::Input(i)) {
                return fail(format!("input {} does not point to its node", i));
            }
        }
        for (id, node) in self.nodes.iter().enumerate().skip(1) {
            match node {
                Node::Constant => return fail(format!("extra constant at n{}", id)),
                Node::Input(i) => {
                    if self.inputs.get(*i) != Some(&id) {
                        return fail(format!("n{} is not registered as input {}", id, i));
                    }
                }
                Node::Gate(g) => {
                    if !self.kind.is_native(g.gate_type()) {
                        return fail(format!("n{} = {} in {}", id, g, self.kind));
                    }
                    if let Some(s) = g.inputs().iter().find(|s| s.node() >= id) {
                        return fail(format!("n{} = {} references {} out of order", id, g, s));
                    }
                    if self.strash.get(g) != Some(&id) {
                        return fail(format!("n{} = {} is not hashed", id, g));
                    }
                }
            }
        }
        if let Some(s) = self.outputs.iter().find(|s| s.node() >= self.nodes.len()) {
            return fail(format!("output {} does not exist", s));
        }
        Ok(())
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}': {} inputs, {} outputs, {} gates",
            self.kind,
            self.name,
            self.num_inputs(),
            self.num_outputs(),
            self.num_gates()
        )
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_and_folding() {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");

        assert_eq!(net.create_and(a, Signal::zero()), Signal::zero());
        assert_eq!(net.create_and(Signal::one(), a), a);
        assert_eq!(net.create_and(a, a), a);
        assert_eq!(net.create_and(a, !a), Signal::zero());
        assert_eq!(net.num_gates(), 0);

        let ab = net.create_and(a, b);
        assert_eq!(net.create_and(b, a), ab);
        assert_eq!(net.num_gates(), 1);
    }

    #[test]
    fn test_hash_consing_is_idempotent() {
        let mut net = Network::new(NetworkKind::Mixed);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");

        let g1 = net.create_xor(a, !b);
        let g2 = net.create_maj(a, b, c);
        let n = net.num_nodes();
        assert_eq!(net.create_xor(!b, a), g1);
        assert_eq!(net.create_maj(c, a, b), g2);
        assert_eq!(net.num_nodes(), n);
    }

    #[test]
    fn test_or_folding() {
        let mut net = Network::new(NetworkKind::Mixed);
        let a = net.add_input("a");

        assert_eq!(net.create_or(a, Signal::one()), Signal::one());
        assert_eq!(net.create_or(Signal::zero(), a), a);
        assert_eq!(net.create_or(a, a), a);
        assert_eq!(net.create_or(!a, a), Signal::one());
        assert_eq!(net.num_gates(), 0);
    }

    #[test]
    fn test_xor_polarity() {
        let mut net = Network::new(NetworkKind::Mixed);
        let a = net.add_input("a");
        let b = net.add_input("b");

        assert_eq!(net.create_xor(a, Signal::zero()), a);
        assert_eq!(net.create_xor(a, Signal::one()), !a);
        assert_eq!(net.create_xor(a, a), Signal::zero());
        assert_eq!(net.create_xor(a, !a), Signal::one());

        let x = net.create_xor(a, b);
        assert!(!x.is_complemented());
        assert_eq!(net.create_xor(!a, b), !x);
        assert_eq!(net.create_xor(!a, !b), x);
        assert_eq!(net.num_gates(), 1);
    }

    #[test]
    fn test_maj_normalization() {
        let mut net = Network::new(NetworkKind::Mig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");

        assert_eq!(net.create_maj(a, a, b), a);
        assert_eq!(net.create_maj(a, !a, c), c);
        assert_eq!(net.create_maj(b, c, !b), c);

        let m = net.create_maj(a, b, c);
        assert_eq!(net.create_maj(!a, !b, !c), !m);
        assert_eq!(net.num_gates(), 1);

        // and(!a,!b) = maj(!a,!b,0) = !maj(a,b,1) = !or(a,b)
        let nor = net.create_and(!a, !b);
        let or = net.create_or(a, b);
        assert_eq!(nor, !or);
    }

    #[test]
    fn test_aig_xor_shape() {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let x = net.create_xor(a, b);
        net.add_output("f", x);

        assert_eq!(net.num_gates(), 3);
        assert_eq!(net.create_xor(a, Signal::zero()), a);
        assert_eq!(net.num_gates(), 3);
    }

    #[test]
    fn test_aig_degenerate_maj() {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");

        let and = net.create_and(a, b);
        assert_eq!(net.create_maj(a, Signal::zero(), b), and);
        let or = net.create_or(a, b);
        assert_eq!(net.create_maj(Signal::one(), a, b), or);
    }

    #[test]
    #[should_panic(expected = "not native")]
    fn test_non_native_gate_panics() {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        net.add_gate(Gate::xor(a, b));
    }

    #[test]
    fn test_many() {
        let mut net = Network::new(NetworkKind::Aig);
        let xs: Vec<Signal> = (0..5).map(|i| net.add_input(format!("x{}", i))).collect();

        assert_eq!(net.create_and_many(std::iter::empty()), Signal::one());
        assert_eq!(net.create_or_many(std::iter::empty()), Signal::zero());
        assert_eq!(net.create_and_many([xs[0]]), xs[0]);

        net.create_and_many(xs.iter().copied());
        assert_eq!(net.num_gates(), 4);
    }

    #[test]
    fn test_topological_order() {
        let mut net = Network::new(NetworkKind::Aig);
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");
        let ab = net.create_and(a, b);
        let _bc = net.create_and(b, c);
        let f = net.create_and(ab, !c);

        let order = net.topological_order(&[f]);
        assert_eq!(order, vec![a.node(), b.node(), c.node(), ab.node(), f.node()]);
    }

    fn sample() -> Network {
        let mut net = Network::new(NetworkKind::Aig).with_name("sample");
        let a = net.add_input("a");
        let b = net.add_input("b");
        let c = net.add_input("c");
        let ab = net.create_and(a, b);
        let bc = net.create_and(b, !c);
        let _dangling = net.create_and(a, c);
        net.add_output("f", !ab);
        net.add_output("g", bc);
        net
    }

    #[test]
    fn test_cone() {
        let net = sample();

        let cone = net.cone_by_names(&["g"]).unwrap();
        assert_eq!(cone.num_inputs(), 3);
        assert_eq!(cone.num_outputs(), 1);
        assert_eq!(cone.num_gates(), 1);
        assert_eq!(cone.output_name(0), "g");
        assert!(cone.check().is_ok());

        assert!(matches!(
            net.cone_by_names(&["nope"]),
            Err(Error::InvalidReference(_))
        ));
        assert!(matches!(net.cone(&[2]), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn test_cleanup() {
        let net = sample();
        assert_eq!(net.num_gates(), 3);

        let clean = net.cleanup();
        assert_eq!(clean.num_gates(), 2);
        assert_eq!(clean.output_names(), net.output_names());
        assert!(clean.output(0).is_complemented());
        assert!(clean.check().is_ok());
    }

    #[test]
    fn test_rename() {
        let mut net = sample();

        net.rename(&[("a", "x")], &[("g", "h")]).unwrap();
        assert_eq!(net.input_name(0), "x");
        assert_eq!(net.output_name(1), "h");

        let result = net.rename(&[("b", "y")], &[("missing", "z")]);
        assert!(matches!(result, Err(Error::InvalidReference(_))));
        // Nothing is renamed on failure.
        assert_eq!(net.input_name(1), "b");
    }

    #[test]
    fn test_make_names_unique() {
        let mut net = sample();

        net.make_names_unique("in_{}", "out");
        assert_eq!(net.input_names(), &["in_1", "in_2", "in_3"]);
        assert_eq!(net.output_names(), &["out1", "out2"]);
    }

    #[test]
    fn test_check() {
        let net = sample();
        assert!(net.check().is_ok());
        assert_eq!(net.to_string(), "AIG 'sample': 3 inputs, 2 outputs, 3 gates");
    }
}
