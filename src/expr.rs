//! Boolean expressions as a hash-consed arena.
//!
//! Structurally identical subexpressions share one [`ExprId`]. Children are
//! always created before their parents, so arena order is a valid evaluation
//! order.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::debug;

pub type ExprId = usize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExprNode {
    Const(bool),
    /// Input by position.
    Var(usize),
    Not(ExprId),
    And(ExprId, ExprId),
    Or(ExprId, ExprId),
    Xor(ExprId, ExprId),
    Maj(ExprId, ExprId, ExprId),
}

impl ExprNode {
    pub fn children(&self) -> Vec<ExprId> {
        match *self {
            ExprNode::Const(_) | ExprNode::Var(_) => vec![],
            ExprNode::Not(a) => vec![a],
            ExprNode::And(a, b) | ExprNode::Or(a, b) | ExprNode::Xor(a, b) => vec![a, b],
            ExprNode::Maj(a, b, c) => vec![a, b, c],
        }
    }
}

/// Single-output expression over named inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    nodes: Vec<ExprNode>,
    inputs: Vec<String>,
    output: String,
    root: ExprId,
}

impl Expression {
    pub fn root(&self) -> ExprId {
        self.root
    }

    pub fn node(&self, id: ExprId) -> ExprNode {
        self.nodes[id]
    }

    pub fn nodes(&self) -> &[ExprNode] {
        &self.nodes
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn input_names(&self) -> &[String] {
        &self.inputs
    }

    pub fn output_name(&self) -> &str {
        &self.output
    }

    pub fn set_output_name(&mut self, name: impl Into<String>) {
        self.output = name.into();
    }

    /// Ids reachable from the root, children first.
    pub fn reachable(&self) -> Vec<ExprId> {
        let mut mark = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !mark[id] {
                mark[id] = true;
                stack.extend(self.nodes[id].children());
            }
        }
        (0..self.nodes.len()).filter(|&id| mark[id]).collect()
    }

    /// Number of operator nodes reachable from the root.
    pub fn num_operators(&self) -> usize {
        self.reachable()
            .into_iter()
            .filter(|&id| !matches!(self.nodes[id], ExprNode::Const(_) | ExprNode::Var(_)))
            .count()
    }

    pub fn eval(&self, assignment: &[bool]) -> bool {
        assert_eq!(assignment.len(), self.inputs.len(), "Expected {} inputs", self.inputs.len());
        let mut values = vec![false; self.nodes.len()];
        for id in self.reachable() {
            values[id] = match self.nodes[id] {
                ExprNode::Const(b) => b,
                ExprNode::Var(i) => assignment[i],
                ExprNode::Not(a) => !values[a],
                ExprNode::And(a, b) => values[a] && values[b],
                ExprNode::Or(a, b) => values[a] || values[b],
                ExprNode::Xor(a, b) => values[a] ^ values[b],
                ExprNode::Maj(a, b, c) => {
                    (values[a] && values[b]) || (values[a] && values[c]) || (values[b] && values[c])
                }
            };
        }
        values[self.root]
    }
}

/// Infix form: `!a`, `(a & b)`, `(a | b)`, `(a ^ b)`, `<a b c>` for majority.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut text: Vec<String> = vec![String::new(); self.nodes.len()];
        for id in self.reachable() {
            text[id] = match self.nodes[id] {
                ExprNode::Const(b) => (b as u8).to_string(),
                ExprNode::Var(i) => self.inputs[i].clone(),
                ExprNode::Not(a) => format!("!{}", text[a]),
                ExprNode::And(a, b) => format!("({} & {})", text[a], text[b]),
                ExprNode::Or(a, b) => format!("({} | {})", text[a], text[b]),
                ExprNode::Xor(a, b) => format!("({} ^ {})", text[a], text[b]),
                ExprNode::Maj(a, b, c) => format!("<{} {} {}>", text[a], text[b], text[c]),
            };
        }
        write!(f, "{} = {}", self.output, text[self.root])
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionBuilder {
    nodes: Vec<ExprNode>,
    index: HashMap<ExprNode, ExprId>,
    inputs: Vec<String>,
}

impl ExpressionBuilder {
    pub fn new(inputs: Vec<String>) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            inputs,
        }
    }

    /// Builder over inputs named `x0, x1, ...`.
    pub fn with_inputs(num_inputs: usize) -> Self {
        Self::new((0..num_inputs).map(|i| format!("x{}", i)).collect())
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn put(&mut self, node: ExprNode) -> ExprId {
        if let Some(&id) = self.index.get(&node) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        self.index.insert(node, id);
        id
    }

    fn as_const(&self, id: ExprId) -> Option<bool> {
        match self.nodes[id] {
            ExprNode::Const(b) => Some(b),
            _ => None,
        }
    }

    /// Whether one of `a`, `b` is the negation of the other.
    fn complementary(&self, a: ExprId, b: ExprId) -> bool {
        self.nodes[a] == ExprNode::Not(b) || self.nodes[b] == ExprNode::Not(a)
    }

    pub fn constant(&mut self, value: bool) -> ExprId {
        self.put(ExprNode::Const(value))
    }

    pub fn var(&mut self, input: usize) -> ExprId {
        assert!(input < self.inputs.len(), "Input {} out of range", input);
        self.put(ExprNode::Var(input))
    }

    pub fn not(&mut self, a: ExprId) -> ExprId {
        match self.nodes[a] {
            ExprNode::Not(x) => x,
            ExprNode::Const(b) => self.constant(!b),
            _ => self.put(ExprNode::Not(a)),
        }
    }

    pub fn and(&mut self, a: ExprId, b: ExprId) -> ExprId {
        match (self.as_const(a), self.as_const(b)) {
            (Some(false), _) | (_, Some(false)) => self.constant(false),
            (Some(true), _) => b,
            (_, Some(true)) => a,
            _ if a == b => a,
            _ if self.complementary(a, b) => self.constant(false),
            _ => self.put(ExprNode::And(a.min(b), a.max(b))),
        }
    }

    pub fn or(&mut self, a: ExprId, b: ExprId) -> ExprId {
        match (self.as_const(a), self.as_const(b)) {
            (Some(true), _) | (_, Some(true)) => self.constant(true),
            (Some(false), _) => b,
            (_, Some(false)) => a,
            _ if a == b => a,
            _ if self.complementary(a, b) => self.constant(true),
            _ => self.put(ExprNode::Or(a.min(b), a.max(b))),
        }
    }

    pub fn xor(&mut self, a: ExprId, b: ExprId) -> ExprId {
        match (self.as_const(a), self.as_const(b)) {
            (Some(x), Some(y)) => self.constant(x ^ y),
            (Some(false), _) => b,
            (_, Some(false)) => a,
            (Some(true), _) => self.not(b),
            (_, Some(true)) => self.not(a),
            _ if a == b => self.constant(false),
            _ if self.complementary(a, b) => self.constant(true),
            _ => self.put(ExprNode::Xor(a.min(b), a.max(b))),
        }
    }

    pub fn maj(&mut self, a: ExprId, b: ExprId, c: ExprId) -> ExprId {
        let mut s = [a, b, c];
        s.sort();
        if s[0] == s[1] || s[1] == s[2] {
            return s[1];
        }
        if self.complementary(s[0], s[1]) {
            return s[2];
        } else if self.complementary(s[0], s[2]) {
            return s[1];
        } else if self.complementary(s[1], s[2]) {
            return s[0];
        }
        let consts = s.map(|x| self.as_const(x));
        match consts {
            [Some(x), _, _] => self.reduce_maj(x, s[1], s[2]),
            [_, Some(x), _] => self.reduce_maj(x, s[0], s[2]),
            [_, _, Some(x)] => self.reduce_maj(x, s[0], s[1]),
            _ => self.put(ExprNode::Maj(s[0], s[1], s[2])),
        }
    }

    fn reduce_maj(&mut self, constant: bool, a: ExprId, b: ExprId) -> ExprId {
        if constant {
            self.or(a, b)
        } else {
            self.and(a, b)
        }
    }

    /// Balanced conjunction; the empty conjunction is true.
    pub fn and_many(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprId {
        let ids = ids.into_iter().collect();
        self.reduce_balanced(ids, true, Self::and)
    }

    /// Balanced disjunction; the empty disjunction is false.
    pub fn or_many(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprId {
        let ids = ids.into_iter().collect();
        self.reduce_balanced(ids, false, Self::or)
    }

    fn reduce_balanced(
        &mut self,
        mut level: Vec<ExprId>,
        empty: bool,
        op: fn(&mut Self, ExprId, ExprId) -> ExprId,
    ) -> ExprId {
        if level.is_empty() {
            return self.constant(empty);
        }
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| match *pair {
                    [a, b] => op(self, a, b),
                    [a] => a,
                    _ => unreachable!(),
                })
                .collect();
        }
        level[0]
    }

    pub fn build(self, root: ExprId, output: impl Into<String>) -> Expression {
        assert!(root < self.nodes.len(), "Root {} does not exist", root);
        debug!("expression: {} nodes over {} inputs", self.nodes.len(), self.inputs.len());
        Expression {
            nodes: self.nodes,
            inputs: self.inputs,
            output: output.into(),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_sharing() {
        let mut b = ExpressionBuilder::with_inputs(2);
        let x = b.var(0);
        let y = b.var(1);
        let f = b.and(x, y);
        let g = b.and(y, x);
        assert_eq!(f, g);
        let nf = b.not(f);
        let before = b.nodes.len();
        assert_eq!(b.not(f), nf);
        assert_eq!(b.nodes.len(), before);
    }

    #[test]
    fn test_folding() {
        let mut b = ExpressionBuilder::with_inputs(2);
        let x = b.var(0);
        let t = b.constant(true);
        let z = b.constant(false);

        assert_eq!(b.and(x, t), x);
        assert_eq!(b.and(z, x), z);
        assert_eq!(b.or(x, t), t);
        assert_eq!(b.xor(x, z), x);
        let nx = b.not(x);
        assert_eq!(b.xor(t, x), nx);
        assert_eq!(b.not(nx), x);
        assert_eq!(b.maj(x, x, z), x);
        let y = b.var(1);
        let xy = b.and(x, y);
        assert_eq!(b.maj(x, z, y), xy);
    }

    #[test]
    fn test_complement_folding() {
        let mut b = ExpressionBuilder::with_inputs(3);
        let x = b.var(0);
        let y = b.var(1);
        let z = b.var(2);
        let nx = b.not(x);
        let t = b.constant(true);
        let f = b.constant(false);

        assert_eq!(b.and(x, nx), f);
        assert_eq!(b.and(nx, x), f);
        assert_eq!(b.or(x, nx), t);
        assert_eq!(b.xor(nx, x), t);
        assert_eq!(b.maj(x, y, nx), y);
        assert_eq!(b.maj(z, nx, x), z);

        let g = b.and(x, y);
        let ng = b.not(g);
        assert_eq!(b.or(ng, g), t);
        assert_eq!(b.and(g, ng), f);
    }

    #[test]
    fn test_eval_and_display() {
        let mut b = ExpressionBuilder::new(vec!["a".into(), "b".into(), "c".into()]);
        let a = b.var(0);
        let bb = b.var(1);
        let c = b.var(2);
        let na = b.not(a);
        let x = b.xor(na, bb);
        let m = b.maj(a, bb, c);
        let f = b.or(x, m);
        let expr = b.build(f, "out");

        assert_eq!(expr.num_inputs(), 3);
        assert_eq!(expr.output_name(), "out");
        for i in 0..8usize {
            let v = [(i & 1) != 0, (i & 2) != 0, (i & 4) != 0];
            let maj = (v[0] as u8 + v[1] as u8 + v[2] as u8) >= 2;
            assert_eq!(expr.eval(&v), (!v[0] ^ v[1]) || maj);
        }
        assert_eq!(expr.to_string(), "out = ((b ^ !a) | <a b c>)");
        assert_eq!(expr.num_operators(), 4);
    }

    #[test]
    fn test_many() {
        let mut b = ExpressionBuilder::with_inputs(3);
        let vars: Vec<ExprId> = (0..3).map(|i| b.var(i)).collect();
        let f = b.and_many(vars.clone());
        let g = b.or_many(std::iter::empty());
        let expr = b.build(f, "f");
        assert!(expr.eval(&[true, true, true]));
        assert!(!expr.eval(&[true, false, true]));
        assert_eq!(expr.node(g), ExprNode::Const(false));
    }
}
