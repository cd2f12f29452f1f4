//! Decision-diagram manager with complemented edges.
//!
//! The [`Bdd`] manager owns the unique table (every node is hash-consed) and the
//! computed table (ITE results are memoized). Functions are handled through
//! lightweight [`Ref`] values; `-f` is the complement of `f` and costs nothing.
//!
//! Variables are 1-indexed and ordered by their index: variable 1 is closest to
//! the root. Index 0 is reserved for the terminal node.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;

use log::debug;

use crate::cache::Cache;
use crate::reference::Ref;
use crate::table::Table;
use crate::utils::{pairing3, MyHash};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Node {
    variable: u32,
    low: Ref,
    high: Ref,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            variable: 0,
            low: Ref::positive(1),
            high: Ref::positive(1),
        }
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        pairing3(
            self.variable as u64,
            self.low.unsigned() as u64,
            self.high.unsigned() as u64,
        )
    }
}

type Storage = Table<Node>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OpKey {
    Ite(Ref, Ref, Ref),
}

/// Sizing of a freshly created manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BddConfig {
    /// The unique table starts with room for `2^storage_bits` nodes.
    pub storage_bits: usize,
    /// The computed table starts with room for `2^cache_bits` entries.
    pub cache_bits: usize,
}

impl BddConfig {
    pub fn with_storage_bits(mut self, bits: usize) -> Self {
        self.storage_bits = bits;
        self
    }

    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 16,
            cache_bits: 14,
        }
    }
}

pub struct Bdd {
    storage: RefCell<Storage>,
    cache: RefCell<Cache<OpKey, Ref>>,
    pub zero: Ref,
    pub one: Ref,
}

impl Bdd {
    pub fn with_config(config: &BddConfig) -> Self {
        let mut storage = Storage::new(config.storage_bits);

        // Allocate the terminal node:
        let one = storage.put(Node::default());
        assert_eq!(one, 1); // Make sure the terminal node is (1).
        let one = Ref::positive(one as u32);
        let zero = -one;

        Self {
            storage: RefCell::new(storage),
            cache: RefCell::new(Cache::new(config.cache_bits.min(config.storage_bits))),
            zero,
            one,
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::with_config(&BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("nodes", &storage.len())
            .field("buckets", &storage.num_buckets())
            .finish()
    }
}

impl Bdd {
    pub fn zero(&self) -> Ref {
        self.zero
    }
    pub fn one(&self) -> Ref {
        self.one
    }

    /// Total number of nodes allocated in the manager, terminal included.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn cache_hits(&self) -> usize {
        self.cache.borrow().hits()
    }
    pub fn cache_misses(&self) -> usize {
        self.cache.borrow().misses()
    }

    pub fn variable(&self, index: usize) -> u32 {
        self.storage.borrow().value(index).variable
    }
    pub fn low(&self, index: usize) -> Ref {
        self.storage.borrow().value(index).low
    }
    pub fn high(&self, index: usize) -> Ref {
        self.storage.borrow().value(index).high
    }

    pub fn low_node(&self, node: Ref) -> Ref {
        let low = self.low(node.index());
        if node.is_negated() {
            -low
        } else {
            low
        }
    }
    pub fn high_node(&self, node: Ref) -> Ref {
        let high = self.high(node.index());
        if node.is_negated() {
            -high
        } else {
            high
        }
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        self.is_zero(node) || self.is_one(node)
    }

    pub fn mk_node(&self, v: u32, low: Ref, high: Ref) -> Ref {
        debug!("mk(v = {}, low = {}, high = {})", v, low, high);

        assert_ne!(v, 0, "Variable index should not be zero");

        // Handle canonicity
        if high.is_negated() {
            debug!("mk: restoring canonicity");
            return -self.mk_node(v, -low, -high);
        }

        // Handle duplicates
        if low == high {
            debug!("mk: duplicates {} == {}", low, high);
            return low;
        }

        let i = self.storage.borrow_mut().put(Node {
            variable: v,
            low,
            high,
        });
        Ref::positive(i as u32)
    }

    pub fn mk_var(&self, v: u32) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");
        self.mk_node(v, self.zero, self.one)
    }

    /// Conjunction of literals, given as signed 1-based variable indices.
    pub fn cube(&self, literals: impl IntoIterator<Item = i32>) -> Ref {
        let mut literals = literals.into_iter().collect::<Vec<_>>();
        literals.sort_by_key(|&v| v.abs());
        debug!("cube(literals = {:?})", literals);
        literals.reverse();
        let mut current = self.one;
        for lit in literals {
            assert_ne!(lit, 0, "Variable index should not be zero");
            current = if lit < 0 {
                self.mk_node(lit.unsigned_abs(), current, self.zero)
            } else {
                self.mk_node(lit as u32, self.zero, current)
            };
        }
        current
    }

    pub fn top_cofactors(&self, node: Ref, v: u32) -> (Ref, Ref) {
        assert_ne!(v, 0, "Variable index should not be zero");

        let i = node.index();
        if self.is_terminal(node) || v < self.variable(i) {
            return (node, node);
        }
        assert_eq!(v, self.variable(i));
        if node.is_negated() {
            (-self.low(i), -self.high(i))
        } else {
            (self.low(i), self.high(i))
        }
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(x, y, z) = (x ∧ y) ∨ (¬x ∧ z)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_nets::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let x = bdd.mk_var(1);
    /// let y = bdd.mk_var(2);
    /// let z = bdd.mk_var(3);
    /// let f = bdd.apply_ite(x, y, z);
    /// let x_and_y = bdd.apply_and(x, y);
    /// let not_x_and_z = bdd.apply_and(-x, z);
    /// assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z));
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);

        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        if self.is_one(f) {
            return g;
        }
        if self.is_zero(f) {
            return h;
        }

        // From now on, F is known not to be a constant
        assert!(!self.is_terminal(f));

        // More base cases:
        //   ite(F,G,G) => G
        //   ite(F,1,0) => F
        //   ite(F,0,1) => ~F
        //   ite(F,1,~F) => 1
        //   ite(F,F,1) => 1
        //   ite(F,~F,0) => 0
        //   ite(F,0,F) => F
        if g == h {
            return g;
        }
        if self.is_one(g) && self.is_zero(h) {
            return f;
        }
        if self.is_zero(g) && self.is_one(h) {
            return -f;
        }
        if self.is_one(g) && h == -f {
            return self.one;
        }
        if g == f && self.is_one(h) {
            return self.one;
        }
        if g == -f && self.is_zero(h) {
            return self.zero;
        }
        if self.is_zero(g) && h == f {
            return f;
        }

        // Standard triples:
        //   ite(F,F,H) => ite(F,1,H)
        //   ite(F,G,F) => ite(F,G,0)
        //   ite(F,~F,H) => ite(F,0,H)
        //   ite(F,G,~F) => ite(F,G,1)
        if g == f {
            debug!("ite(F,F,H) => ite(F,1,H)");
            return self.apply_ite(f, self.one, h);
        }
        if h == f {
            debug!("ite(F,G,F) => ite(F,G,0)");
            return self.apply_ite(f, g, self.zero);
        }
        if g == -f {
            debug!("ite(F,~F,H) => ite(F,0,H)");
            return self.apply_ite(f, self.zero, h);
        }
        if h == -f {
            debug!("ite(F,G,~F) => ite(F,G,1)");
            return self.apply_ite(f, g, self.one);
        }

        let i = self.variable(f.index());
        let j = self.variable(g.index());
        let k = self.variable(h.index());
        assert_ne!(i, 0);

        // Equivalent pairs:
        //   ite(F,1,H) == ite(H,1,F) == F ∨ H
        //   ite(F,G,0) == ite(G,F,0) == F ∧ G
        //   ite(F,G,1) == ite(~G,~F,1) == F -> G
        //   ite(F,0,H) == ite(~H,0,~F) == ~F ∧ H
        //   ite(F,G,~G) == ite(G,F,~F)
        // (choose the one with the lowest variable)
        if self.is_one(g) && k != 0 && k < i {
            return self.apply_ite(h, self.one, f);
        }
        if self.is_zero(h) && j != 0 && j < i {
            return self.apply_ite(g, f, self.zero);
        }
        if self.is_one(h) && j != 0 && j < i {
            return self.apply_ite(-g, -f, self.one);
        }
        if self.is_zero(g) && k != 0 && k < i {
            return self.apply_ite(-h, self.zero, -f);
        }
        if g == -h && j != 0 && j < i {
            return self.apply_ite(g, f, -f);
        }

        // Make sure the first two pointers (f and g) are regular (not negated)
        let (mut f, mut g, mut h) = (f, g, h);

        // ite(~F,G,H) => ite(F,H,G)
        if f.is_negated() {
            f = -f;
            std::mem::swap(&mut g, &mut h);
        }
        assert!(!f.is_negated());

        // ite(F,~G,H) => ~ite(F,G,~H)
        let mut n = false;
        if g.is_negated() {
            n = true;
            g = -g;
            h = -h;
        }
        assert!(!g.is_negated());

        let key = OpKey::Ite(f, g, h);
        if let Some(res) = self.cache.borrow_mut().get(&key) {
            debug!("cache: apply_ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);
            return if n { -res } else { res };
        }

        // Determine the top variable:
        let mut m = i;
        if j != 0 {
            m = m.min(j);
        }
        if k != 0 {
            m = m.min(k);
        }
        assert_ne!(m, 0);

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let e = self.apply_ite(f0, g0, h0);
        let t = self.apply_ite(f1, g1, h1);

        let res = self.mk_node(m, e, t);
        debug!("computed: apply_ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);
        self.cache.borrow_mut().insert(key, res);

        if n {
            -res
        } else {
            res
        }
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, self.zero)
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, self.one, v)
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, -v, v)
    }

    /// Majority of three functions: `(u ∧ v) ∨ (v ∧ w) ∨ (u ∧ w)`.
    pub fn apply_maj(&self, u: Ref, v: Ref, w: Ref) -> Ref {
        let either = self.apply_or(v, w);
        let both = self.apply_and(v, w);
        self.apply_ite(u, either, both)
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        let mut res = self.zero;
        for node in nodes.into_iter() {
            res = self.apply_or(res, node);
        }
        res
    }

    /// Evaluate `f` under a complete assignment; `assignment[i]` is the value of variable `i + 1`.
    pub fn eval(&self, f: Ref, assignment: &[bool]) -> bool {
        let mut current = f;
        while !self.is_terminal(current) {
            let v = self.variable(current.index());
            current = if assignment[v as usize - 1] {
                self.high_node(current)
            } else {
                self.low_node(current)
            };
        }
        self.is_one(current)
    }

    /// Indices of all nodes reachable from `nodes`, the terminal included.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<usize> {
        let mut visited = HashSet::new();
        visited.insert(self.one.index());
        let mut queue = VecDeque::from_iter(nodes.into_iter().map(|r| r.index()));

        while let Some(i) = queue.pop_front() {
            if visited.insert(i) {
                queue.push_back(self.low(i).index());
                queue.push_back(self.high(i).index());
            }
        }

        visited
    }

    /// Number of nodes in the diagram of `f`, the terminal included.
    pub fn size(&self, f: Ref) -> usize {
        self.descendants([f]).len()
    }
}
