//! Counting queries on decision diagrams: satisfying assignments, paths and shape.
//!
//! Minterm counts come in two flavours. [`Bdd::sat_count`] is exact and
//! returns a [`BigUint`]; [`Bdd::sat_count_f64`] uses a floating accumulator
//! and stays usable (though no longer exact past 2^53) for large input counts.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::bdd::Bdd;
use crate::reference::Ref;

impl Bdd {
    /// Number of satisfying assignments of `node` over `num_vars` variables.
    pub fn sat_count(&self, node: Ref, num_vars: usize) -> BigUint {
        let mut cache = HashMap::new();
        let max = BigUint::one() << num_vars;
        self._sat_count(node, &max, &mut cache)
    }

    fn _sat_count(&self, node: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if self.is_zero(node) {
            return BigUint::zero();
        } else if self.is_one(node) {
            return max.clone();
        }

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        let low = self.low(node.index());
        let high = self.high(node.index());

        let count_low = self._sat_count(low, max, cache);
        let count_high = self._sat_count(high, max, cache);

        let count: BigUint = (count_low + count_high) >> 1;
        let count = if node.is_negated() { max - count } else { count };

        cache.insert(node, count.clone());
        count
    }

    /// Floating-point variant of [`sat_count`][Bdd::sat_count].
    ///
    /// Exact up to 2^53, approximate beyond. Saturates to infinity when the
    /// count leaves the `f64` range, and never returns NaN.
    pub fn sat_count_f64(&self, node: Ref, num_vars: usize) -> f64 {
        let density = self.sat_density(node);
        if density == 0.0 && !self.is_zero(node) {
            // The density fell below the smallest subnormal.
            return self.sat_count(node, num_vars).to_f64().unwrap_or(f64::INFINITY);
        }
        scale_pow2(density, num_vars)
    }

    /// Fraction of all assignments that satisfy `node`, in `[0, 1]`.
    ///
    /// Independent of the variable count, so it stays finite where
    /// [`sat_count_f64`][Bdd::sat_count_f64] overflows.
    pub fn sat_density(&self, node: Ref) -> f64 {
        let mut cache = HashMap::new();
        self._sat_density(node, &mut cache)
    }

    fn _sat_density(&self, node: Ref, cache: &mut HashMap<Ref, f64>) -> f64 {
        if self.is_zero(node) {
            return 0.0;
        } else if self.is_one(node) {
            return 1.0;
        }

        if let Some(&density) = cache.get(&node) {
            return density;
        }

        let low = self._sat_density(self.low(node.index()), cache);
        let high = self._sat_density(self.high(node.index()), cache);

        let density = low / 2.0 + high / 2.0;
        let density = if node.is_negated() { 1.0 - density } else { density };

        cache.insert(node, density);
        density
    }

    /// Number of distinct root-to-terminal traversals in the diagram of `node`.
    ///
    /// Complement marks are ignored: every path ends in the single terminal.
    pub fn path_count(&self, node: Ref) -> f64 {
        let mut cache = HashMap::new();
        self._path_count(node.index(), &mut cache)
    }

    fn _path_count(&self, index: usize, cache: &mut HashMap<usize, f64>) -> f64 {
        if index == self.one.index() {
            return 1.0;
        }
        if let Some(&count) = cache.get(&index) {
            return count;
        }
        let count = self._path_count(self.low(index).index(), cache)
            + self._path_count(self.high(index).index(), cache);
        cache.insert(index, count);
        count
    }

    /// Number of traversals of `node` that evaluate to one.
    pub fn path_count_to_one(&self, node: Ref) -> f64 {
        let mut paths = HashMap::new();
        let mut cache = HashMap::new();
        self._path_count_to_one(node, &mut paths, &mut cache)
    }

    fn _path_count_to_one(
        &self,
        node: Ref,
        paths: &mut HashMap<usize, f64>,
        cache: &mut HashMap<Ref, f64>,
    ) -> f64 {
        if self.is_one(node) {
            return 1.0;
        } else if self.is_zero(node) {
            return 0.0;
        }
        if let Some(&count) = cache.get(&node) {
            return count;
        }
        let count = if node.is_negated() {
            self._path_count(node.index(), paths)
                - self._path_count_to_one(-node, paths, cache)
        } else {
            self._path_count_to_one(self.low(node.index()), paths, cache)
                + self._path_count_to_one(self.high(node.index()), paths, cache)
        };
        cache.insert(node, count);
        count
    }

    /// Number of nodes labelled with each variable, for variables `1..=num_vars`.
    pub fn level_sizes(&self, roots: &[Ref], num_vars: usize) -> Vec<usize> {
        let mut sizes = vec![0; num_vars];
        for index in self.descendants(roots.iter().copied()) {
            let v = self.variable(index);
            if v != 0 {
                sizes[v as usize - 1] += 1;
            }
        }
        sizes
    }

    /// Largest number of references to a single node, counting root references.
    pub fn max_fanout(&self, roots: &[Ref]) -> usize {
        let mut fanout: HashMap<usize, usize> = HashMap::new();
        for root in roots {
            *fanout.entry(root.index()).or_default() += 1;
        }
        for index in self.descendants(roots.iter().copied()) {
            if index == self.one.index() {
                continue;
            }
            *fanout.entry(self.low(index).index()).or_default() += 1;
            *fanout.entry(self.high(index).index()).or_default() += 1;
        }
        fanout.into_values().max().unwrap_or(0)
    }

    /// Number of complemented edges, root references included.
    pub fn complement_edges(&self, roots: &[Ref]) -> usize {
        let mut count = roots.iter().filter(|r| r.is_negated()).count();
        for index in self.descendants(roots.iter().copied()) {
            if index == self.one.index() {
                continue;
            }
            count += self.low(index).is_negated() as usize;
            count += self.high(index).is_negated() as usize;
        }
        count
    }
}

/// `value * 2^exp`, in steps that keep every intermediate power finite.
fn scale_pow2(mut value: f64, mut exp: usize) -> f64 {
    while exp > 0 && value != 0.0 && value.is_finite() {
        let step = exp.min(1000);
        value *= 2f64.powi(step as i32);
        exp -= step;
    }
    value
}
