//! Multi-output Boolean functions backed by one decision-diagram manager.

use std::fmt::Debug;

use num_bigint::BigUint;

use crate::bdd::{Bdd, BddConfig};
use crate::reference::Ref;

/// Named outputs as handles into a manager owned by the set.
///
/// Input `i` is manager variable `i + 1`. The set creates its manager in
/// [`build`][BooleanFunctionSet::build] and never takes one from outside, so
/// every root is made by the manager it is read with. Handles handed out by
/// [`output`][BooleanFunctionSet::output] only make sense with
/// [`bdd`][BooleanFunctionSet::bdd] of the same set.
///
/// ```compile_fail
/// use logic_nets::bdd::Bdd;
/// use logic_nets::function::BooleanFunctionSet;
///
/// let foreign = Bdd::default();
/// let f = foreign.mk_var(1);
/// let mut set = BooleanFunctionSet::build(&Default::default(), vec!["x".into()], |_| vec![]);
/// set.add_output("f", f);
/// ```
pub struct BooleanFunctionSet {
    bdd: Bdd,
    roots: Vec<Ref>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl BooleanFunctionSet {
    /// Create a manager from `config` and let `f` build the named outputs in it.
    ///
    /// # Panics
    ///
    /// Panics if a root is not a node of the new manager, or depends on a
    /// variable past `input_names.len()`.
    pub fn build<F>(config: &BddConfig, input_names: Vec<String>, f: F) -> Self
    where
        F: FnOnce(&Bdd) -> Vec<(String, Ref)>,
    {
        let bdd = Bdd::with_config(config);
        let (output_names, roots): (Vec<String>, Vec<Ref>) = f(&bdd).into_iter().unzip();

        let num_nodes = bdd.num_nodes();
        for root in &roots {
            assert!(root.index() <= num_nodes, "Root {} is not a node of this manager", root);
        }
        let num_inputs = input_names.len() as u32;
        for index in bdd.descendants(roots.iter().copied()) {
            let v = bdd.variable(index);
            assert!(v <= num_inputs, "Variable {} exceeds the {} inputs", v, num_inputs);
        }

        Self {
            bdd,
            roots,
            input_names,
            output_names,
        }
    }

    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    pub fn num_inputs(&self) -> usize {
        self.input_names.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.roots.len()
    }

    pub fn output(&self, index: usize) -> Ref {
        self.roots[index]
    }

    pub fn outputs(&self) -> &[Ref] {
        &self.roots
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    pub fn eval(&self, index: usize, assignment: &[bool]) -> bool {
        assert_eq!(assignment.len(), self.num_inputs(), "Expected {} inputs", self.num_inputs());
        self.bdd.eval(self.roots[index], assignment)
    }

    /// Satisfying assignments of output `index`, as a float.
    pub fn minterm_count(&self, index: usize) -> f64 {
        self.bdd.sat_count_f64(self.roots[index], self.num_inputs())
    }

    pub fn minterm_count_exact(&self, index: usize) -> BigUint {
        self.bdd.sat_count(self.roots[index], self.num_inputs())
    }

    pub fn path_count(&self, index: usize) -> f64 {
        self.bdd.path_count(self.roots[index])
    }

    pub fn path_count_to_one(&self, index: usize) -> f64 {
        self.bdd.path_count_to_one(self.roots[index])
    }

    /// Nodes per input variable, shared over all outputs.
    pub fn level_sizes(&self) -> Vec<usize> {
        self.bdd.level_sizes(&self.roots, self.num_inputs())
    }

    /// Nodes reachable from any output, the terminal included.
    pub fn num_nodes(&self) -> usize {
        self.bdd.descendants(self.roots.iter().copied()).len()
    }

    pub fn max_fanout(&self) -> usize {
        self.bdd.max_fanout(&self.roots)
    }

    pub fn complement_edges(&self) -> usize {
        self.bdd.complement_edges(&self.roots)
    }
}

impl Debug for BooleanFunctionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BooleanFunctionSet")
            .field("inputs", &self.input_names)
            .field("outputs", &self.output_names)
            .field("roots", &self.roots)
            .field("bdd", &self.bdd)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_set() {
        let set = BooleanFunctionSet::build(&BddConfig::default(), vec!["x".into(), "y".into()], |bdd| {
            let x = bdd.mk_var(1);
            let y = bdd.mk_var(2);
            vec![("and".into(), bdd.apply_and(x, y)), ("xor".into(), bdd.apply_xor(x, y))]
        });

        assert_eq!(set.num_inputs(), 2);
        assert_eq!(set.num_outputs(), 2);
        assert_eq!(set.minterm_count(0), 1.0);
        assert_eq!(set.minterm_count(1), 2.0);
        assert_eq!(set.minterm_count_exact(1), BigUint::from(2u32));
        assert!(set.eval(0, &[true, true]));
        assert!(!set.eval(1, &[true, true]));
        assert_eq!(set.level_sizes().len(), 2);
    }

    #[test]
    fn test_outputs_follow_own_variable_order() {
        let other = Bdd::default();
        let x2 = other.mk_var(2);
        let x1 = other.mk_var(1);
        let f = other.apply_and(x1, -x2);
        assert_eq!(other.sat_count_f64(f, 2), 1.0);

        // Same function rebuilt in the set's manager, inputs allocated in reverse.
        let set = BooleanFunctionSet::build(&BddConfig::default(), vec!["a".into(), "b".into()], |bdd| {
            let b = bdd.mk_var(2);
            let a = bdd.mk_var(1);
            vec![("f".into(), bdd.apply_and(a, -b))]
        });
        assert_eq!(set.minterm_count(0), 1.0);
        assert!(set.eval(0, &[true, false]));
        assert!(!set.eval(0, &[false, false]));
    }

    #[test]
    #[should_panic(expected = "is not a node of this manager")]
    fn test_foreign_root_is_rejected() {
        let other = Bdd::default();
        let mut f = other.mk_var(1);
        for v in 2..10 {
            f = other.apply_and(f, other.mk_var(v));
        }
        BooleanFunctionSet::build(&BddConfig::default(), (0..9).map(|i| format!("x{}", i)).collect(), |_| {
            vec![("f".into(), f)]
        });
    }

    #[test]
    #[should_panic(expected = "exceeds the 1 inputs")]
    fn test_root_past_inputs_is_rejected() {
        BooleanFunctionSet::build(&BddConfig::default(), vec!["x".into()], |bdd| {
            vec![("f".into(), bdd.mk_var(2))]
        });
    }
}
