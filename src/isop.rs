//! Irredundant sum-of-products covers (Minato–Morreale).
//!
//! Given an interval `lower ⊆ f ⊆ upper` of functions, [`isop`] returns a set
//! of cubes whose disjunction lies inside the interval and from which no cube
//! or literal can be dropped.

use std::fmt::{Display, Formatter};

use crate::truth_table::TruthTable;

/// Product of literals; bit `j` of `mask` selects variable `j`, the same bit of
/// `polarity` tells whether it appears positive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Cube {
    pub mask: u32,
    pub polarity: u32,
}

impl Cube {
    /// The empty product, i.e. constant one.
    pub fn tautology() -> Self {
        Self::default()
    }

    pub fn with_literal(self, var: usize, positive: bool) -> Self {
        let bit = 1u32 << var;
        Self {
            mask: self.mask | bit,
            polarity: if positive {
                self.polarity | bit
            } else {
                self.polarity & !bit
            },
        }
    }

    pub fn num_literals(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Literals as `(variable, positive)` pairs in increasing variable order.
    pub fn literals(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..32usize)
            .filter(|&j| self.mask & (1 << j) != 0)
            .map(|j| (j, self.polarity & (1 << j) != 0))
    }

    /// Whether the cube covers row `index` of a truth table.
    pub fn contains(&self, index: usize) -> bool {
        (index as u32 ^ self.polarity) & self.mask == 0
    }
}

impl Cube {
    /// Positional notation over `num_vars` variables, variable 0 first.
    pub fn to_pla_string(&self, num_vars: usize) -> String {
        (0..num_vars)
            .map(|j| {
                if self.mask & (1 << j) == 0 {
                    '-'
                } else if self.polarity & (1 << j) != 0 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

impl Display for Cube {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.mask == 0 {
            return write!(f, "1");
        }
        for (i, (var, positive)) in self.literals().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}x{}", if positive { "" } else { "!" }, var)?;
        }
        Ok(())
    }
}

/// Irredundant cover of the interval `[lower, upper]`, along with the function it covers.
pub fn isop(lower: &TruthTable, upper: &TruthTable) -> (Vec<Cube>, TruthTable) {
    assert_eq!(lower.num_vars(), upper.num_vars(), "Variable count mismatch");
    assert!(lower.implies(upper), "Lower bound is not contained in the upper bound");
    assert!(lower.num_vars() <= 32, "Cubes are limited to 32 variables");
    let mut cubes = Vec::new();
    let cover = isop_rec(lower, upper, lower.num_vars(), &mut cubes);
    (cubes, cover)
}

/// Irredundant cover of a completely specified function.
pub fn isop_function(f: &TruthTable) -> Vec<Cube> {
    isop(f, f).0
}

/// Recursive step; only variables below `limit` are still candidates for splitting.
fn isop_rec(lower: &TruthTable, upper: &TruthTable, limit: usize, cubes: &mut Vec<Cube>) -> TruthTable {
    let n = lower.num_vars();
    if lower.is_zero() {
        return TruthTable::zero(n);
    }
    if upper.is_one() {
        cubes.push(Cube::tautology());
        return TruthTable::one(n);
    }

    let Some(var) = (0..limit)
        .rev()
        .find(|&v| lower.depends_on(v) || upper.depends_on(v))
    else {
        // Neither bound depends on any remaining variable, but lower is not
        // zero and upper is not one: impossible for lower ⊆ upper.
        unreachable!("Interval bounds do not depend on any variable");
    };

    let l0 = lower.cofactor(var, false);
    let l1 = lower.cofactor(var, true);
    let u0 = upper.cofactor(var, false);
    let u1 = upper.cofactor(var, true);

    let start0 = cubes.len();
    let r0 = isop_rec(&l0.and(&u1.complement()), &u0, var, cubes);
    for cube in &mut cubes[start0..] {
        *cube = cube.with_literal(var, false);
    }

    let start1 = cubes.len();
    let r1 = isop_rec(&l1.and(&u0.complement()), &u1, var, cubes);
    for cube in &mut cubes[start1..] {
        *cube = cube.with_literal(var, true);
    }

    let rest = l0.and(&r0.complement()).or(&l1.and(&r1.complement()));
    let rs = isop_rec(&rest, &u0.and(&u1), var, cubes);

    let x = TruthTable::var(n, var);
    x.complement().and(&r0).or(&x.and(&r1)).or(&rs)
}

/// Truth table of the disjunction of `cubes`.
pub fn cover_table(cubes: &[Cube], num_vars: usize) -> TruthTable {
    let mut table = TruthTable::zero(num_vars);
    for i in 0..table.size() {
        if cubes.iter().any(|c| c.contains(i)) {
            table.set(i, true);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn check_irredundant(f: &TruthTable, cubes: &[Cube]) {
        let n = f.num_vars();
        assert_eq!(&cover_table(cubes, n), f);
        for i in 0..cubes.len() {
            let mut rest = cubes.to_vec();
            rest.remove(i);
            assert_ne!(&cover_table(&rest, n), f, "cube {} is redundant", cubes[i]);
        }
    }

    #[test]
    fn test_constants() {
        assert!(isop_function(&TruthTable::zero(3)).is_empty());
        assert_eq!(isop_function(&TruthTable::one(3)), vec![Cube::tautology()]);
    }

    #[test]
    fn test_single_literal() {
        let f = TruthTable::var(3, 1);
        let cubes = isop_function(&f);
        assert_eq!(cubes, vec![Cube::tautology().with_literal(1, true)]);
    }

    #[test]
    fn test_xor() {
        let f = TruthTable::from_fn(2, |x| x[0] ^ x[1]);
        let cubes = isop_function(&f);
        assert_eq!(cubes.len(), 2);
        assert!(cubes.iter().all(|c| c.num_literals() == 2));
        check_irredundant(&f, &cubes);
    }

    #[test]
    fn test_majority() {
        let f = TruthTable::from_fn(3, |x| x.iter().filter(|&&b| b).count() >= 2);
        let cubes = isop_function(&f);
        assert_eq!(cubes.len(), 3);
        check_irredundant(&f, &cubes);
    }

    #[test]
    fn test_random_functions() {
        // Deterministic pseudo-random tables.
        let mut state = 0x9e3779b97f4a7c15u64;
        for _ in 0..20 {
            let mut f = TruthTable::zero(5);
            for i in 0..f.size() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                f.set(i, state & 1 == 1);
            }
            let cubes = isop_function(&f);
            check_irredundant(&f, &cubes);
        }
    }

    #[test]
    fn test_with_dont_cares() {
        // f = x0 & x1 with x0 & !x1 as don't care: x0 alone is a valid cover.
        let lower = TruthTable::from_fn(2, |x| x[0] && x[1]);
        let upper = TruthTable::var(2, 0);
        let (cubes, cover) = isop(&lower, &upper);
        assert!(lower.implies(&cover));
        assert!(cover.implies(&upper));
        assert_eq!(cubes, vec![Cube::tautology().with_literal(0, true)]);
    }

    #[test]
    fn test_display() {
        let c = Cube::tautology().with_literal(0, true).with_literal(2, false);
        assert_eq!(c.to_string(), "x0 !x2");
        assert_eq!(c.to_pla_string(3), "1-0");
        assert!(c.contains(0b001));
        assert!(!c.contains(0b101));
    }
}
