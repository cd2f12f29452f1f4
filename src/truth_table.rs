//! Explicit truth tables.
//!
//! A function of n variables is stored as 2ⁿ bits. Bit `i` holds the value at
//! the assignment where variable `j` (0-based) equals `(i >> j) & 1`, so the
//! first variable is the least significant bit of the index.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::Error;

/// Largest variable count a table may have; 2^32 rows already take 512 MiB.
pub const MAX_VARS: usize = 32;

/// Row count for `num_vars` variables.
///
/// # Panics
///
/// Panics if `num_vars > MAX_VARS`.
pub fn num_rows(num_vars: usize) -> usize {
    assert!(
        num_vars <= MAX_VARS,
        "Truth tables are limited to {} variables, got {}",
        MAX_VARS,
        num_vars
    );
    1usize << num_vars
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_vars: usize,
    bits: BitVec<u64, Lsb0>,
}

impl TruthTable {
    /// Tabulate `f` over every assignment of `num_vars` variables.
    pub fn from_fn(num_vars: usize, f: impl Fn(&[bool]) -> bool) -> Self {
        let size = num_rows(num_vars);
        let mut bits = BitVec::with_capacity(size);
        let mut assignment = vec![false; num_vars];

        for i in 0..size {
            for (j, val) in assignment.iter_mut().enumerate() {
                *val = (i >> j) & 1 == 1;
            }
            bits.push(f(&assignment));
        }

        TruthTable { num_vars, bits }
    }

    /// # Panics
    ///
    /// Panics if `bits.len() != 2^num_vars`.
    pub fn from_bits(num_vars: usize, bits: BitVec<u64, Lsb0>) -> Self {
        let expected = num_rows(num_vars);
        assert_eq!(
            bits.len(),
            expected,
            "Expected {} bits for {} variables, got {}",
            expected,
            num_vars,
            bits.len()
        );
        TruthTable { num_vars, bits }
    }

    /// # Panics
    ///
    /// Panics if `num_vars > MAX_VARS`, like every constructor.
    pub fn zero(num_vars: usize) -> Self {
        TruthTable {
            num_vars,
            bits: bitvec![u64, Lsb0; 0; num_rows(num_vars)],
        }
    }

    pub fn one(num_vars: usize) -> Self {
        TruthTable {
            num_vars,
            bits: bitvec![u64, Lsb0; 1; num_rows(num_vars)],
        }
    }

    /// Projection on variable `var` (0-based).
    pub fn var(num_vars: usize, var: usize) -> Self {
        assert!(var < num_vars, "Variable {} out of range for {} variables", var, num_vars);
        let size = num_rows(num_vars);
        let mut bits = BitVec::with_capacity(size);
        for i in 0..size {
            bits.push((i >> var) & 1 == 1);
        }
        TruthTable { num_vars, bits }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of rows, `2^num_vars`.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    pub fn eval(&self, assignment: &[bool]) -> bool {
        assert_eq!(assignment.len(), self.num_vars, "Expected {} inputs, got {}", self.num_vars, assignment.len());
        let index = assignment
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, &b)| acc | ((b as usize) << i));
        self.bits[index]
    }

    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    pub fn is_one(&self) -> bool {
        self.bits.all()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn as_bits(&self) -> &BitSlice<u64, Lsb0> {
        &self.bits
    }

    pub fn complement(&self) -> Self {
        TruthTable {
            num_vars: self.num_vars,
            bits: !self.bits.clone(),
        }
    }

    pub fn and(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars, "Variable count mismatch");
        TruthTable {
            num_vars: self.num_vars,
            bits: self.bits.clone() & other.bits.clone(),
        }
    }

    pub fn or(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars, "Variable count mismatch");
        TruthTable {
            num_vars: self.num_vars,
            bits: self.bits.clone() | other.bits.clone(),
        }
    }

    pub fn xor(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars, "Variable count mismatch");
        TruthTable {
            num_vars: self.num_vars,
            bits: self.bits.clone() ^ other.bits.clone(),
        }
    }

    pub fn maj(&self, b: &Self, c: &Self) -> Self {
        let ab = self.and(b);
        let bc = b.and(c);
        let ac = self.and(c);
        ab.or(&bc).or(&ac)
    }

    /// Whether every one of `self` is also a one of `other`.
    pub fn implies(&self, other: &Self) -> bool {
        self.and(&other.complement()).is_zero()
    }

    /// Shannon cofactor with `var` fixed to `value`, over the same variables.
    ///
    /// The result no longer depends on `var`.
    pub fn cofactor(&self, var: usize, value: bool) -> Self {
        assert!(var < self.num_vars, "Variable {} out of range", var);
        let mask = 1usize << var;
        let mut bits = BitVec::with_capacity(self.bits.len());
        for i in 0..self.bits.len() {
            let j = if value { i | mask } else { i & !mask };
            bits.push(self.bits[j]);
        }
        TruthTable {
            num_vars: self.num_vars,
            bits,
        }
    }

    pub fn depends_on(&self, var: usize) -> bool {
        let step = 1usize << var;
        (0..self.bits.len()).any(|i| i & step == 0 && self.bits[i] != self.bits[i | step])
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable({}, {})", self.num_vars, self)
    }
}

/// Bits from the highest index down to index 0.
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().rev() {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Parse the [`Display`][fmt::Display] form: a binary string whose last character is row 0.
impl FromStr for TruthTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.len().is_power_of_two() {
            return Err(Error::Parse(format!(
                "truth table length {} is not a power of two",
                s.len()
            )));
        }
        let num_vars = s.len().trailing_zeros() as usize;
        let mut bits = BitVec::with_capacity(s.len());
        for c in s.chars().rev() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(Error::Parse(format!("unexpected character '{}' in truth table", c))),
            }
        }
        Ok(TruthTable { num_vars, bits })
    }
}

/// Multi-output truth tables over a shared, named input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableSet {
    input_names: Vec<String>,
    output_names: Vec<String>,
    tables: Vec<TruthTable>,
}

impl TruthTableSet {
    pub fn new(input_names: Vec<String>) -> Self {
        Self {
            input_names,
            output_names: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Set with inputs named `x0, x1, ...`.
    pub fn with_inputs(num_inputs: usize) -> Self {
        Self::new((0..num_inputs).map(|i| format!("x{}", i)).collect())
    }

    pub fn add_output(&mut self, name: impl Into<String>, table: TruthTable) {
        assert_eq!(
            table.num_vars(),
            self.input_names.len(),
            "Output table has {} variables, the set has {} inputs",
            table.num_vars(),
            self.input_names.len()
        );
        self.output_names.push(name.into());
        self.tables.push(table);
    }

    pub fn num_inputs(&self) -> usize {
        self.input_names.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.tables.len()
    }

    pub fn output(&self, index: usize) -> &TruthTable {
        &self.tables[index]
    }

    pub fn outputs(&self) -> &[TruthTable] {
        &self.tables
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
