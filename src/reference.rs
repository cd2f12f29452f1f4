use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// Handle to a decision-diagram node, possibly complemented.
///
/// The sign carries the complement bit, so negation is a constant-time flip
/// and never allocates a node. The absolute value is the node index inside
/// the owning [`Bdd`][crate::bdd::Bdd] manager; index 0 is never used.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ref(i32);

impl Ref {
    pub const fn positive(index: u32) -> Self {
        assert!(index != 0 && index <= i32::MAX as u32);
        Self(index as i32)
    }

    pub const fn is_negated(&self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the index of the referenced node.
    pub const fn index(self) -> usize {
        self.0.unsigned_abs() as usize
    }

    pub(crate) const fn unsigned(self) -> u32 {
        (self.0.unsigned_abs() << 1) | (self.0 < 0) as u32
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}",
            if self.is_negated() { "~" } else { "" },
            self.index()
        )
    }
}
