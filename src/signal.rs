use std::fmt::{Debug, Display, Formatter};
use std::ops::{BitXor, Not};

/// Index of a node inside a [`Network`][crate::network::Network] arena.
pub type NodeId = usize;

/// Edge reference: a node id together with a polarity bit.
///
/// The node id lives in the upper bits and the complement flag in bit 0.
/// Node 0 is the constant, hence `zero` is the plain constant edge and `one`
/// is its complement.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signal(u32);

// Constructors
impl Signal {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn one() -> Self {
        Self(1)
    }

    pub const fn new(node: NodeId, complemented: bool) -> Self {
        assert!(node < (1 << 31), "Node id does not fit into a signal");
        Self(((node as u32) << 1) | complemented as u32)
    }

    pub const fn from_node(node: NodeId) -> Self {
        Self::new(node, false)
    }
}

// Getters
impl Signal {
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Id of the referenced node.
    pub const fn node(self) -> NodeId {
        (self.0 >> 1) as NodeId
    }

    /// The same edge with the polarity bit cleared.
    pub const fn regular(self) -> Self {
        Self(self.0 & !1)
    }

    /// The same node, complemented iff `complemented`.
    pub const fn with_complement(self, complemented: bool) -> Self {
        Self((self.0 & !1) | complemented as u32)
    }
}

// Checks
impl Signal {
    pub const fn is_const(self) -> bool {
        self.node() == 0
    }

    pub const fn is_complemented(self) -> bool {
        self.0 & 1 != 0
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Self {
        if b {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Not for &Signal {
    type Output = Signal;

    fn not(self) -> Self::Output {
        Signal(self.0 ^ 1)
    }
}

/// Conditional complement: `s ^ true == !s`.
impl BitXor<bool> for Signal {
    type Output = Self;

    fn bitxor(self, rhs: bool) -> Self::Output {
        Self(self.0 ^ rhs as u32)
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_const() {
            write!(f, "{}", self.0 & 1)
        } else {
            if self.is_complemented() {
                write!(f, "!")?;
            }
            write!(f, "n{}", self.node())
        }
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
