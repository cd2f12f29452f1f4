use std::fmt::{Display, Formatter};

use crate::signal::Signal;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum BinaryType {
    And,
    Or,
    Xor,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum TernaryType {
    Maj,
}

/// Gate kind, independent of the fan-ins.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum GateType {
    And,
    Or,
    Xor,
    Maj,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Gate {
    Binary(BinaryType, [Signal; 2]),
    Ternary(TernaryType, [Signal; 3]),
}

// Constructors
impl Gate {
    pub fn and(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::And, [a, b])
    }

    pub fn or(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::Or, [a, b])
    }

    pub fn xor(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::Xor, [a, b])
    }

    pub fn maj(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::Maj, [a, b, c])
    }
}

// Getters
impl Gate {
    pub fn inputs(&self) -> &[Signal] {
        match self {
            Gate::Binary(_, inputs) => inputs,
            Gate::Ternary(_, inputs) => inputs,
        }
    }

    pub fn gate_type(&self) -> GateType {
        match self {
            Gate::Binary(BinaryType::And, _) => GateType::And,
            Gate::Binary(BinaryType::Or, _) => GateType::Or,
            Gate::Binary(BinaryType::Xor, _) => GateType::Xor,
            Gate::Ternary(TernaryType::Maj, _) => GateType::Maj,
        }
    }

    /// Same gate type over different fan-ins.
    pub fn with_inputs(&self, inputs: &[Signal]) -> Gate {
        match self {
            Gate::Binary(t, _) => Gate::Binary(*t, [inputs[0], inputs[1]]),
            Gate::Ternary(t, _) => Gate::Ternary(*t, [inputs[0], inputs[1], inputs[2]]),
        }
    }

    /// Whether this is an AND, either native or a majority with a constant-0 fan-in.
    ///
    /// Returns the two non-constant fan-ins.
    pub fn as_and(&self) -> Option<[Signal; 2]> {
        match *self {
            Gate::Binary(BinaryType::And, inputs) => Some(inputs),
            Gate::Ternary(TernaryType::Maj, [a, b, c]) => {
                if a == Signal::zero() {
                    Some([b, c])
                } else if b == Signal::zero() {
                    Some([a, c])
                } else if c == Signal::zero() {
                    Some([a, b])
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Whether this is an OR, either native or a majority with a constant-1 fan-in.
    ///
    /// Returns the two non-constant fan-ins.
    pub fn as_or(&self) -> Option<[Signal; 2]> {
        match *self {
            Gate::Binary(BinaryType::Or, inputs) => Some(inputs),
            Gate::Ternary(TernaryType::Maj, [a, b, c]) => {
                if a == Signal::one() {
                    Some([b, c])
                } else if b == Signal::one() {
                    Some([a, c])
                } else if c == Signal::one() {
                    Some([a, b])
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Display for GateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GateType::And => "and",
            GateType::Or => "or",
            GateType::Xor => "xor",
            GateType::Maj => "maj",
        };
        write!(f, "{}", s)
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.gate_type())?;
        for (i, s) in self.inputs().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_and() {
        let a = Signal::from_node(1);
        let b = Signal::from_node(2);
        let gate = Gate::and(a, b);
        assert_eq!(gate.inputs(), &[a, b]);
        assert_eq!(gate.gate_type(), GateType::And);
        assert_eq!(gate.as_and(), Some([a, b]));
    }

    #[test]
    fn test_gate_maj_as_and() {
        let a = Signal::from_node(1);
        let b = Signal::from_node(2);
        let gate = Gate::maj(Signal::zero(), a, b);
        assert_eq!(gate.as_and(), Some([a, b]));
        assert_eq!(Gate::maj(Signal::one(), a, b).as_and(), None);
        assert_eq!(Gate::xor(a, b).as_and(), None);
        assert_eq!(Gate::maj(a, Signal::one(), b).as_or(), Some([a, b]));
        assert_eq!(Gate::or(a, b).as_or(), Some([a, b]));
    }

    #[test]
    fn test_display() {
        let a = Signal::from_node(1);
        let b = Signal::from_node(2);
        assert_eq!(Gate::xor(a, !b).to_string(), "xor(n1, !n2)");
    }
}
