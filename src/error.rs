//! Error types shared by every fallible operation.
//!
//! Structural invariant violations inside a network or a decision-diagram
//! manager are programming errors and panic instead.
//!
//! Floating-point counts (`f64` minterm and path counts) lose exactness past
//! 2^53 and saturate to infinity past 2^1023; use the `BigUint` variants
//! where exactness matters.

use thiserror::Error;

use crate::store::Kind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cannot convert {from} to {to}: {reason}")]
    ConversionUnsupported { from: Kind, to: Kind, reason: String },

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Store for {0} is empty")]
    EmptyStore(Kind),

    #[error(
        "Interface mismatch: {left_inputs}/{left_outputs} vs {right_inputs}/{right_outputs} inputs/outputs"
    )]
    InterfaceMismatch {
        left_inputs: usize,
        left_outputs: usize,
        right_inputs: usize,
        right_outputs: usize,
    },

    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    pub(crate) fn unsupported(from: Kind, to: Kind, reason: impl Into<String>) -> Self {
        Error::ConversionUnsupported {
            from,
            to,
            reason: reason.into(),
        }
    }
}
