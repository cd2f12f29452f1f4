//! Knobs for conversions.

pub use crate::bdd::BddConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Largest input count for which a conversion may enumerate all assignments.
    pub enumeration_limit: usize,
    /// Recognize majority and xor windows when rebuilding graphs.
    pub detect_patterns: bool,
    /// Sizing of the managers created for function sets.
    pub bdd: BddConfig,
}

impl ConvertConfig {
    pub fn with_enumeration_limit(mut self, limit: usize) -> Self {
        self.enumeration_limit = limit;
        self
    }

    pub fn with_detect_patterns(mut self, detect: bool) -> Self {
        self.detect_patterns = detect;
        self
    }

    pub fn with_bdd(mut self, bdd: BddConfig) -> Self {
        self.bdd = bdd;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            enumeration_limit: 16,
            detect_patterns: true,
            bdd: BddConfig::default(),
        }
    }
}
