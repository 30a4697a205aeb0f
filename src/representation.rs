//! Chromosome representations
//!
//! Every operator declares which representations it supports; the builder
//! rejects incompatible wiring before a run starts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value domain of the genes in a chromosome.
///
/// Chromosomes are stored as `Vec<f64>` regardless of representation;
/// the tag records how operators are allowed to interpret the genes
/// (binary chromosomes hold 0.0/1.0, permutations hold distinct indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    /// Real-valued vector
    Real,
    /// Bit string encoded as 0.0/1.0 genes
    Binary,
    /// Permutation of indices
    Permutation,
}

impl Representation {
    /// All known representations, for operators without restrictions
    pub const ALL: &'static [Representation] = &[
        Representation::Real,
        Representation::Binary,
        Representation::Permutation,
    ];
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::Real => "real-valued",
            Representation::Binary => "binary",
            Representation::Permutation => "permutation",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Representation::Real.to_string(), "real-valued");
        assert_eq!(Representation::Binary.to_string(), "binary");
        assert_eq!(Representation::Permutation.to_string(), "permutation");
    }

    #[test]
    fn test_all_contains_every_variant() {
        assert_eq!(Representation::ALL.len(), 3);
        assert!(Representation::ALL.contains(&Representation::Real));
        assert!(Representation::ALL.contains(&Representation::Binary));
        assert!(Representation::ALL.contains(&Representation::Permutation));
    }
}
