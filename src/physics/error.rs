use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CrystalError {
    InvalidLatticeParameters(String),
    InvalidOrientation(String),
    InvalidDuplicates([u32; 3]),
    InvalidTolerance(f64),
    EmptyMotif,
    InvalidSite { index: usize, site: [f64; 3] },
    InvalidBond { indices: (usize, usize), atoms: usize },
}

impl fmt::Display for CrystalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CrystalError::InvalidLatticeParameters(msg) => {
                write!(f, "Invalid lattice parameters: {}", msg)
            }
            CrystalError::InvalidOrientation(msg) => write!(f, "Invalid orientation: {}", msg),
            CrystalError::InvalidDuplicates(d) => write!(
                f,
                "Duplication counts must all be at least 1, got ({}, {}, {})",
                d[0], d[1], d[2]
            ),
            CrystalError::InvalidTolerance(t) => {
                write!(f, "Tolerance must be positive and finite, got {}", t)
            }
            CrystalError::EmptyMotif => write!(f, "Motif contains no atoms"),
            CrystalError::InvalidSite { index, site } => write!(
                f,
                "Lattice site #{} has non-finite fractional coordinates {:?}",
                index, site
            ),
            CrystalError::InvalidBond { indices, atoms } => write!(
                f,
                "Bond ({}, {}) must join two distinct atoms of {}",
                indices.0, indices.1, atoms
            ),
        }
    }
}

impl std::error::Error for CrystalError {}
