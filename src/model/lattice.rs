// src/model/lattice.rs

use crate::physics::error::CrystalError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Unit cell edge lengths and inter-axis angles (radians).
///
/// `alpha` is the angle between b and c, `beta` between a and c,
/// `gamma` between a and b.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Range checks only; degenerate angle combinations are caught once the
    /// basis is built.
    pub fn validate(&self) -> Result<(), CrystalError> {
        for (name, len) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !len.is_finite() || len <= 0.0 {
                return Err(CrystalError::InvalidLatticeParameters(format!(
                    "length {} must be positive, got {}",
                    name, len
                )));
            }
        }
        for (name, angle) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !angle.is_finite() || angle <= 0.0 || angle >= PI {
                return Err(CrystalError::InvalidLatticeParameters(format!(
                    "angle {} must lie in (0, pi), got {}",
                    name, angle
                )));
            }
        }
        Ok(())
    }
}

/// The seven conventional crystal systems, each carrying only its free parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum LatticeSystem {
    Triclinic {
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    },
    /// alpha = gamma = pi/2
    Monoclinic { a: f64, b: f64, c: f64, beta: f64 },
    /// alpha = beta = gamma = pi/2
    Orthorhombic { a: f64, b: f64, c: f64 },
    /// a = b, all angles pi/2
    Tetragonal { a: f64, c: f64 },
    /// a = b = c, alpha = beta = gamma
    Rhombohedral { a: f64, alpha: f64 },
    /// a = b, alpha = beta = pi/2, gamma = 2pi/3
    Hexagonal { a: f64, c: f64 },
    /// a = b = c, all angles pi/2
    Cubic { a: f64 },
}

impl LatticeSystem {
    pub fn parameters(&self) -> LatticeParameters {
        match *self {
            LatticeSystem::Triclinic {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            } => LatticeParameters::new(a, b, c, alpha, beta, gamma),
            LatticeSystem::Monoclinic { a, b, c, beta } => {
                LatticeParameters::new(a, b, c, FRAC_PI_2, beta, FRAC_PI_2)
            }
            LatticeSystem::Orthorhombic { a, b, c } => {
                LatticeParameters::new(a, b, c, FRAC_PI_2, FRAC_PI_2, FRAC_PI_2)
            }
            LatticeSystem::Tetragonal { a, c } => {
                LatticeParameters::new(a, a, c, FRAC_PI_2, FRAC_PI_2, FRAC_PI_2)
            }
            LatticeSystem::Rhombohedral { a, alpha } => {
                LatticeParameters::new(a, a, a, alpha, alpha, alpha)
            }
            LatticeSystem::Hexagonal { a, c } => {
                LatticeParameters::new(a, a, c, FRAC_PI_2, FRAC_PI_2, 2.0 * PI / 3.0)
            }
            LatticeSystem::Cubic { a } => {
                LatticeParameters::new(a, a, a, FRAC_PI_2, FRAC_PI_2, FRAC_PI_2)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LatticeSystem::Triclinic { .. } => "triclinic",
            LatticeSystem::Monoclinic { .. } => "monoclinic",
            LatticeSystem::Orthorhombic { .. } => "orthorhombic",
            LatticeSystem::Tetragonal { .. } => "tetragonal",
            LatticeSystem::Rhombohedral { .. } => "rhombohedral",
            LatticeSystem::Hexagonal { .. } => "hexagonal",
            LatticeSystem::Cubic { .. } => "cubic",
        }
    }
}
