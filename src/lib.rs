//! Explicit atom-by-atom crystal construction.
//!
//! A crystal is described by six lattice parameters, a motif of template atoms
//! at fractional sites, an optional orientation of the cell vectors and an
//! optional number of repetitions. [`Crystal`] turns that description into a
//! [`Structure`] holding deduplicated Cartesian positions inside an
//! axis-aligned bounding cell.
//!
//! ```
//! use crysgen::{Atom, BuildOptions, Crystal};
//!
//! // Antiferromagnetic bcc Cr
//! let motif = vec![
//!     (Atom::with_symbol("Cr").with("magmom", 1.0), [0.0, 0.0, 0.0]),
//!     (Atom::with_symbol("Cr").with("magmom", -1.0), [0.5, 0.5, 0.5]),
//! ];
//! let crystal = Crystal::cubic(&motif, 2.85, &BuildOptions::default()).unwrap();
//!
//! assert_eq!(crystal.len(), 2);
//! assert!((crystal[1].position[0] - 1.425).abs() < 1e-6);
//! ```

pub mod config;
pub mod model;
pub mod physics;
pub mod recipe;
pub mod utils;

pub use model::{Atom, Bond, Element, LatticeParameters, LatticeSystem, Structure};
pub use physics::operations::crystal::{
    build_crystal, build_crystal_with, BuildOptions, Crystal, DEFAULT_TOLERANCE,
};
pub use physics::CrystalError;
pub use utils::geometry::{MinimumImage, NearestImage};
