//src/model/mod.rs
pub mod elements;
pub mod lattice;
pub mod structure;

// Re-exports for cleaner imports
pub use elements::{element_by_number, element_by_symbol, get_atomic_number, Element, ELEMENTS};
pub use lattice::{LatticeParameters, LatticeSystem};
pub use structure::{Atom, Bond, Structure};
