// src/physics/mod.rs
pub mod error;
pub mod operations;
pub mod orientation;

pub use error::CrystalError;
