//! JSON description of a single crystal construction.
//!
//! ```json
//! {
//!   "name": "AFM Cr",
//!   "lattice": { "system": "cubic", "a": 2.85 },
//!   "motif": [
//!     { "properties": { "symbol": "Cr", "magmom": 1.0 }, "site": [0.0, 0.0, 0.0] },
//!     { "properties": { "symbol": "Cr", "magmom": -1.0 }, "site": [0.5, 0.5, 0.5] }
//!   ],
//!   "duplicates": [2, 2, 2],
//!   "pbc": [true, true, true]
//! }
//! ```

use crate::config::Config;
use crate::model::{Atom, LatticeSystem, Structure};
use crate::physics::operations::crystal::{BuildOptions, Crystal};
use crate::physics::CrystalError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct MotifEntry {
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    pub site: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub name: Option<String>,
    pub lattice: LatticeSystem,
    pub motif: Vec<MotifEntry>,
    #[serde(default)]
    pub duplicates: Option<[u32; 3]>,
    #[serde(default)]
    pub orientation: Option<[[f64; 3]; 3]>,
    #[serde(default)]
    pub pbc: Option<[bool; 3]>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl Recipe {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn title(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.lattice.name().to_string())
    }

    /// Fields left out of the recipe fall back to `config`, then to the built-in defaults.
    pub fn options(&self, config: &Config) -> BuildOptions {
        let defaults = BuildOptions::default();
        BuildOptions {
            duplicates: self.duplicates.unwrap_or(defaults.duplicates),
            orientation: self.orientation.unwrap_or(defaults.orientation),
            pbc: self.pbc.unwrap_or(config.pbc),
            tolerance: self.tolerance.unwrap_or(config.tolerance),
        }
    }

    pub fn motif(&self) -> Vec<(Atom, [f64; 3])> {
        self.motif
            .iter()
            .map(|entry| {
                let atom = Atom {
                    position: [0.0; 3],
                    properties: entry.properties.clone(),
                };
                (atom, entry.site)
            })
            .collect()
    }

    pub fn build(&self, config: &Config) -> Result<Structure, CrystalError> {
        Crystal::from_system(&self.motif(), &self.lattice, &self.options(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NACL: &str = r#"{
        "name": "rock salt",
        "lattice": { "system": "cubic", "a": 5.64 },
        "motif": [
            { "properties": { "symbol": "Na" }, "site": [0.0, 0.0, 0.0] },
            { "properties": { "symbol": "Na" }, "site": [0.5, 0.5, 0.0] },
            { "properties": { "symbol": "Na" }, "site": [0.5, 0.0, 0.5] },
            { "properties": { "symbol": "Na" }, "site": [0.0, 0.5, 0.5] },
            { "properties": { "symbol": "Cl" }, "site": [0.5, 0.0, 0.0] },
            { "properties": { "symbol": "Cl" }, "site": [0.0, 0.5, 0.0] },
            { "properties": { "symbol": "Cl" }, "site": [0.0, 0.0, 0.5] },
            { "properties": { "symbol": "Cl" }, "site": [0.5, 0.5, 0.5] }
        ],
        "pbc": [true, true, true]
    }"#;

    #[test]
    fn test_build_rock_salt() {
        let recipe = Recipe::from_json(NACL).unwrap();
        assert_eq!(recipe.title(), "rock salt");

        let s = recipe.build(&Config::default()).unwrap();
        assert_eq!(s.len(), 8);
        assert_eq!(s.formula(), "Cl4Na4");
        assert_eq!(s.pbc(), [true; 3]);
    }

    #[test]
    fn test_config_fallbacks() {
        let recipe = Recipe::from_json(
            r#"{ "lattice": { "system": "tetragonal", "a": 2.5, "c": 4.0 },
                 "motif": [ { "site": [0.0, 0.0, 0.0] } ] }"#,
        )
        .unwrap();
        let config = Config {
            tolerance: 1e-4,
            pbc: [true, true, false],
            ..Config::default()
        };

        let options = recipe.options(&config);
        assert_eq!(options.tolerance, 1e-4);
        assert_eq!(options.pbc, [true, true, false]);
        assert_eq!(options.duplicates, [1, 1, 1]);
        assert_eq!(recipe.title(), "tetragonal");
    }

    #[test]
    fn test_hexagonal_recipe_is_rejected() {
        let recipe = Recipe::from_json(
            r#"{ "lattice": { "system": "hexagonal", "a": 3.21, "c": 5.21 },
                 "motif": [ { "site": [0.0, 0.0, 0.0] } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            recipe.build(&Config::default()),
            Err(CrystalError::InvalidLatticeParameters(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_system() {
        let res = Recipe::from_json(
            r#"{ "lattice": { "system": "quasicrystal", "a": 1.0 }, "motif": [] }"#,
        );
        assert!(res.is_err());
    }
}
