use crate::physics::error::CrystalError;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

/// A single atom: a Cartesian position plus arbitrary named properties
/// (`symbol`, `magmom`, `charge`, ...).
///
/// `Clone` is a deep copy, so an atom placed into a structure never shares
/// state with the template it was copied from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub position: [f64; 3],
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Atom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template atom carrying only a chemical symbol.
    pub fn with_symbol(symbol: &str) -> Self {
        Self::new().with("symbol", symbol)
    }

    /// Builder-style property setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.properties.get("symbol").and_then(Value::as_str)
    }
}

/// An undirected bond between two atoms of a [`Structure`], addressed by
/// atom index. `(i, j)` and `(j, i)` name the same bond.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub indices: (usize, usize),
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Bond {
    pub fn new(i: usize, j: usize) -> Self {
        Self {
            indices: (i, j),
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn joins(&self, indices: (usize, usize)) -> bool {
        let (i, j) = self.indices;
        (i, j) == indices || (j, i) == indices
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.0 == index || self.indices.1 == index
    }
}

/// Generic container for a collection of atoms inside a simulation cell,
/// plus the bonds between them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Structure {
    atoms: Vec<Atom>,
    #[serde(default)]
    bonds: Vec<Bond>,
    // Lattice vectors: [a_vec, b_vec, c_vec]
    lattice: [[f64; 3]; 3],
    pbc: [bool; 3],
    tolerance: f64,
}

impl Structure {
    pub fn new(atoms: Vec<Atom>, lattice: [[f64; 3]; 3], pbc: [bool; 3], tolerance: f64) -> Self {
        Self {
            atoms,
            bonds: Vec::new(),
            lattice,
            pbc,
            tolerance,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn lattice(&self) -> [[f64; 3]; 3] {
        self.lattice
    }

    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Appends an atom and returns its index.
    pub fn insert_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Removes and returns the atom at `index`, shifting later atoms down.
    /// Bonds to the removed atom are dropped and the rest are renumbered.
    pub fn remove_atom(&mut self, index: usize) -> Option<Atom> {
        if index >= self.atoms.len() {
            return None;
        }
        self.bonds.retain(|b| !b.contains(index));
        for bond in &mut self.bonds {
            let (i, j) = &mut bond.indices;
            if *i > index {
                *i -= 1;
            }
            if *j > index {
                *j -= 1;
            }
        }
        Some(self.atoms.remove(index))
    }

    pub fn select_atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn select_atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Inserts a bond between two existing, distinct atoms. A bond already
    /// joining the same pair is replaced and returned.
    pub fn insert_bond(&mut self, bond: Bond) -> Result<Option<Bond>, CrystalError> {
        self.check_bond(&bond)?;
        match self.bonds.iter_mut().find(|b| b.joins(bond.indices)) {
            Some(existing) => Ok(Some(std::mem::replace(existing, bond))),
            None => {
                self.bonds.push(bond);
                Ok(None)
            }
        }
    }

    /// Removes and returns the bond joining `indices`, in either order.
    pub fn remove_bond(&mut self, indices: (usize, usize)) -> Option<Bond> {
        let pos = self.bonds.iter().position(|b| b.joins(indices))?;
        Some(self.bonds.remove(pos))
    }

    pub fn select_bond(&self, indices: (usize, usize)) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.joins(indices))
    }

    pub fn select_bond_mut(&mut self, indices: (usize, usize)) -> Option<&mut Bond> {
        self.bonds.iter_mut().find(|b| b.joins(indices))
    }

    fn check_bond(&self, bond: &Bond) -> Result<(), CrystalError> {
        let (i, j) = bond.indices;
        if i == j || i >= self.atoms.len() || j >= self.atoms.len() {
            return Err(CrystalError::InvalidBond {
                indices: bond.indices,
                atoms: self.atoms.len(),
            });
        }
        Ok(())
    }

    /// Cell volume (absolute value of the lattice determinant).
    pub fn volume(&self) -> f64 {
        let m = self.lattice;
        let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        det.abs()
    }

    /// Atom count per symbol, sorted by symbol. Atoms without a `symbol`
    /// property are counted as "X".
    pub fn composition(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for atom in &self.atoms {
            let symbol = atom.symbol().unwrap_or("X").to_string();
            *counts.entry(symbol).or_insert(0) += 1;
        }
        let mut parts: Vec<_> = counts.into_iter().collect();
        parts.sort_by(|a, b| a.0.cmp(&b.0));
        parts
    }

    /// Formula string sorted by symbol, e.g. "Cl4Na4".
    pub fn formula(&self) -> String {
        self.composition()
            .into_iter()
            .map(|(el, count)| {
                if count > 1 {
                    format!("{}{}", el, count)
                } else {
                    el
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a structure written by [`Structure::to_json`]. Bonds that do not
    /// join two existing atoms are rejected.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        let structure: Self = serde_json::from_str(s)?;
        if let Some(err) = structure
            .bonds
            .iter()
            .find_map(|b| structure.check_bond(b).err())
        {
            return Err(serde_json::Error::custom(err));
        }
        Ok(structure)
    }
}

impl Index<usize> for Structure {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
