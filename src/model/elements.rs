// src/model/elements.rs
//
// Per-element metadata. One table row per element with an optional set of
// extra numeric properties that is copied onto every atom built from it.

use crate::model::structure::Atom;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element {
    pub name: &'static str,
    /// IUPAC chemical symbol.
    pub symbol: &'static str,
    /// Atomic number (Z).
    pub number: u8,
    /// Extra per-element properties, empty for the built-in table.
    pub properties: &'static [(&'static str, f64)],
}

impl Element {
    pub const fn new(name: &'static str, symbol: &'static str, number: u8) -> Self {
        Self {
            name,
            symbol,
            number,
            properties: &[],
        }
    }

    /// Same element carrying extra properties, e.g. an isotope mass.
    pub const fn with_properties(self, properties: &'static [(&'static str, f64)]) -> Self {
        Self { properties, ..self }
    }

    pub fn property(&self, key: &str) -> Option<f64> {
        self.properties
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, v)| v)
    }

    /// Template atom for this element with `name`, `symbol`, `number` and every
    /// entry of `properties` set. Further properties (e.g. `magmom`) can be
    /// chained with [`Atom::with`].
    pub fn atom(&self) -> Atom {
        let mut atom = Atom::with_symbol(self.symbol)
            .with("name", self.name)
            .with("number", self.number);
        for &(key, value) in self.properties {
            atom.set(key, value);
        }
        atom
    }
}

pub static ELEMENTS: [Element; 92] = [
    Element::new("Hydrogen", "H", 1),
    Element::new("Helium", "He", 2),
    Element::new("Lithium", "Li", 3),
    Element::new("Beryllium", "Be", 4),
    Element::new("Boron", "B", 5),
    Element::new("Carbon", "C", 6),
    Element::new("Nitrogen", "N", 7),
    Element::new("Oxygen", "O", 8),
    Element::new("Fluorine", "F", 9),
    Element::new("Neon", "Ne", 10),
    Element::new("Sodium", "Na", 11),
    Element::new("Magnesium", "Mg", 12),
    Element::new("Aluminum", "Al", 13),
    Element::new("Silicon", "Si", 14),
    Element::new("Phosphorus", "P", 15),
    Element::new("Sulfur", "S", 16),
    Element::new("Chlorine", "Cl", 17),
    Element::new("Argon", "Ar", 18),
    Element::new("Potassium", "K", 19),
    Element::new("Calcium", "Ca", 20),
    Element::new("Scandium", "Sc", 21),
    Element::new("Titanium", "Ti", 22),
    Element::new("Vanadium", "V", 23),
    Element::new("Chromium", "Cr", 24),
    Element::new("Manganese", "Mn", 25),
    Element::new("Iron", "Fe", 26),
    Element::new("Cobalt", "Co", 27),
    Element::new("Nickel", "Ni", 28),
    Element::new("Copper", "Cu", 29),
    Element::new("Zinc", "Zn", 30),
    Element::new("Gallium", "Ga", 31),
    Element::new("Germanium", "Ge", 32),
    Element::new("Arsenic", "As", 33),
    Element::new("Selenium", "Se", 34),
    Element::new("Bromine", "Br", 35),
    Element::new("Krypton", "Kr", 36),
    Element::new("Rubidium", "Rb", 37),
    Element::new("Strontium", "Sr", 38),
    Element::new("Yttrium", "Y", 39),
    Element::new("Zirconium", "Zr", 40),
    Element::new("Niobium", "Nb", 41),
    Element::new("Molybdenum", "Mo", 42),
    Element::new("Technetium", "Tc", 43),
    Element::new("Ruthenium", "Ru", 44),
    Element::new("Rhodium", "Rh", 45),
    Element::new("Palladium", "Pd", 46),
    Element::new("Silver", "Ag", 47),
    Element::new("Cadmium", "Cd", 48),
    Element::new("Indium", "In", 49),
    Element::new("Tin", "Sn", 50),
    Element::new("Antimony", "Sb", 51),
    Element::new("Tellurium", "Te", 52),
    Element::new("Iodine", "I", 53),
    Element::new("Xenon", "Xe", 54),
    Element::new("Caesium", "Cs", 55),
    Element::new("Barium", "Ba", 56),
    Element::new("Lanthanum", "La", 57),
    Element::new("Cerium", "Ce", 58),
    Element::new("Praseodymium", "Pr", 59),
    Element::new("Neodymium", "Nd", 60),
    Element::new("Promethium", "Pm", 61),
    Element::new("Samarium", "Sm", 62),
    Element::new("Europium", "Eu", 63),
    Element::new("Gadolinium", "Gd", 64),
    Element::new("Terbium", "Tb", 65),
    Element::new("Dysprosium", "Dy", 66),
    Element::new("Holmium", "Ho", 67),
    Element::new("Erbium", "Er", 68),
    Element::new("Thulium", "Tm", 69),
    Element::new("Ytterbium", "Yb", 70),
    Element::new("Lutetium", "Lu", 71),
    Element::new("Hafnium", "Hf", 72),
    Element::new("Tantalum", "Ta", 73),
    Element::new("Tungsten", "W", 74),
    Element::new("Rhenium", "Re", 75),
    Element::new("Osmium", "Os", 76),
    Element::new("Iridium", "Ir", 77),
    Element::new("Platinum", "Pt", 78),
    Element::new("Gold", "Au", 79),
    Element::new("Mercury", "Hg", 80),
    Element::new("Thallium", "Tl", 81),
    Element::new("Lead", "Pb", 82),
    Element::new("Bismuth", "Bi", 83),
    Element::new("Polonium", "Po", 84),
    Element::new("Astatine", "At", 85),
    Element::new("Radon", "Rn", 86),
    Element::new("Francium", "Fr", 87),
    Element::new("Radium", "Ra", 88),
    Element::new("Actinium", "Ac", 89),
    Element::new("Thorium", "Th", 90),
    Element::new("Protactinium", "Pa", 91),
    Element::new("Uranium", "U", 92),
];

pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

pub fn element_by_number(number: u8) -> Option<&'static Element> {
    // Table is ordered by Z starting at 1
    ELEMENTS.get(usize::from(number).checked_sub(1)?)
}

/// Returns the atomic number (Z) for a given element symbol.
pub fn get_atomic_number(element: &str) -> Option<u8> {
    element_by_symbol(element).map(|e| e.number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_by_number() {
        for (i, e) in ELEMENTS.iter().enumerate() {
            assert_eq!(usize::from(e.number), i + 1, "{} out of order", e.symbol);
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(get_atomic_number("Fe"), Some(26));
        assert_eq!(get_atomic_number("Xx"), None);
        assert_eq!(element_by_number(79).map(|e| e.symbol), Some("Au"));
        assert_eq!(element_by_number(0), None);
        assert_eq!(element_by_number(93), None);
        assert_eq!(element_by_symbol("Sc").map(|e| e.name), Some("Scandium"));
    }

    #[test]
    fn test_element_atom_template() {
        let cr = element_by_symbol("Cr").unwrap().atom().with("magmom", 1.0);
        assert_eq!(cr.symbol(), Some("Cr"));
        assert_eq!(cr.get("number").and_then(|v| v.as_u64()), Some(24));
        assert_eq!(cr.position, [0.0, 0.0, 0.0]);
        assert!(element_by_symbol("Cr").unwrap().properties.is_empty());
    }

    #[test]
    fn test_element_properties_reach_atom() {
        static DEUTERIUM: Element =
            Element::new("Deuterium", "D", 1).with_properties(&[("mass", 2.014), ("spin", 1.0)]);

        assert_eq!(DEUTERIUM.property("mass"), Some(2.014));
        assert_eq!(DEUTERIUM.property("charge"), None);

        let atom = DEUTERIUM.atom();
        assert_eq!(atom.symbol(), Some("D"));
        assert_eq!(atom.get("mass").and_then(|v| v.as_f64()), Some(2.014));
        assert_eq!(atom.get("spin").and_then(|v| v.as_f64()), Some(1.0));
        assert_eq!(atom.get("number").and_then(|v| v.as_u64()), Some(1));
    }
}
