// src/utils/report.rs

use crate::model::structure::Structure;

/// Plain-text summary of a generated structure: composition, cell and the
/// first `max_atoms` positions.
pub fn structure_summary(structure: &Structure, title: &str, max_atoms: usize) -> String {
    let formula_str: String = structure
        .composition()
        .iter()
        .map(|(el, count)| format!("{}{}", el, count))
        .collect::<Vec<_>>()
        .join(" ");

    let pbc_str: Vec<&str> = structure
        .pbc()
        .iter()
        .map(|&p| if p { "T" } else { "F" })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Crystal: {}\n", title));
    out.push_str(&format!("Formula: {}\n", formula_str));
    out.push_str(&format!("Atoms:   {}\n", structure.len()));
    out.push_str(&format!("Volume:  {:.4} Å³\n", structure.volume()));
    out.push_str(&format!("PBC:     {}\n", pbc_str.join(" ")));
    out.push_str("Lattice:\n");
    for v in structure.lattice() {
        out.push_str(&format!("  {:>12.6} {:>12.6} {:>12.6}\n", v[0], v[1], v[2]));
    }
    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!(
        "{:<8} {:<8} {:<10} {:<10} {:<10}\n",
        "Index", "Element", "X", "Y", "Z"
    ));
    out.push_str("--------------------------------------------------\n");

    for (i, atom) in structure.iter().take(max_atoms).enumerate() {
        out.push_str(&format!(
            "{:<8} {:<8} {:<10.4} {:<10.4} {:<10.4}\n",
            i,
            atom.symbol().unwrap_or("X"),
            atom.position[0],
            atom.position[1],
            atom.position[2]
        ));
    }

    if structure.len() > max_atoms {
        out.push_str(&format!(
            "... and {} more atoms.\n",
            structure.len() - max_atoms
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::structure::Atom;

    #[test]
    fn test_summary_truncates() {
        let atoms = (0..5)
            .map(|i| Atom {
                position: [i as f64, 0.0, 0.0],
                ..Atom::with_symbol("Fe")
            })
            .collect();
        let s = Structure::new(
            atoms,
            [[5.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [true, false, false],
            1e-6,
        );

        let out = structure_summary(&s, "chain", 3);
        assert!(out.contains("Formula: Fe5"));
        assert_eq!(s.composition(), vec![("Fe".to_string(), 5)]);
        assert!(out.contains("PBC:     T F F"));
        assert!(out.contains("... and 2 more atoms."));
        assert_eq!(out.matches("Fe ").count(), 3);
    }
}
