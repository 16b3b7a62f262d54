use crysgen::utils::linalg;
use crysgen::{Atom, BuildOptions, Crystal, CrystalError, MinimumImage, NearestImage, Structure};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

fn bcc(symbol: &str) -> Vec<(Atom, [f64; 3])> {
    vec![
        (Atom::with_symbol(symbol), [0.0, 0.0, 0.0]),
        (Atom::with_symbol(symbol), [0.5, 0.5, 0.5]),
    ]
}

fn fcc(symbol: &str) -> Vec<(Atom, [f64; 3])> {
    vec![
        (Atom::with_symbol(symbol), [0.0, 0.0, 0.0]),
        (Atom::with_symbol(symbol), [0.5, 0.5, 0.0]),
        (Atom::with_symbol(symbol), [0.5, 0.0, 0.5]),
        (Atom::with_symbol(symbol), [0.0, 0.5, 0.5]),
    ]
}

fn basis_of(s: &Structure) -> Matrix3<f64> {
    let l = s.lattice();
    Matrix3::from_columns(&[
        Vector3::from(l[0]),
        Vector3::from(l[1]),
        Vector3::from(l[2]),
    ])
}

fn positions(s: &Structure) -> Vec<Vector3<f64>> {
    s.iter().map(|a| Vector3::from(a.position)).collect()
}

/// Sorted minimum-image distances between all pairs.
fn pair_distances(s: &Structure) -> Vec<f64> {
    let basis = basis_of(s);
    let points = positions(s);
    let mut out = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let (d, _) = MinimumImage
                .nearest_image_distance(&points[i], &points[j..=j], &basis, s.pbc())
                .unwrap();
            out.push(d);
        }
    }
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

#[test]
fn single_atom_cubic_cell() {
    let motif = vec![(Atom::with_symbol("Po"), [0.0, 0.0, 0.0])];
    let s = Crystal::cubic(&motif, 3.35, &BuildOptions::default()).unwrap();

    assert_eq!(s.len(), 1);
    assert!(Vector3::from(s[0].position).norm() < 1e-9);

    let expected = Matrix3::from_diagonal(&Vector3::new(3.35, 3.35, 3.35));
    assert!((basis_of(&s) - expected).abs().max() < 1e-6);
}

#[test]
fn body_centered_two_atoms() {
    let s = Crystal::triclinic(
        &bcc("Fe"),
        2.85,
        2.85,
        2.85,
        FRAC_PI_2,
        FRAC_PI_2,
        FRAC_PI_2,
        &BuildOptions::default(),
    )
    .unwrap();

    assert_eq!(s.len(), 2);
    assert!((Vector3::from(s[0].position)).norm() < 1e-6);
    assert!((Vector3::from(s[1].position) - Vector3::new(1.425, 1.425, 1.425)).norm() < 1e-6);
}

#[test]
fn duplicated_periodic_crystal_has_no_overlaps() {
    let options = BuildOptions::default()
        .duplicates([2, 1, 1])
        .pbc([true, true, true]);
    let s = Crystal::cubic(&fcc("Al"), 4.05, &options).unwrap();

    assert_eq!(s.len(), 8);
    let closest = pair_distances(&s)[0];
    assert!(closest > s.tolerance());
    // Nearest neighbour distance in fcc is a / sqrt(2)
    assert!((closest - 4.05 / 2.0_f64.sqrt()).abs() < 1e-6);
}

#[test]
fn duplication_multiplies_atom_count() {
    let mut previous = 0;
    for dup in [[1, 1, 1], [2, 1, 1], [2, 3, 1], [2, 3, 2]] {
        let options = BuildOptions::default().duplicates(dup);
        let s = Crystal::orthorhombic(&bcc("W"), 3.0, 3.5, 4.0, &options).unwrap();

        let cells = (dup[0] * dup[1] * dup[2]) as usize;
        assert_eq!(s.len(), 2 * cells, "duplicates {:?}", dup);
        assert!(s.len() >= previous);
        previous = s.len();
    }
}

#[test]
fn reorientation_is_rigid() {
    // Quarter turn about z: a along +y, b along -x
    let motif = vec![
        (Atom::with_symbol("Ti"), [0.0, 0.0, 0.0]),
        (Atom::with_symbol("O"), [0.3, 0.3, 0.0]),
        (Atom::with_symbol("O"), [0.8, 0.2, 0.5]),
    ];
    let base = BuildOptions::default().pbc([true, true, true]);
    let rotated = base.orientation([[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);

    let s0 = Crystal::tetragonal(&motif, 4.6, 2.95, &base).unwrap();
    let s1 = Crystal::tetragonal(&motif, 4.6, 2.95, &rotated).unwrap();

    assert_eq!(s0.len(), s1.len());
    let d0 = pair_distances(&s0);
    let d1 = pair_distances(&s1);
    for (a, b) in d0.iter().zip(&d1) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }
}

#[test]
fn wrapped_positions_stay_in_bounds() {
    let options = BuildOptions::default()
        .orientation([[1.0, 1.0, 0.0], [-1.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        .duplicates([2, 1, 2]);
    let s = Crystal::cubic(&fcc("Cu"), 3.61, &options).unwrap();

    let bounds = linalg::column_magnitudes(&basis_of(&s));
    let tol = s.tolerance();
    for atom in &s {
        for axis in 0..3 {
            let v = atom.position[axis];
            assert!(
                v >= -tol && v < bounds[axis] - tol,
                "coordinate {} outside [{}, {})",
                v,
                -tol,
                bounds[axis] - tol
            );
        }
    }
    // 2 x 1 x 2 copies of a box holding 8 atoms
    assert_eq!(s.len(), 32);
}

#[test]
fn presets_match_triclinic() {
    let motif = bcc("Cr");
    let opts = BuildOptions::default().duplicates([2, 2, 1]);
    let right = FRAC_PI_2;

    let same = |a: &Structure, b: &Structure| {
        assert_eq!(a.len(), b.len());
        assert_eq!(a.lattice(), b.lattice());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.position, y.position);
        }
    };

    let t = |a, b, c, alpha, beta, gamma| {
        Crystal::triclinic(&motif, a, b, c, alpha, beta, gamma, &opts).unwrap()
    };

    same(&Crystal::cubic(&motif, 2.88, &opts).unwrap(), &t(2.88, 2.88, 2.88, right, right, right));
    same(
        &Crystal::tetragonal(&motif, 2.88, 4.1, &opts).unwrap(),
        &t(2.88, 2.88, 4.1, right, right, right),
    );
    same(
        &Crystal::orthorhombic(&motif, 2.0, 3.0, 4.0, &opts).unwrap(),
        &t(2.0, 3.0, 4.0, right, right, right),
    );
    same(
        &Crystal::monoclinic(&motif, 2.0, 3.0, 4.0, 1.3, &opts).unwrap(),
        &t(2.0, 3.0, 4.0, right, 1.3, right),
    );
    same(
        &Crystal::rhombohedral(&motif, 3.0, 1.2, &opts).unwrap(),
        &t(3.0, 3.0, 3.0, 1.2, 1.2, 1.2),
    );
}

#[test]
fn obtuse_hexagonal_cell_is_rejected() {
    let motif = vec![
        (Atom::with_symbol("Mg"), [0.0, 0.0, 0.0]),
        (Atom::with_symbol("Mg"), [1.0 / 3.0, 2.0 / 3.0, 0.5]),
    ];
    let opts = BuildOptions::default();

    assert!(matches!(
        Crystal::hexagonal(&motif, 3.21, 5.21, &opts),
        Err(CrystalError::InvalidLatticeParameters(_))
    ));
    assert!(matches!(
        Crystal::triclinic(&motif, 3.21, 3.21, 5.21, FRAC_PI_2, FRAC_PI_2, 2.0 * PI / 3.0, &opts),
        Err(CrystalError::InvalidLatticeParameters(_))
    ));
}

#[test]
fn structure_json_roundtrip_keeps_generated_atoms() {
    let s = Crystal::cubic(&bcc("Cr"), 2.85, &BuildOptions::default().pbc([true; 3])).unwrap();
    let back = Structure::from_json(&s.to_json().unwrap()).unwrap();

    assert_eq!(back.len(), s.len());
    assert_eq!(back.pbc(), [true; 3]);
    let drift = Vector3::from(back[1].position) - Vector3::from(s[1].position);
    assert!(drift.norm() < 1e-12);
    assert_eq!(back[1].symbol(), Some("Cr"));
}
