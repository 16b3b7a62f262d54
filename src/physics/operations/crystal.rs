// src/physics/operations/crystal.rs
use crate::model::lattice::{LatticeParameters, LatticeSystem};
use crate::model::structure::{Atom, Structure};
use crate::physics::error::CrystalError;
use crate::physics::operations::tiling::minimum_tiles;
use crate::physics::orientation::orient;
use crate::utils::geometry::{MinimumImage, NearestImage};
use crate::utils::linalg::{
    basis_vectors, column_magnitudes, frac_to_cart, metric_tensor, normalized_volume,
    to_lattice_rows,
};
use nalgebra::{Matrix3, Vector3};

pub const DEFAULT_TOLERANCE: f64 = 1.0e-6;

/// Below this normalized volume the natural basis counts as degenerate.
const SINGULAR_BASIS_TOLERANCE: f64 = 1e-10;

/// Optional arguments of a construction call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildOptions {
    /// Repetitions of the cell along each basis direction.
    pub duplicates: [u32; 3],
    /// Target direction of each cell vector, one per row. Rows need not be unit length.
    pub orientation: [[f64; 3]; 3],
    /// Axes that are periodic when deduplicating (and in the final structure).
    pub pbc: [bool; 3],
    /// Used both for boundary wrapping and for duplicate detection.
    pub tolerance: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            duplicates: [1, 1, 1],
            orientation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            pbc: [false, false, false],
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl BuildOptions {
    pub fn duplicates(mut self, duplicates: [u32; 3]) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn orientation(mut self, orientation: [[f64; 3]; 3]) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn pbc(mut self, pbc: [bool; 3]) -> Self {
        self.pbc = pbc;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn validate(&self) -> Result<(), CrystalError> {
        if self.duplicates.iter().any(|&d| d == 0) {
            return Err(CrystalError::InvalidDuplicates(self.duplicates));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CrystalError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Brings `value` into [-tol, period - tol) by whole periods.
///
/// Stepwise rather than a single modulo so values sitting on the boundary
/// do not flip sides through rounding.
fn wrap_coordinate(value: f64, period: f64, tol: f64) -> f64 {
    let mut v = value;
    if v < -tol {
        while v < -tol {
            v += period;
        }
    } else if v >= period - tol {
        while v >= period - tol {
            v -= period;
        }
    }
    v
}

/// Builds the atoms and bounding basis of a crystal using the default
/// minimum-image search for duplicate detection.
///
/// `motif` pairs each template atom with its fractional site. The returned
/// basis holds the cell vectors as columns.
pub fn build_crystal(
    motif: &[(Atom, [f64; 3])],
    params: &LatticeParameters,
    options: &BuildOptions,
) -> Result<(Vec<Atom>, Matrix3<f64>), CrystalError> {
    build_crystal_with(motif, params, options, &MinimumImage)
}

/// Same as [`build_crystal`] with a caller-supplied nearest-image search.
pub fn build_crystal_with<N: NearestImage>(
    motif: &[(Atom, [f64; 3])],
    params: &LatticeParameters,
    options: &BuildOptions,
    finder: &N,
) -> Result<(Vec<Atom>, Matrix3<f64>), CrystalError> {
    // ========== INPUT VALIDATION ==========
    params.validate()?;
    options.validate()?;
    if motif.is_empty() {
        return Err(CrystalError::EmptyMotif);
    }
    if let Some((index, (_, site))) = motif
        .iter()
        .enumerate()
        .find(|(_, (_, site))| site.iter().any(|v| !v.is_finite()))
    {
        return Err(CrystalError::InvalidSite { index, site: *site });
    }

    // ========== 1. NATURAL BASIS ==========
    let natural = basis_vectors(&metric_tensor(params));
    if natural.iter().any(|v| !v.is_finite()) {
        return Err(CrystalError::InvalidLatticeParameters(
            "obtuse angles give a negative metric entry".to_string(),
        ));
    }
    if normalized_volume(&natural) < SINGULAR_BASIS_TOLERANCE {
        return Err(CrystalError::InvalidLatticeParameters(
            "angles do not describe a three-dimensional cell".to_string(),
        ));
    }
    let natural_magnitudes = column_magnitudes(&natural);

    // ========== 2. ORIENTATION ==========
    let o = options.orientation;
    let orientation = Matrix3::new(
        o[0][0], o[0][1], o[0][2], //
        o[1][0], o[1][1], o[1][2], //
        o[2][0], o[2][1], o[2][2],
    );
    let oriented = orient(&natural, &orientation, options.duplicates)?;
    let bounds = oriented.magnitudes;

    // ========== 3. LOOP BOUNDS ==========
    let tiles = minimum_tiles(&natural_magnitudes, &bounds, options.duplicates);
    log::debug!(
        "Enumerating {}x{}x{} cells with {} motif sites",
        tiles[0],
        tiles[1],
        tiles[2],
        motif.len()
    );

    // ========== 4. ENUMERATE + DEDUPLICATE ==========
    let tol = options.tolerance;
    let mut atoms: Vec<Atom> = Vec::new();
    let mut accepted: Vec<Vector3<f64>> = Vec::new();
    let mut discarded = 0usize;

    for x in 0..tiles[0] {
        for y in 0..tiles[1] {
            for z in 0..tiles[2] {
                let offset = frac_to_cart(&Vector3::new(x as f64, y as f64, z as f64), &natural);

                for (template, site) in motif {
                    let frac = Vector3::from(*site);
                    let raw = frac_to_cart(&frac, &natural) + offset;
                    let mut position = oriented.rotation * raw;

                    for axis in 0..3 {
                        position[axis] = wrap_coordinate(position[axis], bounds[axis], tol);
                    }

                    let occupied = finder
                        .nearest_image_distance(&position, &accepted, &oriented.basis, options.pbc)
                        .is_some_and(|(distance, _)| distance <= tol);
                    if occupied {
                        discarded += 1;
                        continue;
                    }

                    let mut atom = template.clone();
                    atom.position = [position.x, position.y, position.z];
                    atoms.push(atom);
                    accepted.push(position);
                }
            }
        }
    }

    log::info!(
        "Generated {} atoms ({} periodic images discarded)",
        atoms.len(),
        discarded
    );

    Ok((atoms, oriented.basis))
}

/// Crystal constructors. Each returns a finished [`Structure`] whose lattice
/// rows are the oriented, reorthogonalized cell vectors.
pub struct Crystal;

impl Crystal {
    /// General entry point: all six lattice parameters are free.
    pub fn new(
        motif: &[(Atom, [f64; 3])],
        params: &LatticeParameters,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        let (atoms, basis) = build_crystal(motif, params, options)?;
        Ok(Structure::new(
            atoms,
            to_lattice_rows(&basis),
            options.pbc,
            options.tolerance,
        ))
    }

    /// Builds from one of the seven crystal-system presets.
    pub fn from_system(
        motif: &[(Atom, [f64; 3])],
        system: &LatticeSystem,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        log::debug!("Building {} crystal", system.name());
        Self::new(motif, &system.parameters(), options)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn triclinic(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        let system = LatticeSystem::Triclinic {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        };
        Self::from_system(motif, &system, options)
    }

    pub fn monoclinic(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        b: f64,
        c: f64,
        beta: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        Self::from_system(motif, &LatticeSystem::Monoclinic { a, b, c, beta }, options)
    }

    pub fn orthorhombic(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        b: f64,
        c: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        Self::from_system(motif, &LatticeSystem::Orthorhombic { a, b, c }, options)
    }

    pub fn tetragonal(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        c: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        Self::from_system(motif, &LatticeSystem::Tetragonal { a, c }, options)
    }

    pub fn rhombohedral(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        alpha: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        Self::from_system(motif, &LatticeSystem::Rhombohedral { a, alpha }, options)
    }

    pub fn hexagonal(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        c: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        Self::from_system(motif, &LatticeSystem::Hexagonal { a, c }, options)
    }

    pub fn cubic(
        motif: &[(Atom, [f64; 3])],
        a: f64,
        options: &BuildOptions,
    ) -> Result<Structure, CrystalError> {
        Self::from_system(motif, &LatticeSystem::Cubic { a }, options)
    }
}
