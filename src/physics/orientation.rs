// src/physics/orientation.rs

use crate::physics::error::CrystalError;
use crate::utils::linalg::{column_magnitudes, normalized_volume};
use nalgebra::{Matrix3, Vector3};

/// Below this normalized volume a set of three directions counts as degenerate.
const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Result of aligning the natural basis with a requested orientation.
#[derive(Clone, Debug)]
pub struct OrientedBasis {
    /// Best-fit rotation applied to every generated position.
    pub rotation: Matrix3<f64>,
    /// Upper-triangular, non-negative bounding cell scaled by the duplication
    /// counts. Columns are the cell vectors.
    pub basis: Matrix3<f64>,
    /// Column norms of `basis`; the wrap period along each Cartesian axis.
    pub magnitudes: Vector3<f64>,
}

/// Rotation R minimising sum_i |a_i - R b_i|^2 (orthogonal Procrustes / Kabsch),
/// where a_i and b_i are the ROWS of `targets` and `directions`.
///
/// The vectors need not be normalised; longer vectors simply weigh more.
pub fn align_vectors(
    targets: &Matrix3<f64>,
    directions: &Matrix3<f64>,
) -> Result<Matrix3<f64>, CrystalError> {
    // B = sum_i a_i b_i^T
    let b = targets.transpose() * directions;
    let svd = b.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => {
            return Err(CrystalError::InvalidOrientation(
                "singular value decomposition did not converge".to_string(),
            ))
        }
    };

    let sv = svd.singular_values;
    let max_sv = sv.max();
    let weak = sv.iter().filter(|&&s| s <= max_sv * DEGENERACY_TOLERANCE).count();
    if !max_sv.is_finite() || max_sv == 0.0 || weak > 1 {
        return Err(CrystalError::InvalidOrientation(
            "directions do not determine a unique rotation".to_string(),
        ));
    }

    // Flip the axis of the smallest singular value if needed so R is proper
    let mut correction = Vector3::new(1.0, 1.0, 1.0);
    if (u.determinant() * v_t.determinant()) < 0.0 {
        correction[sv.imin()] = -1.0;
    }

    Ok(u * Matrix3::from_diagonal(&correction) * v_t)
}

/// Computes the rotation and the oriented bounding basis for one construction.
///
/// `natural` is the unrotated basis (columns are cell vectors), `orientation`
/// holds the requested direction of each cell vector in its rows.
///
/// The rotation comes from a best fit between directions, while the bounding
/// basis comes from `orientation * natural` directly. The two only agree when
/// the orientation rows are an exact orthonormal image of the natural
/// directions; both are needed as they are.
pub fn orient(
    natural: &Matrix3<f64>,
    orientation: &Matrix3<f64>,
    duplicates: [u32; 3],
) -> Result<OrientedBasis, CrystalError> {
    if orientation.iter().any(|v| !v.is_finite()) {
        return Err(CrystalError::InvalidOrientation(
            "matrix contains non-finite entries".to_string(),
        ));
    }
    if normalized_volume(&orientation.transpose()) < DEGENERACY_TOLERANCE {
        return Err(CrystalError::InvalidOrientation(
            "rows are not three independent directions".to_string(),
        ));
    }

    // 1. unit vectors of the natural basis
    let natural_magnitudes = column_magnitudes(natural);
    let mut natural_hat = *natural;
    for (j, mut col) in natural_hat.column_iter_mut().enumerate() {
        col /= natural_magnitudes[j];
    }

    // 2. best-fit rotation from the requested directions onto the natural ones
    let rotation = align_vectors(&natural_hat, orientation)?;

    // 3. orthogonal bounding representation of the directly oriented basis
    let oriented = (orientation * natural).transpose();
    let mut basis = oriented.qr().r().abs();
    for (j, mut col) in basis.column_iter_mut().enumerate() {
        col *= f64::from(duplicates[j]);
    }

    if basis.iter().any(|v| !v.is_finite()) {
        return Err(CrystalError::InvalidOrientation(
            "reorthogonalized basis is not finite".to_string(),
        ));
    }

    let magnitudes = column_magnitudes(&basis);
    log::debug!(
        "Oriented basis magnitudes: [{:.6}, {:.6}, {:.6}]",
        magnitudes.x,
        magnitudes.y,
        magnitudes.z
    );

    Ok(OrientedBasis {
        rotation,
        basis,
        magnitudes,
    })
}
