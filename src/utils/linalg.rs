// src/utils/linalg.rs
//
// Basis matrices in this crate hold the cell vectors as COLUMNS:
// basis = [a | b | c].

use crate::model::LatticeParameters;
use nalgebra::{Matrix3, Vector3};

/// Metric tensor G with G[i][j] = |v_i| |v_j| cos(angle between v_i and v_j).
///
/// # Formula
/// ```text
///     | a*a            a*b*cos(gamma)  a*c*cos(beta)  |
/// G = | a*b*cos(gamma) b*b             b*c*cos(alpha) |
///     | a*c*cos(beta)  b*c*cos(alpha)  c*c            |
/// ```
pub fn metric_tensor(p: &LatticeParameters) -> Matrix3<f64> {
  let ab = p.a * p.b * p.gamma.cos();
  let ac = p.a * p.c * p.beta.cos();
  let bc = p.b * p.c * p.alpha.cos();
  Matrix3::new(
    p.a * p.a, ab, ac, //
    ab, p.b * p.b, bc, //
    ac, bc, p.c * p.c,
  )
}

/// Natural (unrotated) basis vectors from the metric tensor.
///
/// This is the ELEMENTWISE square root of G, not a Cholesky factor. It only
/// equals a true crystallographic basis for orthogonal cells; the behaviour
/// is kept for compatibility with existing structures. A negative entry
/// (any obtuse angle) yields NaN; callers must reject non-finite bases.
pub fn basis_vectors(metric: &Matrix3<f64>) -> Matrix3<f64> {
  metric.map(f64::sqrt)
}

/// Euclidean norm of every column.
pub fn column_magnitudes(m: &Matrix3<f64>) -> Vector3<f64> {
  Vector3::new(m.column(0).norm(), m.column(1).norm(), m.column(2).norm())
}

/// |det(m)| divided by the product of the column norms: 1 for an orthogonal
/// set of vectors, 0 for a degenerate one.
pub fn normalized_volume(m: &Matrix3<f64>) -> f64 {
  let norms = column_magnitudes(m);
  let scale = norms.x * norms.y * norms.z;
  if scale == 0.0 || !scale.is_finite() {
    return 0.0;
  }
  m.determinant().abs() / scale
}

/// Convert fractional coordinates to Cartesian.
///
/// # Formula
/// ```text
/// Cartesian = Basis × Fractional
/// ```
pub fn frac_to_cart(frac: &Vector3<f64>, basis: &Matrix3<f64>) -> Vector3<f64> {
  basis * frac
}

/// Convert Cartesian coordinates to fractional; `None` if the basis is singular.
pub fn cart_to_frac(cart: &Vector3<f64>, basis: &Matrix3<f64>) -> Option<Vector3<f64>> {
  let inv = basis.try_inverse()?;
  Some(inv * cart)
}

/// Row-per-vector array layout used by [`crate::model::Structure`].
pub fn to_lattice_rows(basis: &Matrix3<f64>) -> [[f64; 3]; 3] {
  let mut rows = [[0.0; 3]; 3];
  for (j, row) in rows.iter_mut().enumerate() {
    for (i, v) in row.iter_mut().enumerate() {
      *v = basis[(i, j)];
    }
  }
  rows
}
