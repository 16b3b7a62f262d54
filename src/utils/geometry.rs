// src/utils/geometry.rs

use crate::utils::linalg;
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Above this many candidate points the scan is split across the rayon pool.
const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// Nearest point under periodic imaging.
///
/// Implementations return the distance to, and index of, the closest entry of
/// `points` to `query`, taking the minimum image along every axis flagged in
/// `pbc` and comparing directly along the others. `None` means `points` is
/// empty (infinitely far away). Ties must resolve to the lowest index.
pub trait NearestImage {
    fn nearest_image_distance(
        &self,
        query: &Vector3<f64>,
        points: &[Vector3<f64>],
        basis: &Matrix3<f64>,
        pbc: [bool; 3],
    ) -> Option<(f64, usize)>;
}

/// Exact minimum-image search.
///
/// The separation is reduced to fractional coordinates in (-0.5, 0.5] along
/// periodic axes and then the neighbouring images (+-1 cell) are checked too,
/// which makes the result exact for skewed cells as well.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimumImage;

impl MinimumImage {
    fn image_distance(
        delta: &Vector3<f64>,
        basis: &Matrix3<f64>,
        inverse: Option<&Matrix3<f64>>,
        pbc: [bool; 3],
    ) -> f64 {
        let inverse = match inverse {
            Some(inv) if pbc.iter().any(|&p| p) => inv,
            _ => return delta.norm(),
        };

        let mut frac = inverse * delta;
        for axis in 0..3 {
            if pbc[axis] {
                frac[axis] -= frac[axis].round();
            }
        }

        let range = |axis: usize| if pbc[axis] { -1..=1 } else { 0..=0 };
        let mut best = f64::INFINITY;
        for i in range(0) {
            for j in range(1) {
                for k in range(2) {
                    let shifted = frac + Vector3::new(i as f64, j as f64, k as f64);
                    let d = linalg::frac_to_cart(&shifted, basis).norm();
                    if d < best {
                        best = d;
                    }
                }
            }
        }
        best
    }
}

impl NearestImage for MinimumImage {
    fn nearest_image_distance(
        &self,
        query: &Vector3<f64>,
        points: &[Vector3<f64>],
        basis: &Matrix3<f64>,
        pbc: [bool; 3],
    ) -> Option<(f64, usize)> {
        let inverse = basis.try_inverse();
        let inverse = inverse.as_ref();
        let distance = |p: &Vector3<f64>| Self::image_distance(&(p - query), basis, inverse, pbc);

        // Lowest distance wins, lowest index breaks ties
        let closer = |a: (f64, usize), b: (f64, usize)| match a.0.total_cmp(&b.0) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal => {
                if a.1 <= b.1 {
                    a
                } else {
                    b
                }
            }
        };

        if points.len() > PARALLEL_SCAN_THRESHOLD {
            points
                .par_iter()
                .enumerate()
                .map(|(i, p)| (distance(p), i))
                .reduce_with(closer)
        } else {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| (distance(p), i))
                .reduce(closer)
        }
    }
}
