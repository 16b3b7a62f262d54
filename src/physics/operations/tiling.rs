use nalgebra::Vector3;

/// Number of raw unit cells to enumerate along each axis so that the
/// reoriented bounding box is fully covered.
///
/// Reorientation can make the bounding box longer than `duplicates` natural
/// cells, so each count is `ceil(oriented / natural) * duplicates`.
pub fn minimum_tiles(
    natural_magnitudes: &Vector3<f64>,
    oriented_magnitudes: &Vector3<f64>,
    duplicates: [u32; 3],
) -> [usize; 3] {
    let mut tiles = [0usize; 3];
    for axis in 0..3 {
        let ratio = (oriented_magnitudes[axis] / natural_magnitudes[axis]).ceil();
        tiles[axis] = (ratio * f64::from(duplicates[axis])) as usize;
    }
    tiles
}
