pub mod crystal;
pub mod tiling;
