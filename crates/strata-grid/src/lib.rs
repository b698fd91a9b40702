//! Voxel types and the bounded layered grid.
#![forbid(unsafe_code)]

pub mod grid;
pub mod types;

pub use grid::{GridPos, GridStats, VoxelGrid};
pub use types::{Voxel, VoxelKind};
