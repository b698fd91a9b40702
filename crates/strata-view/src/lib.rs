//! Per-column visibility for a single camera layer.
#![forbid(unsafe_code)]

pub mod frame;
pub mod scan;

pub use frame::{FrameStats, LayerFrame};
pub use scan::{VisibleCell, VisibleRole, visible_cell_for};
