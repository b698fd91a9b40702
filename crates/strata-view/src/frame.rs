use strata_grid::VoxelGrid;

use crate::scan::{VisibleCell, VisibleRole, visible_cell_for};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub floor: usize,
    pub wall: usize,
    pub fluid: usize,
    pub below: usize,
    pub empty: usize,
}

/// One resolved visible cell (or nothing) per column, row-major.
#[derive(Clone, Debug)]
pub struct LayerFrame {
    pub width: usize,
    pub height: usize,
    pub camera_z: i32,
    cells: Vec<Option<VisibleCell>>,
}

impl LayerFrame {
    pub fn scan(grid: &VoxelGrid, camera_z: i32) -> Self {
        let mut cells = Vec::with_capacity(grid.width() * grid.height());
        for (x, y) in grid.columns() {
            cells.push(visible_cell_for(grid, x, y, camera_z));
        }
        let frame = Self {
            width: grid.width(),
            height: grid.height(),
            camera_z,
            cells,
        };
        log::trace!(
            "scanned {}x{} frame at camera_z={} ({:?})",
            frame.width,
            frame.height,
            camera_z,
            frame.stats()
        );
        frame
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&VisibleCell> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.cells[y as usize * self.width + x as usize].as_ref()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<VisibleCell>]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn stats(&self) -> FrameStats {
        let mut s = FrameStats::default();
        for c in &self.cells {
            match c.map(|c| c.role) {
                Some(VisibleRole::Floor) => s.floor += 1,
                Some(VisibleRole::Wall) => s.wall += 1,
                Some(VisibleRole::Fluid) => s.fluid += 1,
                Some(VisibleRole::Below) => s.below += 1,
                None => s.empty += 1,
            }
        }
        s
    }
}
