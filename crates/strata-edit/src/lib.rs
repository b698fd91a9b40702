//! Paint/delete edits against the layered grid, and rectangular batch selection.
#![forbid(unsafe_code)]

pub mod selection;

pub use selection::{
    ButtonPair, ColumnRect, CommitTrigger, Highlight, Painter, PainterEvent, PainterInput,
    Selection,
};

use strata_grid::{GridPos, Voxel, VoxelGrid};

/// Voxel written by `paint`. Swappable at runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Brush {
    pub voxel: Voxel,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            voxel: Voxel::SOLID_FLOOR,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditOp {
    Paint,
    Delete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Changed(GridPos),
    Unchanged,
}

impl EditOutcome {
    #[inline]
    pub fn changed(self) -> bool {
        matches!(self, EditOutcome::Changed(_))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditStats {
    pub paints: u64,
    pub deletes: u64,
    pub unchanged: u64,
    pub batches: u64,
}

/// Result of applying one operation over a set of columns.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub columns: usize,
    pub changed: usize,
}

/// The floor layer edits target: one below the camera.
#[inline]
pub fn active_layer(camera_z: i32) -> Option<i32> {
    camera_z.checked_sub(1)
}

#[derive(Default, Debug, Clone)]
pub struct EditEngine {
    brush: Brush,
    stats: EditStats,
}

impl EditEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brush(brush: Brush) -> Self {
        Self {
            brush,
            stats: EditStats::default(),
        }
    }

    #[inline]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    #[inline]
    pub fn stats(&self) -> EditStats {
        self.stats
    }

    fn record(&mut self, op: EditOp, outcome: EditOutcome) -> EditOutcome {
        match (op, outcome) {
            (_, EditOutcome::Unchanged) => self.stats.unchanged += 1,
            (EditOp::Paint, EditOutcome::Changed(_)) => self.stats.paints += 1,
            (EditOp::Delete, EditOutcome::Changed(_)) => self.stats.deletes += 1,
        }
        outcome
    }

    /// Writes the brush voxel at `(x, y, z)`, replacing whatever is there.
    pub fn paint(&mut self, grid: &mut VoxelGrid, x: i32, y: i32, z: i32) -> EditOutcome {
        let outcome = if grid.is_valid(x, y, z) && grid.get(x, y, z) != self.brush.voxel {
            grid.set(x, y, z, self.brush.voxel);
            EditOutcome::Changed(GridPos::new(x, y, z))
        } else {
            EditOutcome::Unchanged
        };
        self.record(EditOp::Paint, outcome)
    }

    /// Clears `(x, y, z)` only. Never looks at other layers.
    pub fn delete_at(&mut self, grid: &mut VoxelGrid, x: i32, y: i32, z: i32) -> EditOutcome {
        let outcome = clear(grid, x, y, z);
        self.record(EditOp::Delete, outcome)
    }

    /// Clears the topmost thing the user sees in the column: the camera layer
    /// if it is occupied, otherwise the floor layer below it.
    pub fn delete_visible(
        &mut self,
        grid: &mut VoxelGrid,
        x: i32,
        y: i32,
        camera_z: i32,
    ) -> EditOutcome {
        let mut outcome = clear(grid, x, y, camera_z);
        if !outcome.changed() {
            if let Some(floor_z) = active_layer(camera_z) {
                outcome = clear(grid, x, y, floor_z);
            }
        }
        self.record(EditOp::Delete, outcome)
    }

    /// Applies `op` to every column at a single pinned layer.
    pub fn apply_batch<I>(&mut self, grid: &mut VoxelGrid, columns: I, op: EditOp, z: i32) -> BatchReport
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut report = BatchReport::default();
        for (x, y) in columns {
            let outcome = match op {
                EditOp::Paint => self.paint(grid, x, y, z),
                EditOp::Delete => self.delete_at(grid, x, y, z),
            };
            report.columns += 1;
            if outcome.changed() {
                report.changed += 1;
            }
        }
        self.stats.batches += 1;
        report
    }
}

fn clear(grid: &mut VoxelGrid, x: i32, y: i32, z: i32) -> EditOutcome {
    if grid.get(x, y, z).is_void() {
        return EditOutcome::Unchanged;
    }
    grid.set(x, y, z, Voxel::VOID);
    EditOutcome::Changed(GridPos::new(x, y, z))
}
