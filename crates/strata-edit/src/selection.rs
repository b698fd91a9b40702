//! Toggle-driven rectangular selection and the per-tick painter state machine.

use hashbrown::HashSet;
use strata_grid::VoxelGrid;

use crate::{BatchReport, EditEngine, EditOp, EditOutcome, active_layer};

/// Raw button level for this tick and the previous one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonPair {
    pub prev: bool,
    pub now: bool,
}

impl ButtonPair {
    #[inline]
    pub const fn new(prev: bool, now: bool) -> Self {
        Self { prev, now }
    }

    /// Pressed this tick, released last tick.
    #[inline]
    pub fn rising(self) -> bool {
        self.now && !self.prev
    }

    #[inline]
    pub fn held(self) -> bool {
        self.now
    }
}

/// Inclusive, normalized column rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRect {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl ColumnRect {
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x_min: a.0.min(b.0),
            y_min: a.1.min(b.1),
            x_max: a.0.max(b.0),
            y_max: a.1.max(b.1),
        }
    }

    /// Intersects the rectangle with the grid footprint. `None` when they do
    /// not overlap.
    pub fn clamped(self, grid: &VoxelGrid) -> Option<Self> {
        let (w, h) = (grid.width() as i64, grid.height() as i64);
        if self.x_max < 0 || self.y_max < 0 || i64::from(self.x_min) >= w || i64::from(self.y_min) >= h {
            return None;
        }
        let (x_min, y_min) = grid.clamp_column(self.x_min, self.y_min)?;
        let (x_max, y_max) = grid.clamp_column(self.x_max, self.y_max)?;
        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    #[inline]
    pub fn width(&self) -> u64 {
        (i64::from(self.x_max) - i64::from(self.x_min) + 1) as u64
    }

    #[inline]
    pub fn height(&self) -> u64 {
        (i64::from(self.y_max) - i64::from(self.y_min) + 1) as u64
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Columns row by row, top-left first.
    pub fn columns(self) -> impl Iterator<Item = (i32, i32)> {
        (self.y_min..=self.y_max).flat_map(move |y| (self.x_min..=self.x_max).map(move |x| (x, y)))
    }
}

/// A pending selection: anchor, live end, and the layer a commit will target.
#[derive(Clone, Debug)]
pub struct Selection {
    pub anchor: (i32, i32),
    pub end: (i32, i32),
    pub layer: Option<i32>,
    rect: Option<ColumnRect>,
    columns: HashSet<(i32, i32)>,
}

impl Selection {
    fn start(cursor: (i32, i32)) -> Self {
        Self {
            anchor: cursor,
            end: cursor,
            layer: None,
            rect: None,
            columns: HashSet::new(),
        }
    }

    /// Rebuilds the rectangle and column set from scratch for the current end.
    fn refresh(&mut self, grid: &VoxelGrid, end: (i32, i32), camera_z: i32) {
        self.end = end;
        self.layer = active_layer(camera_z);
        self.rect = ColumnRect::from_corners(self.anchor, self.end).clamped(grid);
        self.columns.clear();
        if let Some(rect) = self.rect {
            self.columns.extend(rect.columns());
        }
    }

    #[inline]
    pub fn rect(&self) -> Option<ColumnRect> {
        self.rect
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.columns.contains(&(x, y))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// How a pending selection should be drawn for the current camera.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Highlight {
    /// The pinned layer is the floor layer under the camera.
    Active,
    /// The camera changed after the painter last ran, so the next tick will
    /// re-pin the layer. Only seen between ticks.
    Stale,
}

/// Whether paint/delete commit while held or only on the press edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CommitTrigger {
    #[default]
    Held,
    Rising,
}

impl CommitTrigger {
    #[inline]
    fn fires(self, b: ButtonPair) -> bool {
        match self {
            CommitTrigger::Held => b.held(),
            CommitTrigger::Rising => b.rising(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PainterInput {
    /// Cursor column, already clamped to the grid by the caller.
    pub cursor: (i32, i32),
    pub camera_z: i32,
    pub paint: ButtonPair,
    pub delete: ButtonPair,
    pub selector: ButtonPair,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PainterEvent {
    SelectionStarted {
        anchor: (i32, i32),
    },
    SelectionCancelled,
    SelectionCommitted {
        op: EditOp,
        rect: Option<ColumnRect>,
        layer: Option<i32>,
        report: BatchReport,
    },
    CellEdited {
        op: EditOp,
        outcome: EditOutcome,
    },
}

/// Idle/Selecting state machine driving the edit engine once per tick.
#[derive(Clone, Debug, Default)]
pub struct Painter {
    selection: Option<Selection>,
    trigger: CommitTrigger,
}

impl Painter {
    pub fn new(trigger: CommitTrigger) -> Self {
        Self {
            selection: None,
            trigger,
        }
    }

    #[inline]
    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    #[inline]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[inline]
    pub fn trigger(&self) -> CommitTrigger {
        self.trigger
    }

    pub fn highlight(&self, camera_z: i32) -> Option<Highlight> {
        let sel = self.selection.as_ref()?;
        if sel.layer.is_some() && sel.layer == active_layer(camera_z) {
            Some(Highlight::Active)
        } else {
            Some(Highlight::Stale)
        }
    }

    /// Advances one tick. All grid mutation for the tick happens here.
    pub fn step(
        &mut self,
        grid: &mut VoxelGrid,
        engine: &mut EditEngine,
        input: &PainterInput,
    ) -> Vec<PainterEvent> {
        let mut events = Vec::new();

        if input.selector.rising() {
            if self.selection.take().is_some() {
                events.push(PainterEvent::SelectionCancelled);
            } else {
                self.selection = Some(Selection::start(input.cursor));
                events.push(PainterEvent::SelectionStarted {
                    anchor: input.cursor,
                });
            }
        }

        if let Some(sel) = self.selection.as_mut() {
            sel.refresh(grid, input.cursor, input.camera_z);
        }

        let op = if self.trigger.fires(input.delete) {
            EditOp::Delete
        } else if self.trigger.fires(input.paint) {
            EditOp::Paint
        } else {
            return events;
        };

        match self.selection.take() {
            Some(sel) => {
                let report = match (sel.rect, sel.layer) {
                    (Some(rect), Some(z)) => engine.apply_batch(grid, rect.columns(), op, z),
                    _ => BatchReport::default(),
                };
                events.push(PainterEvent::SelectionCommitted {
                    op,
                    rect: sel.rect,
                    layer: sel.layer,
                    report,
                });
            }
            None => {
                let (x, y) = input.cursor;
                let outcome = match op {
                    EditOp::Delete => engine.delete_visible(grid, x, y, input.camera_z),
                    EditOp::Paint => match active_layer(input.camera_z) {
                        Some(z) => engine.paint(grid, x, y, z),
                        None => EditOutcome::Unchanged,
                    },
                };
                events.push(PainterEvent::CellEdited { op, outcome });
            }
        }
        events
    }
}
