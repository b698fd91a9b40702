//! Tick-driven editor session: cursor, painter, and grid behind one step function.
#![forbid(unsafe_code)]

pub mod cursor;
pub mod input;

pub use cursor::{Cursor, CursorChange, CursorConfig};
pub use input::{ButtonLatch, CursorIntent, InputLatch, RawButtons, TickInput};

use strata_edit::{
    ColumnRect, CommitTrigger, EditEngine, EditOp, EditOutcome, Highlight, Painter, PainterEvent,
    PainterInput,
};
use strata_grid::VoxelGrid;
use strata_view::{LayerFrame, VisibleCell, visible_cell_for};

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    CursorMoved { from: (i32, i32), to: (i32, i32) },
    LayerChanged { from: i32, to: i32 },
    Painter(PainterEvent),
}

#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<SessionEvent>,
}

impl TickReport {
    pub fn cells_changed(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                SessionEvent::Painter(PainterEvent::CellEdited { outcome, .. }) => {
                    outcome.changed() as usize
                }
                SessionEvent::Painter(PainterEvent::SelectionCommitted { report, .. }) => {
                    report.changed
                }
                _ => 0,
            })
            .sum()
    }
}

pub struct Session {
    grid: VoxelGrid,
    cursor: Cursor,
    painter: Painter,
    engine: EditEngine,
    tick: u64,
}

impl Session {
    pub fn new(grid: VoxelGrid, cursor_cfg: &CursorConfig, engine: EditEngine, trigger: CommitTrigger) -> Self {
        let mut cursor = Cursor::new(cursor_cfg);
        cursor.center_on(&grid);
        Self {
            grid,
            cursor,
            painter: Painter::new(trigger),
            engine,
            tick: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Direct grid access for setup between ticks.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    #[inline]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Places the cursor at `(x, y)`, clamped into the grid.
    pub fn warp_cursor(&mut self, x: i32, y: i32) {
        self.cursor.warp(&self.grid, x, y);
    }

    #[inline]
    pub fn painter(&self) -> &Painter {
        &self.painter
    }

    #[inline]
    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    #[inline]
    pub fn engine_mut(&mut self) -> &mut EditEngine {
        &mut self.engine
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn is_selecting(&self) -> bool {
        self.painter.is_selecting()
    }

    pub fn selection_rect(&self) -> Option<ColumnRect> {
        self.painter.selection().and_then(|s| s.rect())
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.painter.highlight(self.cursor.camera_z())
    }

    pub fn visible_cell(&self, x: i32, y: i32) -> Option<VisibleCell> {
        visible_cell_for(&self.grid, x, y, self.cursor.camera_z())
    }

    pub fn frame(&self) -> LayerFrame {
        LayerFrame::scan(&self.grid, self.cursor.camera_z())
    }

    /// Runs one tick: cursor first, then the painter against the updated cursor.
    pub fn step(&mut self, input: &TickInput) -> TickReport {
        let tick = self.tick;
        let mut events = Vec::new();

        let change = self.cursor.update(&self.grid, input.dt_ms, &input.cursor);
        if let Some((from, to)) = change.layer {
            events.push(SessionEvent::LayerChanged { from, to });
        }
        if let Some((from, to)) = change.moved {
            events.push(SessionEvent::CursorMoved { from, to });
        }

        let painter_input = PainterInput {
            cursor: self.cursor.position(),
            camera_z: self.cursor.camera_z(),
            paint: input.paint,
            delete: input.delete,
            selector: input.selector,
        };
        events.extend(
            self.painter
                .step(&mut self.grid, &mut self.engine, &painter_input)
                .into_iter()
                .map(SessionEvent::Painter),
        );

        for ev in &events {
            log_event(tick, ev);
        }
        self.tick = self.tick.wrapping_add(1);
        TickReport { tick, events }
    }
}

fn op_name(op: EditOp) -> &'static str {
    match op {
        EditOp::Paint => "paint",
        EditOp::Delete => "delete",
    }
}

fn log_event(tick: u64, ev: &SessionEvent) {
    match ev {
        SessionEvent::CursorMoved { from, to } => {
            log::trace!(target: "events", "[tick {}] CursorMoved {:?} -> {:?}", tick, from, to);
        }
        SessionEvent::LayerChanged { from, to } => {
            log::info!(target: "events", "[tick {}] LayerChanged camera_z {} -> {}", tick, from, to);
        }
        SessionEvent::Painter(PainterEvent::SelectionStarted { anchor }) => {
            log::info!(target: "events", "[tick {}] SelectionStarted anchor={:?}", tick, anchor);
        }
        SessionEvent::Painter(PainterEvent::SelectionCancelled) => {
            log::info!(target: "events", "[tick {}] SelectionCancelled", tick);
        }
        SessionEvent::Painter(PainterEvent::SelectionCommitted {
            op,
            rect,
            layer,
            report,
        }) => {
            log::info!(
                target: "events",
                "[tick {}] SelectionCommitted {} rect={:?} layer={:?} columns={} changed={}",
                tick,
                op_name(*op),
                rect,
                layer,
                report.columns,
                report.changed
            );
        }
        SessionEvent::Painter(PainterEvent::CellEdited { op, outcome }) => match outcome {
            EditOutcome::Changed(p) => {
                log::debug!(
                    target: "events",
                    "[tick {}] CellEdited {} ({},{},{})",
                    tick,
                    op_name(*op),
                    p.x,
                    p.y,
                    p.z
                );
            }
            EditOutcome::Unchanged => {
                log::trace!(target: "events", "[tick {}] CellEdited {} no-op", tick, op_name(*op));
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_edit::ButtonPair;
    use strata_grid::Voxel;

    fn make_session() -> Session {
        Session::new(
            VoxelGrid::new(10, 10, 7, -3),
            &CursorConfig::default(),
            EditEngine::new(),
            CommitTrigger::Held,
        )
    }

    #[test]
    fn new_session_centers_cursor() {
        let s = make_session();
        assert_eq!(s.cursor().position(), (5, 5));
        assert_eq!(s.cursor().camera_z(), 1);
        assert!(!s.is_selecting());
    }

    #[test]
    fn paint_targets_floor_under_camera() {
        let mut s = make_session();
        let r = s.step(&TickInput {
            dt_ms: 16.0,
            paint: ButtonPair::new(false, true),
            ..TickInput::default()
        });
        assert_eq!(r.cells_changed(), 1);
        assert_eq!(s.grid().get(5, 5, 0), Voxel::SOLID_FLOOR);
        let vis = s.visible_cell(5, 5).expect("painted cell is visible");
        assert_eq!(vis.z, 0);
    }

    #[test]
    fn cursor_moves_before_painter_runs() {
        let mut s = make_session();
        let r = s.step(&TickInput {
            dt_ms: 16.0,
            cursor: CursorIntent {
                right: true,
                ..CursorIntent::default()
            },
            paint: ButtonPair::new(false, true),
            ..TickInput::default()
        });
        assert_eq!(r.events[0], SessionEvent::CursorMoved { from: (5, 5), to: (6, 5) });
        assert!(!s.grid().get(6, 5, 0).is_void());
        assert!(s.grid().get(5, 5, 0).is_void());
    }

    #[test]
    fn tick_counter_advances() {
        let mut s = make_session();
        assert_eq!(s.step(&TickInput::default()).tick, 0);
        assert_eq!(s.step(&TickInput::default()).tick, 1);
        assert_eq!(s.tick(), 2);
    }
}
