use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use strata_edit::PainterEvent;
use strata_grid::Voxel;
use strata_session::{CursorIntent, InputLatch, RawButtons, Session, SessionEvent, TickInput, TickReport};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDir {
    Up,
    Down,
}

/// Grid or cursor preparation applied once before replay.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SetupOp {
    Fill { z: i32, voxel: Voxel },
    Set { x: i32, y: i32, z: i32, voxel: Voxel },
    Warp { x: i32, y: i32 },
    Camera { z: i32 },
}

/// Held inputs for one or more consecutive ticks.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TickStep {
    #[serde(default = "default_dt_ms")]
    pub dt_ms: f64,
    #[serde(default, rename = "move")]
    pub moves: Vec<MoveDir>,
    #[serde(default)]
    pub layer: Option<LayerDir>,
    #[serde(default)]
    pub paint: bool,
    #[serde(default)]
    pub delete: bool,
    #[serde(default)]
    pub select: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}
fn default_dt_ms() -> f64 {
    16.0
}
fn default_repeat() -> u32 {
    1
}

impl TickStep {
    pub fn intent(&self) -> CursorIntent {
        let mut i = CursorIntent::default();
        for m in &self.moves {
            match m {
                MoveDir::Left => i.left = true,
                MoveDir::Right => i.right = true,
                MoveDir::Up => i.up = true,
                MoveDir::Down => i.down = true,
            }
        }
        match self.layer {
            Some(LayerDir::Up) => i.layer_up = true,
            Some(LayerDir::Down) => i.layer_down = true,
            None => {}
        }
        i
    }

    pub fn buttons(&self) -> RawButtons {
        RawButtons {
            paint: self.paint,
            delete: self.delete,
            selector: self.select,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub setup: Vec<SetupOp>,
    #[serde(default)]
    pub tick: Vec<TickStep>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub cells_changed: usize,
    pub commits: usize,
    pub cancels: usize,
}

impl Script {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let script: Script = toml::from_str(s)?;
        for (i, step) in script.tick.iter().enumerate() {
            if !step.dt_ms.is_finite() || step.dt_ms < 0.0 {
                return Err(format!("tick {}: dt_ms must be a non-negative number, got {}", i, step.dt_ms).into());
            }
        }
        Ok(script)
    }

    pub fn total_ticks(&self) -> u64 {
        self.tick.iter().map(|t| t.repeat as u64).sum()
    }

    pub fn apply_setup(&self, session: &mut Session) {
        for op in &self.setup {
            match *op {
                SetupOp::Fill { z, voxel } => session.grid_mut().fill_layer(z, voxel),
                SetupOp::Set { x, y, z, voxel } => session.grid_mut().set(x, y, z, voxel),
                SetupOp::Warp { x, y } => session.warp_cursor(x, y),
                SetupOp::Camera { z } => session.cursor_mut().set_camera_z(z),
            }
            log::debug!("setup {:?}", op);
        }
    }

    /// Replays every tick against `session`, calling `on_tick` after each one.
    pub fn run<F>(&self, session: &mut Session, mut on_tick: F) -> RunSummary
    where
        F: FnMut(&Session, &TickReport),
    {
        let mut latch = InputLatch::default();
        let mut summary = RunSummary::default();
        for step in &self.tick {
            let intent = step.intent();
            let raw = step.buttons();
            for _ in 0..step.repeat {
                let (paint, delete, selector) = latch.sample(raw);
                let report = session.step(&TickInput {
                    dt_ms: step.dt_ms,
                    cursor: intent,
                    paint,
                    delete,
                    selector,
                });
                summary.ticks += 1;
                summary.cells_changed += report.cells_changed();
                for ev in &report.events {
                    match ev {
                        SessionEvent::Painter(PainterEvent::SelectionCommitted { .. }) => summary.commits += 1,
                        SessionEvent::Painter(PainterEvent::SelectionCancelled) => summary.cancels += 1,
                        _ => {}
                    }
                }
                on_tick(session, &report);
            }
        }
        summary
    }
}

pub fn load_from_path(path: &Path) -> Result<Script, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    Script::from_toml_str(&s).map_err(|e| format!("{}: {}", path.display(), e).into())
}
