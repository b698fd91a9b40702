use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use strata_edit::{Brush, CommitTrigger};
use strata_grid::{Voxel, VoxelGrid, VoxelKind};
use strata_session::CursorConfig;

/// Upper bound on allocated cells so a typo in the config cannot exhaust memory.
const MAX_CELLS: u64 = 64 * 1024 * 1024;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub grid: GridSection,
    #[serde(default)]
    pub camera: CameraSection,
    #[serde(default)]
    pub timing: TimingSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub brush: BrushSection,
    #[serde(default)]
    pub cursor: CursorSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GridSection {
    #[serde(default = "default_grid_extent")]
    pub width: usize,
    #[serde(default = "default_grid_extent")]
    pub height: usize,
    #[serde(default = "default_depth")]
    pub depth: usize,
    #[serde(default = "default_min_z")]
    pub min_z: i32,
}
fn default_grid_extent() -> usize {
    100
}
fn default_depth() -> usize {
    7
}
fn default_min_z() -> i32 {
    -3
}
impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: default_grid_extent(),
            height: default_grid_extent(),
            depth: default_depth(),
            min_z: default_min_z(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CameraSection {
    #[serde(default = "default_camera_min")]
    pub min: i32,
    #[serde(default = "default_camera_max")]
    pub max: i32,
    #[serde(default = "default_camera_initial")]
    pub initial: i32,
}
fn default_camera_min() -> i32 {
    -2
}
fn default_camera_max() -> i32 {
    4
}
fn default_camera_initial() -> i32 {
    1
}
impl Default for CameraSection {
    fn default() -> Self {
        Self {
            min: default_camera_min(),
            max: default_camera_max(),
            initial: default_camera_initial(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TimingSection {
    #[serde(default = "default_move_repeat")]
    pub move_repeat_ms: f64,
    #[serde(default = "default_layer_repeat")]
    pub layer_repeat_ms: f64,
}
fn default_move_repeat() -> f64 {
    100.0
}
fn default_layer_repeat() -> f64 {
    400.0
}
impl Default for TimingSection {
    fn default() -> Self {
        Self {
            move_repeat_ms: default_move_repeat(),
            layer_repeat_ms: default_layer_repeat(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    #[default]
    Held,
    Rising,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InputSection {
    #[serde(default)]
    pub commit: CommitMode,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CursorSection {
    /// Start at the grid center instead of the origin column.
    #[serde(default = "d_true")]
    pub center: bool,
}
impl Default for CursorSection {
    fn default() -> Self {
        Self { center: true }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BrushSection {
    #[serde(default = "default_brush_kind")]
    pub kind: VoxelKind,
    #[serde(default = "d_true")]
    pub is_floor: bool,
    #[serde(default)]
    pub is_wall: bool,
    #[serde(default)]
    pub is_ceiling: bool,
    #[serde(default)]
    pub fluid_opacity: f32,
    #[serde(default = "d_one")]
    pub fluid_density_modifier: f32,
}
fn default_brush_kind() -> VoxelKind {
    VoxelKind::Solid
}
fn d_true() -> bool {
    true
}
fn d_one() -> f32 {
    1.0
}
impl Default for BrushSection {
    fn default() -> Self {
        Self {
            kind: default_brush_kind(),
            is_floor: true,
            is_wall: false,
            is_ceiling: false,
            fluid_opacity: 0.0,
            fluid_density_modifier: 1.0,
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: EditorConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let cells = (self.grid.width as u64)
            .checked_mul(self.grid.height as u64)
            .and_then(|c| c.checked_mul(self.grid.depth as u64));
        match cells {
            Some(c) if c <= MAX_CELLS => {}
            _ => {
                return Err(format!(
                    "grid {}x{}x{} exceeds {} cells",
                    self.grid.width, self.grid.height, self.grid.depth, MAX_CELLS
                )
                .into());
            }
        }
        if self.camera.min > self.camera.max {
            return Err(format!(
                "camera.min ({}) is greater than camera.max ({})",
                self.camera.min, self.camera.max
            )
            .into());
        }
        if self.camera.initial < self.camera.min || self.camera.initial > self.camera.max {
            return Err(format!(
                "camera.initial ({}) outside [{}, {}]",
                self.camera.initial, self.camera.min, self.camera.max
            )
            .into());
        }
        for (name, v) in [
            ("timing.move_repeat_ms", self.timing.move_repeat_ms),
            ("timing.layer_repeat_ms", self.timing.layer_repeat_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, v).into());
            }
        }
        if !(0.0..=1.0).contains(&self.brush.fluid_opacity) {
            return Err(format!(
                "brush.fluid_opacity must be within [0, 1], got {}",
                self.brush.fluid_opacity
            )
            .into());
        }
        Ok(())
    }

    pub fn make_grid(&self) -> VoxelGrid {
        VoxelGrid::new(
            self.grid.width,
            self.grid.height,
            self.grid.depth,
            self.grid.min_z,
        )
    }

    pub fn cursor_config(&self) -> CursorConfig {
        CursorConfig {
            camera_min: self.camera.min,
            camera_max: self.camera.max,
            camera_initial: self.camera.initial,
            move_repeat_ms: self.timing.move_repeat_ms,
            layer_repeat_ms: self.timing.layer_repeat_ms,
        }
    }

    pub fn commit_trigger(&self) -> CommitTrigger {
        match self.input.commit {
            CommitMode::Held => CommitTrigger::Held,
            CommitMode::Rising => CommitTrigger::Rising,
        }
    }

    pub fn brush(&self) -> Brush {
        Brush {
            voxel: Voxel {
                kind: self.brush.kind,
                is_floor: self.brush.is_floor,
                is_wall: self.brush.is_wall,
                is_ceiling: self.brush.is_ceiling,
                fluid_opacity: self.brush.fluid_opacity,
                fluid_density_modifier: self.brush.fluid_density_modifier,
            },
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<EditorConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    EditorConfig::from_toml_str(&s).map_err(|e| format!("{}: {}", path.display(), e).into())
}
