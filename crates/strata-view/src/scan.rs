use strata_grid::{Voxel, VoxelGrid, VoxelKind};

/// Lowest opacity a fluid on the camera layer is drawn with.
pub const FLUID_MIN_OPACITY: f32 = 0.2;
/// Darkening applied per layer below the floor layer.
pub const SHADE_STEP: f32 = 0.2;

/// Which band of the column produced the visible cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VisibleRole {
    /// `camera_z - 1`, drawn unshaded.
    Floor,
    /// Solid cell on `camera_z`, drawn as an opaque wall.
    Wall,
    /// Fluid cell on `camera_z`, drawn with its clamped opacity.
    Fluid,
    /// First occupied cell under the floor layer, shaded by distance.
    Below,
}

impl VisibleRole {
    /// Base tint multiplied into the cell color.
    pub fn tint(self) -> [u8; 3] {
        match self {
            VisibleRole::Floor | VisibleRole::Below => [255, 255, 255],
            VisibleRole::Wall => [139, 69, 19],
            VisibleRole::Fluid => [0, 0, 255],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibleCell {
    pub voxel: Voxel,
    pub z: i32,
    pub role: VisibleRole,
    /// Shade factor for `Floor`/`Wall`/`Below`, opacity for `Fluid`. Always in `[0, 1]`.
    pub intensity: f32,
}

impl VisibleCell {
    /// Final color: material base times role tint times intensity.
    pub fn rgb(&self) -> [u8; 3] {
        let base = match self.voxel.kind {
            VoxelKind::Fluid => [0, 0, 255],
            _ => [0, 128, 0],
        };
        let tint = self.role.tint();
        let mut out = [0u8; 3];
        for i in 0..3 {
            let c = (base[i] as f32 / 255.0) * (tint[i] as f32 / 255.0) * self.intensity;
            out[i] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

#[inline]
fn occupied(grid: &VoxelGrid, x: i32, y: i32, z: i64) -> Option<(Voxel, i32)> {
    let z = i32::try_from(z).ok()?;
    let v = grid.get(x, y, z);
    if v.is_void() { None } else { Some((v, z)) }
}

#[inline]
fn shade_below(camera_z: i64, z: i64) -> f32 {
    let distance = (camera_z - 1 - z) as f32;
    (1.0 - SHADE_STEP * distance).clamp(0.0, 1.0)
}

/// Resolves the single cell drawn for column `(x, y)` at `camera_z`.
///
/// The floor layer (`camera_z - 1`) wins, then the camera layer itself, then
/// the first occupied cell scanning down from `camera_z - 2`. Layers above
/// `camera_z` are never sampled and void cells never end the scan.
pub fn visible_cell_for(grid: &VoxelGrid, x: i32, y: i32, camera_z: i32) -> Option<VisibleCell> {
    if !grid.contains_column(x, y) {
        return None;
    }
    let max_z = grid.max_z()?;
    let cam = i64::from(camera_z);
    let floor_z = cam - 1;

    if let Some((voxel, z)) = occupied(grid, x, y, floor_z) {
        return Some(VisibleCell {
            voxel,
            z,
            role: VisibleRole::Floor,
            intensity: 1.0,
        });
    }

    if let Some((voxel, z)) = occupied(grid, x, y, cam) {
        let (role, intensity) = match voxel.kind {
            VoxelKind::Fluid => (
                VisibleRole::Fluid,
                voxel.fluid_opacity.clamp(FLUID_MIN_OPACITY, 1.0),
            ),
            _ => (VisibleRole::Wall, 1.0),
        };
        return Some(VisibleCell {
            voxel,
            z,
            role,
            intensity,
        });
    }

    let top = (floor_z - 1).min(i64::from(max_z));
    for z in (i64::from(grid.min_z())..=top).rev() {
        if let Some((voxel, z32)) = occupied(grid, x, y, z) {
            return Some(VisibleCell {
                voxel,
                z: z32,
                role: VisibleRole::Below,
                intensity: shade_below(cam, z),
            });
        }
    }
    None
}
