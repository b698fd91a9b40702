use crate::types::{Voxel, VoxelKind};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub cells: usize,
    pub void: usize,
    pub solid: usize,
    pub fluid: usize,
}

impl GridStats {
    #[inline]
    pub fn occupied(&self) -> usize {
        self.solid + self.fluid
    }
}

/// Dense, fixed-size voxel volume addressed by `(x, y, z)`.
///
/// `x` spans `[0, width)`, `y` spans `[0, height)` and `z` spans
/// `[min_z, min_z + depth)`. Reads outside that box yield [`Voxel::VOID`] and
/// writes outside it are dropped.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    min_z: i32,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    pub fn new(width: usize, height: usize, depth: usize, min_z: i32) -> Self {
        // Keep the top layer addressable as an i32.
        let max_depth = (i64::from(i32::MAX) - i64::from(min_z) + 1) as u64;
        let mut depth = (depth as u64).min(max_depth) as usize;
        // Fewer layers, or none, when the volume would not fit in memory.
        let max_cells = isize::MAX as usize / std::mem::size_of::<Voxel>();
        let area = width.checked_mul(height);
        depth = match area {
            Some(0) => depth,
            Some(area) => depth.min(max_cells / area),
            None => 0,
        };
        let len = area.map_or(0, |a| a * depth);
        Self {
            width,
            height,
            depth,
            min_z,
            voxels: vec![Voxel::VOID; len],
        }
    }

    /// Single-layer grid at `z = 0`: a plain tile map when viewed and edited
    /// from `camera_z = 1`.
    pub fn flat(width: usize, height: usize) -> Self {
        Self::new(width, height, 1, 0)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn min_z(&self) -> i32 {
        self.min_z
    }

    /// Topmost valid layer, or `None` for a grid without layers.
    #[inline]
    pub fn max_z(&self) -> Option<i32> {
        if self.depth == 0 {
            None
        } else {
            Some((i64::from(self.min_z) + self.depth as i64 - 1) as i32)
        }
    }

    /// Valid layer indices, bottom to top.
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = i32> + use<> {
        let min_z = i64::from(self.min_z);
        (0..self.depth as i64).map(move |i| (min_z + i) as i32)
    }

    /// Every `(x, y)` column, row by row.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (w, h) = (
            self.width.min(i32::MAX as usize) as i32,
            self.height.min(i32::MAX as usize) as i32,
        );
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }

    #[inline]
    pub fn contains_column(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn contains_layer(&self, z: i32) -> bool {
        let dz = i64::from(z) - i64::from(self.min_z);
        dz >= 0 && dz < self.depth as i64
    }

    #[inline]
    pub fn is_valid(&self, x: i32, y: i32, z: i32) -> bool {
        self.contains_column(x, y) && self.contains_layer(z)
    }

    /// Clamps a column into the grid footprint. `None` when the footprint is empty.
    pub fn clamp_column(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let max_x = (self.width - 1).min(i32::MAX as usize) as i32;
        let max_y = (self.height - 1).min(i32::MAX as usize) as i32;
        Some((x.clamp(0, max_x), y.clamp(0, max_y)))
    }

    #[inline]
    fn idx(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.is_valid(x, y, z) {
            return None;
        }
        let lz = (i64::from(z) - i64::from(self.min_z)) as usize;
        Some((lz * self.height + y as usize) * self.width + x as usize)
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.idx(x, y, z)
            .map(|i| self.voxels[i])
            .unwrap_or(Voxel::VOID)
    }

    #[inline]
    pub fn get_pos(&self, p: GridPos) -> Voxel {
        self.get(p.x, p.y, p.z)
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) {
        if let Some(i) = self.idx(x, y, z) {
            self.voxels[i] = voxel;
        }
    }

    /// Valid axis-aligned neighbors in +x, -x, +y, -y, +z, -z order.
    pub fn neighbors6(&self, x: i32, y: i32, z: i32) -> impl Iterator<Item = GridPos> + '_ {
        let origin = GridPos::new(x, y, z);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy, dz)| origin.checked_offset(dx, dy, dz))
            .filter(move |p| self.is_valid(p.x, p.y, p.z))
    }

    /// Contiguous storage of one layer, row-major in `(x, y)`.
    pub fn layer(&self, z: i32) -> Option<&[Voxel]> {
        if !self.contains_layer(z) {
            return None;
        }
        let plane = self.width * self.height;
        let lz = (i64::from(z) - i64::from(self.min_z)) as usize;
        Some(&self.voxels[lz * plane..(lz + 1) * plane])
    }

    pub fn fill_layer(&mut self, z: i32, voxel: Voxel) {
        if !self.contains_layer(z) {
            return;
        }
        let plane = self.width * self.height;
        let lz = (i64::from(z) - i64::from(self.min_z)) as usize;
        self.voxels[lz * plane..(lz + 1) * plane].fill(voxel);
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            cells: self.voxels.len(),
            ..GridStats::default()
        };
        for v in &self.voxels {
            match v.kind {
                VoxelKind::Void => stats.void += 1,
                VoxelKind::Solid => stats.solid += 1,
                VoxelKind::Fluid => stats.fluid += 1,
            }
        }
        stats
    }

    /// FNV-1a over every stored voxel. Equal grids hash equal.
    pub fn checksum(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        let mut write = |v: u64| {
            h ^= v;
            h = h.wrapping_mul(0x100000001b3);
        };
        write(self.width as u64);
        write(self.height as u64);
        write(self.depth as u64);
        write(self.min_z as i64 as u64);
        for v in &self.voxels {
            for w in v.hash_words() {
                write(w);
            }
        }
        h
    }
}
