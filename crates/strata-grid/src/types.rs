use serde::Deserialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum VoxelKind {
    #[default]
    Void,
    Solid,
    Fluid,
}

impl VoxelKind {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One addressable cell of the grid.
///
/// The role flags and fluid fields are metadata: the grid stores them verbatim
/// and the visibility scan only reads `fluid_opacity` for fluid cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(default)]
pub struct Voxel {
    pub kind: VoxelKind,
    pub is_floor: bool,
    pub is_wall: bool,
    pub is_ceiling: bool,
    pub fluid_opacity: f32,
    pub fluid_density_modifier: f32,
}

impl Voxel {
    pub const VOID: Voxel = Voxel {
        kind: VoxelKind::Void,
        is_floor: false,
        is_wall: false,
        is_ceiling: false,
        fluid_opacity: 0.0,
        fluid_density_modifier: 0.0,
    };

    /// Template written by the default paint brush.
    pub const SOLID_FLOOR: Voxel = Voxel {
        kind: VoxelKind::Solid,
        is_floor: true,
        is_wall: false,
        is_ceiling: false,
        fluid_opacity: 0.0,
        fluid_density_modifier: 1.0,
    };

    #[inline]
    pub const fn solid() -> Self {
        Voxel {
            kind: VoxelKind::Solid,
            ..Voxel::VOID
        }
    }

    #[inline]
    pub const fn fluid(opacity: f32) -> Self {
        Voxel {
            kind: VoxelKind::Fluid,
            fluid_opacity: opacity,
            fluid_density_modifier: 1.0,
            ..Voxel::VOID
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.kind == VoxelKind::Void
    }

    /// Stable bit pattern used by grid checksums.
    pub(crate) fn hash_words(&self) -> [u64; 3] {
        let flags = (self.is_floor as u64) | ((self.is_wall as u64) << 1) | ((self.is_ceiling as u64) << 2);
        [
            (self.kind.index() as u64) | (flags << 8),
            u64::from(self.fluid_opacity.to_bits()),
            u64::from(self.fluid_density_modifier.to_bits()),
        ]
    }
}
