use proptest::prelude::*;
use strata_grid::{Voxel, VoxelGrid};
use strata_view::{VisibleRole, visible_cell_for};

fn arb_column() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..3, 1..=10)
}

fn column_grid(column: &[u8], min_z: i32) -> VoxelGrid {
    let mut g = VoxelGrid::new(1, 1, column.len(), min_z);
    for (i, k) in column.iter().enumerate() {
        let v = match k {
            0 => Voxel::VOID,
            1 => Voxel::solid(),
            _ => Voxel::fluid(0.5),
        };
        g.set(0, 0, min_z + i as i32, v);
    }
    g
}

proptest! {
    // The visible cell is never above the camera, never void, and its intensity stays in [0, 1]
    #[test]
    fn visible_cell_is_occupied_and_not_above_camera(
        column in arb_column(), min_z in -3i32..=3, camera_z in -6i32..=12,
    ) {
        let g = column_grid(&column, min_z);
        if let Some(vis) = visible_cell_for(&g, 0, 0, camera_z) {
            prop_assert!(vis.z <= camera_z);
            prop_assert!(!vis.voxel.is_void());
            prop_assert_eq!(vis.voxel, g.get(0, 0, vis.z));
            prop_assert!((0.0..=1.0).contains(&vis.intensity));
        }
    }

    // A column is empty exactly when nothing at or below the camera layer is occupied
    #[test]
    fn empty_iff_nothing_at_or_below_camera(
        column in arb_column(), min_z in -3i32..=3, camera_z in -6i32..=12,
    ) {
        let g = column_grid(&column, min_z);
        let any_occupied = g.layers().filter(|&z| z <= camera_z).any(|z| !g.get(0, 0, z).is_void());
        prop_assert_eq!(visible_cell_for(&g, 0, 0, camera_z).is_some(), any_occupied);
    }

    // Priority: floor layer, then camera layer, then the highest occupied layer below the floor
    #[test]
    fn band_priority_holds(
        column in arb_column(), min_z in -3i32..=3, camera_z in -6i32..=12,
    ) {
        let g = column_grid(&column, min_z);
        let vis = visible_cell_for(&g, 0, 0, camera_z);
        let floor = g.get(0, 0, camera_z - 1);
        let cam = g.get(0, 0, camera_z);
        if !floor.is_void() {
            prop_assert_eq!(vis.map(|v| (v.z, v.role)), Some((camera_z - 1, VisibleRole::Floor)));
        } else if !cam.is_void() {
            prop_assert_eq!(vis.map(|v| v.z), Some(camera_z));
            prop_assert!(matches!(vis.map(|v| v.role), Some(VisibleRole::Wall | VisibleRole::Fluid)));
        } else {
            let expect = g.layers().rev().filter(|&z| z < camera_z - 1).find(|&z| !g.get(0, 0, z).is_void());
            prop_assert_eq!(vis.map(|v| v.z), expect);
            if let Some(v) = vis {
                prop_assert_eq!(v.role, VisibleRole::Below);
            }
        }
    }

    // Shade drops as the camera rises away from a single occupied cell, until it floors at zero
    #[test]
    fn shade_is_monotonic_in_distance(depth in 3usize..=10, min_z in -3i32..=3) {
        let mut g = VoxelGrid::new(1, 1, depth, min_z);
        g.set(0, 0, min_z, Voxel::solid());
        let mut last = f32::INFINITY;
        for camera_z in (min_z + 2)..(min_z + depth as i32) {
            let vis = visible_cell_for(&g, 0, 0, camera_z).expect("occupied bottom layer is visible");
            prop_assert_eq!(vis.role, VisibleRole::Below);
            prop_assert!(vis.intensity < last || (vis.intensity == 0.0 && last == 0.0));
            last = vis.intensity;
        }
    }
}
