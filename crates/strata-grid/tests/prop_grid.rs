use proptest::prelude::*;
use strata_grid::{Voxel, VoxelGrid, VoxelKind};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=6
}

fn any_i32_coord() -> impl Strategy<Value = i32> {
    prop_oneof![
        -12i32..=12,
        Just(i32::MIN),
        Just(i32::MAX),
    ]
}

fn arb_kind() -> impl Strategy<Value = VoxelKind> {
    prop_oneof![
        Just(VoxelKind::Void),
        Just(VoxelKind::Solid),
        Just(VoxelKind::Fluid),
    ]
}

fn arb_voxel() -> impl Strategy<Value = Voxel> {
    (arb_kind(), any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..=1.0, 0.0f32..=4.0).prop_map(
        |(kind, is_floor, is_wall, is_ceiling, fluid_opacity, fluid_density_modifier)| Voxel {
            kind,
            is_floor,
            is_wall,
            is_ceiling,
            fluid_opacity,
            fluid_density_modifier,
        },
    )
}

fn seeded_grid(w: usize, h: usize, d: usize, min_z: i32) -> VoxelGrid {
    let mut g = VoxelGrid::new(w, h, d, min_z);
    let mut i = 0u32;
    for z in g.layers().collect::<Vec<_>>() {
        for (x, y) in g.columns().collect::<Vec<_>>() {
            i = i.wrapping_mul(1103515245).wrapping_add(12345);
            let v = match i % 3 {
                0 => Voxel::VOID,
                1 => Voxel::solid(),
                _ => Voxel::fluid((i % 10) as f32 / 10.0),
            };
            g.set(x, y, z, v);
        }
    }
    g
}

proptest! {
    // Writing a valid coordinate and reading it back yields the same voxel, flags included
    #[test]
    fn set_then_get_round_trips(
        w in dim(), h in dim(), d in dim(), min_z in -4i32..=4,
        fx in 0.0f64..1.0, fy in 0.0f64..1.0, fz in 0.0f64..1.0,
        v in arb_voxel(),
    ) {
        let mut g = VoxelGrid::new(w, h, d, min_z);
        let x = (fx * w as f64) as i32;
        let y = (fy * h as f64) as i32;
        let z = min_z + (fz * d as f64) as i32;
        prop_assert!(g.is_valid(x, y, z));
        g.set(x, y, z, v);
        prop_assert_eq!(g.get(x, y, z), v);
    }

    // Invalid coordinates read as Void and writes there leave the grid untouched
    #[test]
    fn invalid_coordinates_are_inert(
        w in dim(), h in dim(), d in dim(), min_z in -4i32..=4,
        x in any_i32_coord(), y in any_i32_coord(), z in any_i32_coord(),
    ) {
        let mut g = seeded_grid(w, h, d, min_z);
        prop_assume!(!g.is_valid(x, y, z));
        let before = g.checksum();
        prop_assert!(g.get(x, y, z).is_void());
        g.set(x, y, z, Voxel::solid());
        prop_assert!(g.get(x, y, z).is_void());
        prop_assert_eq!(g.checksum(), before);
    }

    // Every neighbor is valid, adjacent on exactly one axis, and unique
    #[test]
    fn neighbors_are_valid_and_adjacent(
        w in dim(), h in dim(), d in dim(), min_z in -4i32..=4,
        x in any_i32_coord(), y in any_i32_coord(), z in any_i32_coord(),
    ) {
        let g = VoxelGrid::new(w, h, d, min_z);
        let n: Vec<_> = g.neighbors6(x, y, z).collect();
        prop_assert!(n.len() <= 6);
        for p in &n {
            prop_assert!(g.is_valid(p.x, p.y, p.z));
            let dist = (i64::from(p.x) - i64::from(x)).abs()
                + (i64::from(p.y) - i64::from(y)).abs()
                + (i64::from(p.z) - i64::from(z)).abs();
            prop_assert_eq!(dist, 1);
        }
        let mut dedup = n.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), n.len());
    }

    // Stats account for every cell exactly once
    #[test]
    fn stats_partition_cells(w in dim(), h in dim(), d in dim(), min_z in -4i32..=4) {
        let g = seeded_grid(w, h, d, min_z);
        let s = g.stats();
        prop_assert_eq!(s.cells, w * h * d);
        prop_assert_eq!(s.void + s.solid + s.fluid, s.cells);
    }
}
