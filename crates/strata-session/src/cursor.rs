use strata_grid::VoxelGrid;

use crate::input::CursorIntent;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorConfig {
    pub camera_min: i32,
    pub camera_max: i32,
    pub camera_initial: i32,
    pub move_repeat_ms: f64,
    pub layer_repeat_ms: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            camera_min: -2,
            camera_max: 4,
            camera_initial: 1,
            move_repeat_ms: 100.0,
            layer_repeat_ms: 400.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorChange {
    pub moved: Option<((i32, i32), (i32, i32))>,
    pub layer: Option<(i32, i32)>,
}

/// Column cursor plus the camera layer, with repeat-delay gating per axis.
#[derive(Clone, Debug)]
pub struct Cursor {
    position: (i32, i32),
    camera_z: i32,
    camera_min: i32,
    camera_max: i32,
    move_repeat_ms: f64,
    layer_repeat_ms: f64,
    move_cooldown: f64,
    layer_cooldown: f64,
}

impl Cursor {
    pub fn new(cfg: &CursorConfig) -> Self {
        let (lo, hi) = if cfg.camera_min <= cfg.camera_max {
            (cfg.camera_min, cfg.camera_max)
        } else {
            (cfg.camera_max, cfg.camera_min)
        };
        Self {
            position: (0, 0),
            camera_z: cfg.camera_initial.clamp(lo, hi),
            camera_min: lo,
            camera_max: hi,
            move_repeat_ms: cfg.move_repeat_ms.max(0.0),
            layer_repeat_ms: cfg.layer_repeat_ms.max(0.0),
            move_cooldown: 0.0,
            layer_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    #[inline]
    pub fn camera_z(&self) -> i32 {
        self.camera_z
    }

    #[inline]
    pub fn camera_range(&self) -> (i32, i32) {
        (self.camera_min, self.camera_max)
    }

    pub fn center_on(&mut self, grid: &VoxelGrid) {
        let cx = (grid.width() / 2).min(i32::MAX as usize) as i32;
        let cy = (grid.height() / 2).min(i32::MAX as usize) as i32;
        self.position = grid.clamp_column(cx, cy).unwrap_or((0, 0));
    }

    /// Places the cursor directly, clamped into the grid.
    pub fn warp(&mut self, grid: &VoxelGrid, x: i32, y: i32) {
        self.position = grid.clamp_column(x, y).unwrap_or((0, 0));
    }

    pub fn set_camera_z(&mut self, z: i32) {
        self.camera_z = z.clamp(self.camera_min, self.camera_max);
    }

    pub fn update(&mut self, grid: &VoxelGrid, dt_ms: f64, intent: &CursorIntent) -> CursorChange {
        let mut change = CursorChange::default();
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.move_cooldown -= dt;
        self.layer_cooldown -= dt;

        if self.layer_cooldown <= 0.0 {
            let target = if intent.layer_up {
                Some(self.camera_z.saturating_add(1))
            } else if intent.layer_down {
                Some(self.camera_z.saturating_sub(1))
            } else {
                None
            };
            if let Some(t) = target {
                let from = self.camera_z;
                self.camera_z = t.clamp(self.camera_min, self.camera_max);
                self.layer_cooldown = self.layer_repeat_ms;
                if self.camera_z != from {
                    change.layer = Some((from, self.camera_z));
                }
            }
        }

        let (dx, dy) = intent.direction();
        if (dx, dy) != (0, 0) && self.move_cooldown <= 0.0 {
            let from = self.position;
            let to = grid
                .clamp_column(from.0.saturating_add(dx), from.1.saturating_add(dy))
                .unwrap_or(from);
            if to != from {
                self.position = to;
                self.move_cooldown = self.move_repeat_ms;
                change.moved = Some((from, to));
            }
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grid() -> VoxelGrid {
        VoxelGrid::new(10, 10, 7, -3)
    }

    fn right() -> CursorIntent {
        CursorIntent {
            right: true,
            ..CursorIntent::default()
        }
    }

    #[test]
    fn held_direction_repeats_after_delay() {
        let g = make_grid();
        let mut c = Cursor::new(&CursorConfig::default());
        assert!(c.update(&g, 16.0, &right()).moved.is_some());
        assert_eq!(c.position(), (1, 0));
        // Six more ticks of 16ms stay inside the 100ms repeat window.
        for _ in 0..6 {
            assert!(c.update(&g, 16.0, &right()).moved.is_none());
        }
        assert_eq!(c.update(&g, 16.0, &right()).moved, Some(((1, 0), (2, 0))));
    }

    #[test]
    fn blocked_move_does_not_start_cooldown() {
        let g = make_grid();
        let mut c = Cursor::new(&CursorConfig::default());
        let left = CursorIntent {
            left: true,
            ..CursorIntent::default()
        };
        assert!(c.update(&g, 1.0, &left).moved.is_none());
        // Immediately able to move the other way.
        assert!(c.update(&g, 1.0, &right()).moved.is_some());
    }

    #[test]
    fn position_clamps_to_grid() {
        let g = make_grid();
        let mut c = Cursor::new(&CursorConfig::default());
        c.warp(&g, 9, 9);
        let down_right = CursorIntent {
            right: true,
            down: true,
            ..CursorIntent::default()
        };
        assert!(c.update(&g, 500.0, &down_right).moved.is_none());
        assert_eq!(c.position(), (9, 9));
    }

    #[test]
    fn camera_layer_clamps_and_rate_limits() {
        let g = make_grid();
        let mut c = Cursor::new(&CursorConfig::default());
        assert_eq!(c.camera_z(), 1);
        let up = CursorIntent {
            layer_up: true,
            ..CursorIntent::default()
        };
        assert_eq!(c.update(&g, 16.0, &up).layer, Some((1, 2)));
        assert_eq!(c.update(&g, 16.0, &up).layer, None);
        for _ in 0..10 {
            c.update(&g, 400.0, &up);
        }
        assert_eq!(c.camera_z(), 4);
        let down = CursorIntent {
            layer_down: true,
            ..CursorIntent::default()
        };
        for _ in 0..20 {
            c.update(&g, 400.0, &down);
        }
        assert_eq!(c.camera_z(), -2);
    }

    #[test]
    fn layer_up_wins_over_layer_down() {
        let g = make_grid();
        let mut c = Cursor::new(&CursorConfig::default());
        let both = CursorIntent {
            layer_up: true,
            layer_down: true,
            ..CursorIntent::default()
        };
        assert_eq!(c.update(&g, 0.0, &both).layer, Some((1, 2)));
    }

    #[test]
    fn center_on_uses_half_extent() {
        let g = make_grid();
        let mut c = Cursor::new(&CursorConfig::default());
        c.center_on(&g);
        assert_eq!(c.position(), (5, 5));
    }

    #[test]
    fn inverted_camera_range_is_normalized() {
        let c = Cursor::new(&CursorConfig {
            camera_min: 4,
            camera_max: -2,
            camera_initial: 9,
            ..CursorConfig::default()
        });
        assert_eq!(c.camera_range(), (-2, 4));
        assert_eq!(c.camera_z(), 4);
    }
}
