use strata_edit::ButtonPair;

/// Remembers last tick's raw level so callers can hand in plain booleans.
#[derive(Copy, Clone, Debug, Default)]
pub struct ButtonLatch {
    prev: bool,
}

impl ButtonLatch {
    #[inline]
    pub fn sample(&mut self, now: bool) -> ButtonPair {
        let pair = ButtonPair::new(self.prev, now);
        self.prev = now;
        pair
    }
}

/// Raw button levels for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawButtons {
    pub paint: bool,
    pub delete: bool,
    pub selector: bool,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct InputLatch {
    paint: ButtonLatch,
    delete: ButtonLatch,
    selector: ButtonLatch,
}

impl InputLatch {
    pub fn sample(&mut self, raw: RawButtons) -> (ButtonPair, ButtonPair, ButtonPair) {
        (
            self.paint.sample(raw.paint),
            self.delete.sample(raw.delete),
            self.selector.sample(raw.selector),
        )
    }
}

/// Held directional and layer inputs for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorIntent {
    pub right: bool,
    pub left: bool,
    pub down: bool,
    pub up: bool,
    pub layer_up: bool,
    pub layer_down: bool,
}

impl CursorIntent {
    /// Unit step on each axis. Left beats right and up beats down.
    pub fn direction(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.right {
            dx = 1;
        }
        if self.left {
            dx = -1;
        }
        if self.down {
            dy = 1;
        }
        if self.up {
            dy = -1;
        }
        (dx, dy)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct TickInput {
    /// Elapsed real time since the previous tick, in milliseconds.
    pub dt_ms: f64,
    pub cursor: CursorIntent,
    pub paint: ButtonPair,
    pub delete: ButtonPair,
    pub selector: ButtonPair,
}
