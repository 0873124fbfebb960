//! Navigation cursor shared by all trackers

/// Position of the engine's own cursor over a host-owned collection
///
/// `index` is `-1` until the user navigates. Movement wraps in both
/// directions and does nothing over an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: i32,
    total: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Cursor {
    pub fn new(total: usize) -> Self {
        Self { index: -1, total }
    }

    /// Current position, `None` before the first navigation
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    pub fn raw_index(&self) -> i32 {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Forget the position and adopt a new collection size
    pub fn reset(&mut self, total: usize) {
        self.index = -1;
        self.total = total;
    }

    /// Adopt a new collection size, clamping the position into range
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        if total == 0 {
            self.index = -1;
        } else if self.index >= total as i32 {
            self.index = total as i32 - 1;
        }
    }

    /// Advance with wraparound and return the new position
    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.step(-1)
    }

    fn step(&mut self, delta: i32) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let total = self.total as i32;
        self.index = if self.index < 0 {
            if delta > 0 {
                0
            } else {
                total - 1
            }
        } else {
            (self.index + delta).rem_euclid(total)
        };
        self.index()
    }
}
