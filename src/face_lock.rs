use crate::axis::{Axis, Sign};

/// Lock flags for the six face normals.
///
/// Locking works across axes: a locked face on one axis blocks turns on the other two
/// axes and never on its own. Holding the X faces still therefore leaves only X
/// turns available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceLocks {
    grid: [[bool; 2]; 3],
}

impl FaceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the lock on face `(axis, sign)` and return its new state.
    pub fn toggle(&mut self, axis: Axis, sign: Sign) -> bool {
        let cell = &mut self.grid[axis.index()][sign.slot()];
        *cell = !*cell;
        *cell
    }

    pub fn is_locked(&self, axis: Axis, sign: Sign) -> bool {
        self.grid[axis.index()][sign.slot()]
    }

    /// True if any face on either of the other two axes is locked.
    pub fn is_blocked(&self, axis: Axis) -> bool {
        axis.others()
            .iter()
            .any(|other| self.grid[other.index()].iter().any(|&locked| locked))
    }

    /// True if no face is locked.
    pub fn is_clear(&self) -> bool {
        self.grid.iter().flatten().all(|&locked| !locked)
    }

    pub fn clear(&mut self) {
        self.grid = [[false; 2]; 3];
    }
}
