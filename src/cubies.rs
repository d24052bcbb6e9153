//! The 27 cubie transforms that make up the puzzle.
//!
//! Each cubie owns a 4×4 affine matrix. Its translation column starts on the integer
//! lattice `{-1, 0, 1}³` and face turns orbit cubies around the cube's center, so
//! the translation also tells which faces a cubie currently belongs to.

use glam::{Mat4, Vec3};

use crate::axis::{Axis, Sign};

/// Number of cubies in a 3×3×3 puzzle.
pub const CUBIE_COUNT: usize = 27;

/// Number of cubies on one face.
pub const FACE_SIZE: usize = 9;

/// Tolerance used when matching a translation component against a lattice value.
pub const LATTICE_EPSILON: f32 = 0.1;

/// Fixed arena of cubie transforms, indexed by initial lattice position.
///
/// Index `i` starts at `(x, y, z)` with `x` varying slowest:
/// `i = (x + 1) * 9 + (y + 1) * 3 + (z + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CubieRegistry {
    transforms: [Mat4; CUBIE_COUNT],
}

impl Default for CubieRegistry {
    fn default() -> Self {
        let mut transforms = [Mat4::IDENTITY; CUBIE_COUNT];
        let mut i = 0;
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    transforms[i] =
                        Mat4::from_translation(Vec3::new(x as f32, y as f32, z as f32));
                    i += 1;
                }
            }
        }
        Self { transforms }
    }
}

impl CubieRegistry {
    /// A solved cube in the canonical layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// All transforms in index order.
    pub fn transforms(&self) -> &[Mat4; CUBIE_COUNT] {
        &self.transforms
    }

    /// Transform of one cubie.
    pub fn get(&self, index: usize) -> Option<&Mat4> {
        self.transforms.get(index)
    }

    /// Current center of a cubie (its translation column).
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.transforms.get(index).map(|m| m.w_axis.truncate())
    }

    /// Indices of the cubies whose translation along `axis` is within
    /// [`LATTICE_EPSILON`] of `sign`.
    pub fn select_face(&self, axis: Axis, sign: Sign) -> Vec<usize> {
        let target = sign.as_f32();
        self.transforms
            .iter()
            .enumerate()
            .filter(|(_, m)| (m.w_axis[axis.index()] - target).abs() < LATTICE_EPSILON)
            .map(|(i, _)| i)
            .collect()
    }

    /// Left-multiply the selected cubies by `rotation`.
    ///
    /// Rotation happens about the cube's center, so the cubies both spin and orbit as
    /// a rigid group. Out-of-range indices are skipped.
    pub fn apply_rotation(&mut self, indices: &[usize], rotation: Mat4) {
        for &i in indices {
            if let Some(m) = self.transforms.get_mut(i) {
                *m = rotation * *m;
            }
        }
    }

    /// Round the selected transforms to the nearest integer entries.
    ///
    /// Only valid after turns by multiples of 90°, where every entry of a cubie
    /// transform is exactly -1, 0 or 1.
    pub fn settle(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(m) = self.transforms.get_mut(i) {
                *m = Mat4::from_cols_array(&m.to_cols_array().map(|v| v.round() + 0.0));
            }
        }
    }

    /// True when every translation component is within [`LATTICE_EPSILON`] of -1, 0 or 1.
    pub fn is_at_rest(&self) -> bool {
        self.transforms.iter().all(|m| {
            m.w_axis
                .truncate()
                .to_array()
                .iter()
                .all(|&c| c.abs() <= 1.0 + LATTICE_EPSILON && (c - c.round()).abs() < LATTICE_EPSILON)
        })
    }
}
