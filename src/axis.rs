//! Resolving world-space directions to local cube faces.
//!
//! The cube is drawn under a global rotation, so "the right face" on screen is not a
//! fixed local face. [`AxisMapping::resolve`] answers which local face a world
//! direction points at for a given rotation: each column of the rotation matrix is a
//! local axis expressed in world space, and the column best aligned with the world
//! direction wins.
//!
//! # Example
//!
//! ```
//! use cubeturn::{Axis, AxisMapping, Mat4, Sign, Vec3};
//!
//! // With no rotation, world +X is local +X.
//! let mapping = AxisMapping::resolve(Vec3::X, &Mat4::IDENTITY);
//! assert_eq!(mapping, AxisMapping::new(Axis::X, Sign::Positive));
//! assert_eq!(mapping.to_string(), "X+");
//! ```

use std::fmt;

use glam::{Mat4, Vec3};

/// One of the three local cube axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis: 0 for X, 1 for Y, 2 for Z.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis for an index in `0..3`.
    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// The two axes perpendicular to this one.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Direction along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// `+1.0` or `-1.0`.
    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    /// Sign of a value; zero counts as negative.
    pub fn of(value: f32) -> Sign {
        if value > 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    /// Column in the face-lock grid: 0 for positive, 1 for negative.
    pub(crate) fn slot(self) -> usize {
        match self {
            Sign::Positive => 0,
            Sign::Negative => 1,
        }
    }
}

/// A resolved local face: the axis it sits on and which end of that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisMapping {
    pub axis: Axis,
    pub sign: Sign,
}

impl AxisMapping {
    pub fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Find the local face most aligned with `world_dir` under `rotation`.
    ///
    /// Compares the dot product of `world_dir` with each of the first three columns of
    /// `rotation` and picks the largest absolute value. Strict ties go to the lowest
    /// axis index. A zero `world_dir` degenerates to `X-`; callers only pass the six
    /// canonical unit directions.
    pub fn resolve(world_dir: Vec3, rotation: &Mat4) -> AxisMapping {
        let mut best = AxisMapping::new(Axis::X, Sign::Positive);
        let mut max_abs_dot = -1.0_f32;

        for axis in Axis::ALL {
            let local_in_world = rotation.col(axis.index()).truncate();
            let d = local_in_world.dot(world_dir);
            if d.abs() > max_abs_dot {
                max_abs_dot = d.abs();
                best = AxisMapping::new(axis, Sign::of(d));
            }
        }

        best
    }
}

impl fmt::Display for AxisMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Positive => "+",
            Sign::Negative => "-",
        };
        write!(f, "{}{}", self.axis.name(), sign)
    }
}

/// The six face-turn keys and the world direction each one stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnKey {
    /// Toward the camera (+Z).
    Front,
    Back,
    Right,
    Left,
    Up,
    Down,
}

impl TurnKey {
    pub const ALL: [TurnKey; 6] = [
        TurnKey::Front,
        TurnKey::Back,
        TurnKey::Right,
        TurnKey::Left,
        TurnKey::Up,
        TurnKey::Down,
    ];

    /// Canonical world-space direction for this key.
    pub fn world_direction(self) -> Vec3 {
        match self {
            TurnKey::Front => Vec3::Z,
            TurnKey::Back => Vec3::NEG_Z,
            TurnKey::Right => Vec3::X,
            TurnKey::Left => Vec3::NEG_X,
            TurnKey::Up => Vec3::Y,
            TurnKey::Down => Vec3::NEG_Y,
        }
    }

    /// Single-letter label (F, B, R, L, U, D).
    pub fn letter(self) -> char {
        match self {
            TurnKey::Front => 'F',
            TurnKey::Back => 'B',
            TurnKey::Right => 'R',
            TurnKey::Left => 'L',
            TurnKey::Up => 'U',
            TurnKey::Down => 'D',
        }
    }
}
