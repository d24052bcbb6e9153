//! Time-based face turn animation.
//!
//! A [`RotationAnimation`] owns one in-flight turn: which cubies are orbiting, about
//! which local axis, and how far they have gone. Each frame [`RotationAnimation::advance`]
//! rotates the moving cubies by the angle covered in that frame, never overshooting
//! the target, and reports [`AnimationStep::Finished`] once the target is reached.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::axis::AxisMapping;
use crate::cubies::CubieRegistry;

/// Result of advancing an animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStep {
    /// The turn has not reached its target yet.
    Turning,
    /// The turn reached its target this frame; the animation is spent.
    Finished,
}

/// A face turn in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationAnimation {
    /// Local rotation axis (unit vector).
    pub axis: Vec3,
    /// Face being turned.
    pub mapping: AxisMapping,
    /// Angle covered so far, in radians.
    pub current_angle: f32,
    /// Signed angle to reach, in radians.
    pub target_angle: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
    moving: Vec<usize>,
}

impl RotationAnimation {
    /// Start turning the face `mapping` by `target_angle` radians.
    ///
    /// The moving set is captured from `registry` now and stays fixed for the whole
    /// turn.
    pub fn start(
        mapping: AxisMapping,
        target_angle: f32,
        speed: f32,
        registry: &CubieRegistry,
    ) -> Self {
        Self {
            axis: mapping.axis.unit(),
            mapping,
            current_angle: 0.0,
            target_angle,
            speed,
            moving: registry.select_face(mapping.axis, mapping.sign),
        }
    }

    /// Indices of the cubies orbiting in this turn.
    pub fn moving_indices(&self) -> &[usize] {
        &self.moving
    }

    /// Advance by `dt` seconds, rotating the moving cubies in `registry`.
    ///
    /// Non-positive or non-finite `dt` leaves everything untouched.
    pub fn advance(&mut self, dt: f32, registry: &mut CubieRegistry) -> AnimationStep {
        let remaining = self.target_angle - self.current_angle;
        if remaining == 0.0 {
            return AnimationStep::Finished;
        }
        if !(dt > 0.0) || !dt.is_finite() {
            return AnimationStep::Turning;
        }

        let travel = self.speed * dt;
        let finishing = travel >= remaining.abs();
        let step = travel.min(remaining.abs()).copysign(remaining);

        registry.apply_rotation(&self.moving, Mat4::from_axis_angle(self.axis, step));

        if finishing {
            self.current_angle = self.target_angle;
            if is_quarter_multiple(self.target_angle) {
                registry.settle(&self.moving);
            }
            AnimationStep::Finished
        } else {
            self.current_angle += step;
            AnimationStep::Turning
        }
    }
}

fn is_quarter_multiple(angle: f32) -> bool {
    let quarters = angle / FRAC_PI_2;
    (quarters - quarters.round()).abs() < 1e-4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, Sign};
    use crate::cubies::FACE_SIZE;

    fn run_to_end(animation: &mut RotationAnimation, registry: &mut CubieRegistry) -> usize {
        let mut frames = 0;
        while animation.advance(1.0 / 60.0, registry) == AnimationStep::Turning {
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        frames + 1
    }

    #[test]
    fn captures_one_face() {
        let registry = CubieRegistry::new();
        let mapping = AxisMapping::new(Axis::X, Sign::Positive);
        let animation = RotationAnimation::start(mapping, FRAC_PI_2, 10.0, &registry);
        assert_eq!(animation.moving_indices().len(), FACE_SIZE);
        assert_eq!(animation.axis, Vec3::X);
        assert_eq!(animation.current_angle, 0.0);
    }

    #[test]
    fn never_overshoots_and_snaps_to_target() {
        let mut registry = CubieRegistry::new();
        let mapping = AxisMapping::new(Axis::Z, Sign::Negative);
        let mut animation = RotationAnimation::start(mapping, -FRAC_PI_2, 10.0, &registry);

        let mut last = 0.0_f32;
        while animation.advance(0.05, &mut registry) == AnimationStep::Turning {
            assert!(animation.current_angle.abs() <= FRAC_PI_2);
            assert!(animation.current_angle.abs() > last.abs());
            last = animation.current_angle;
        }
        assert_eq!(animation.current_angle, -FRAC_PI_2);
        assert!(registry.is_at_rest());
    }

    #[test]
    fn quarter_turn_takes_expected_frames() {
        let mut registry = CubieRegistry::new();
        let mapping = AxisMapping::new(Axis::Y, Sign::Positive);
        let mut animation = RotationAnimation::start(mapping, FRAC_PI_2, 10.0, &registry);
        // pi/2 at 10 rad/s is ~0.157 s, i.e. 10 frames at 60 Hz.
        assert_eq!(run_to_end(&mut animation, &mut registry), 10);
    }

    #[test]
    fn zero_dt_makes_no_progress() {
        let mut registry = CubieRegistry::new();
        let before = registry.clone();
        let mapping = AxisMapping::new(Axis::X, Sign::Negative);
        let mut animation = RotationAnimation::start(mapping, FRAC_PI_2, 10.0, &registry);
        assert_eq!(animation.advance(0.0, &mut registry), AnimationStep::Turning);
        assert_eq!(animation.advance(-1.0, &mut registry), AnimationStep::Turning);
        assert_eq!(registry, before);
        assert_eq!(animation.current_angle, 0.0);
    }

    #[test]
    fn four_quarter_turns_restore_the_face() {
        let mut registry = CubieRegistry::new();
        let solved = registry.clone();
        let mapping = AxisMapping::new(Axis::X, Sign::Positive);
        for _ in 0..4 {
            let mut animation = RotationAnimation::start(mapping, FRAC_PI_2, 7.0, &registry);
            run_to_end(&mut animation, &mut registry);
            assert!(registry.is_at_rest());
        }
        for (turned, original) in registry.transforms().iter().zip(solved.transforms()) {
            assert!(turned.abs_diff_eq(*original, 1e-6));
        }
    }
}
