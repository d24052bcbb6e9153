//! The puzzle controller: one owned object for all interactive puzzle state.
//!
//! [`PuzzleController`] holds the cube orientation, the 27 cubie transforms, the face
//! locks, the camera and at most one in-flight turn. The window layer feeds it input
//! through [`InputSink`] (or the `submit_*` methods directly), calls
//! [`PuzzleController::advance`] once per frame, and reads
//! [`PuzzleController::cubie_transforms`] to draw.
//!
//! # Example
//!
//! ```
//! use cubeturn::{PuzzleConfig, PuzzleController, TurnOutcome, Vec3};
//!
//! let mut puzzle = PuzzleController::new(PuzzleConfig::default());
//! let outcome = puzzle.submit_turn_intent(Vec3::Z, false).unwrap();
//! assert!(matches!(outcome, TurnOutcome::Started { .. }));
//!
//! while puzzle.is_turning() {
//!     puzzle.advance(1.0 / 60.0);
//! }
//! ```

use glam::{Mat4, Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::animation::{AnimationStep, RotationAnimation};
use crate::axis::{AxisMapping, TurnKey};
use crate::camera::Camera;
use crate::config::{LOCK_MODE_ANGLE, PuzzleConfig, decreased_turn_angle, increased_turn_angle};
use crate::cubies::{CUBIE_COUNT, CubieRegistry};
use crate::error::{TurnError, TurnOutcome};
use crate::face_lock::FaceLocks;
use crate::input::InputSink;
use crate::orientation::Orientation;

/// What a key is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyBinding {
    /// Turn the face nearest this world direction.
    Turn(TurnKey),
    /// Double (`true`) or halve (`false`) the base turn angle.
    AdjustAngle(bool),
}

impl KeyBinding {
    /// Default key layout: F/B/R/L/U/D turn, `=`/`-` adjust the angle.
    pub fn for_key(key: KeyCode) -> Option<KeyBinding> {
        let binding = match key {
            KeyCode::KeyF => KeyBinding::Turn(TurnKey::Front),
            KeyCode::KeyB => KeyBinding::Turn(TurnKey::Back),
            KeyCode::KeyR => KeyBinding::Turn(TurnKey::Right),
            KeyCode::KeyL => KeyBinding::Turn(TurnKey::Left),
            KeyCode::KeyU => KeyBinding::Turn(TurnKey::Up),
            KeyCode::KeyD => KeyBinding::Turn(TurnKey::Down),
            KeyCode::Equal | KeyCode::NumpadAdd => KeyBinding::AdjustAngle(true),
            KeyCode::Minus | KeyCode::NumpadSubtract => KeyBinding::AdjustAngle(false),
            _ => return None,
        };
        Some(binding)
    }
}

/// Owns the orientation, cubies, face locks, camera and the current turn.
#[derive(Clone, Debug)]
pub struct PuzzleController {
    orientation: Orientation,
    cubies: CubieRegistry,
    locks: FaceLocks,
    animation: Option<RotationAnimation>,
    camera: Camera,
    config: PuzzleConfig,
}

impl Default for PuzzleController {
    fn default() -> Self {
        Self::new(PuzzleConfig::default())
    }
}

impl PuzzleController {
    /// A solved cube at the default 45°/45° orientation.
    pub fn new(config: PuzzleConfig) -> Self {
        let camera = Camera::new()
            .zoom_sensitivity(config.zoom_sensitivity)
            .distance_limits(config.min_distance, config.max_distance);
        Self {
            orientation: Orientation::default(),
            cubies: CubieRegistry::new(),
            locks: FaceLocks::new(),
            animation: None,
            camera,
            config,
        }
    }

    /// Replace the starting orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Advance the current turn by `dt` seconds.
    ///
    /// Returns the face whose turn completed during this call, if any.
    pub fn advance(&mut self, dt: f32) -> Option<AxisMapping> {
        let animation = self.animation.as_mut()?;
        match animation.advance(dt, &mut self.cubies) {
            AnimationStep::Turning => None,
            AnimationStep::Finished => {
                let mapping = animation.mapping;
                tracing::debug!(face = %mapping, "turn finished");
                self.animation = None;
                Some(mapping)
            }
        }
    }

    /// Try to turn the face nearest `world_dir` (one of the six canonical unit directions).
    ///
    /// `reverse` flips the turn direction. In lock mode (45° base angle) the face lock
    /// is toggled instead of turning.
    pub fn submit_turn_intent(
        &mut self,
        world_dir: Vec3,
        reverse: bool,
    ) -> Result<TurnOutcome, TurnError> {
        if let Some(animation) = &self.animation {
            return Err(TurnError::TurnInProgress {
                axis: animation.mapping.axis,
            });
        }
        if !world_dir.is_finite() || world_dir.length_squared() < f32::EPSILON {
            return Err(TurnError::UnrecognizedIntent);
        }

        let mapping = AxisMapping::resolve(world_dir, &self.orientation.rotation_matrix());

        if self.locks.is_blocked(mapping.axis) {
            return Err(TurnError::TurnBlocked { mapping });
        }

        if self.config.turn_angle == LOCK_MODE_ANGLE {
            let locked = self.locks.toggle(mapping.axis, mapping.sign);
            tracing::debug!(face = %mapping, locked, "face lock toggled");
            return Ok(TurnOutcome::LockToggled { mapping, locked });
        }

        let base = self.config.turn_angle.to_radians();
        let target_angle = mapping.sign.as_f32() * if reverse { -base } else { base };
        let animation =
            RotationAnimation::start(mapping, target_angle, self.config.turn_speed, &self.cubies);
        tracing::debug!(
            face = %mapping,
            target = target_angle.to_degrees(),
            cubies = animation.moving_indices().len(),
            "turn started"
        );
        self.animation = Some(animation);

        Ok(TurnOutcome::Started {
            mapping,
            target_angle,
        })
    }

    /// Double or halve the base turn angle.
    ///
    /// Like turn intents, adjustments arriving while a turn is in flight are dropped.
    pub fn submit_angle_adjust(&mut self, increase: bool) -> Result<TurnOutcome, TurnError> {
        if let Some(animation) = &self.animation {
            return Err(TurnError::TurnInProgress {
                axis: animation.mapping.axis,
            });
        }
        let current = self.config.turn_angle;
        self.config.turn_angle = if increase {
            increased_turn_angle(current)
        } else {
            decreased_turn_angle(current)
        };
        Ok(TurnOutcome::AngleAdjusted {
            turn_angle: self.config.turn_angle,
        })
    }

    /// Cubie transforms in registry order, for drawing.
    pub fn cubie_transforms(&self) -> &[Mat4; CUBIE_COUNT] {
        self.cubies.transforms()
    }

    /// Rotate the cube by a cursor drag of `(dx, dy)` pixels.
    ///
    /// Horizontal motion turns about world Y, vertical motion about world X.
    pub fn camera_rotation_delta(&mut self, dx: f32, dy: f32) {
        let s = self.config.drag_sensitivity;
        self.orientation.rotate(dy * s, dx * s);
    }

    /// Zoom by `dy` scroll lines.
    pub fn camera_zoom_delta(&mut self, dy: f32) {
        self.camera.zoom(dy);
    }

    /// Which local face each turn key currently resolves to.
    pub fn control_mapping(&self) -> [(TurnKey, AxisMapping); 6] {
        let rotation = self.orientation.rotation_matrix();
        TurnKey::ALL.map(|key| (key, AxisMapping::resolve(key.world_direction(), &rotation)))
    }

    /// One-line summary of [`control_mapping`](Self::control_mapping), e.g. `F: Y+ | B: Y- | ...`.
    pub fn control_summary(&self) -> String {
        self.control_mapping()
            .iter()
            .map(|(key, mapping)| format!("{}: {}", key.letter(), mapping))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn is_turning(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&RotationAnimation> {
        self.animation.as_ref()
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn cubies(&self) -> &CubieRegistry {
        &self.cubies
    }

    pub fn locks(&self) -> &FaceLocks {
        &self.locks
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Base turn angle in degrees.
    pub fn turn_angle(&self) -> f32 {
        self.config.turn_angle
    }

    pub fn is_lock_mode(&self) -> bool {
        self.config.turn_angle == LOCK_MODE_ANGLE
    }
}

impl InputSink for PuzzleController {
    fn on_key(&mut self, key: KeyCode, shift: bool) {
        match KeyBinding::for_key(key) {
            Some(KeyBinding::Turn(turn_key)) => {
                match self.submit_turn_intent(turn_key.world_direction(), shift) {
                    Ok(TurnOutcome::LockToggled { mapping, locked }) => {
                        tracing::info!(key = %turn_key.letter(), face = %mapping, locked, "lock");
                    }
                    Ok(_) => {}
                    Err(e @ TurnError::TurnBlocked { .. }) => {
                        tracing::warn!(key = %turn_key.letter(), "{e}");
                    }
                    Err(e) => tracing::trace!(key = %turn_key.letter(), "dropped: {e}"),
                }
            }
            Some(KeyBinding::AdjustAngle(increase)) => match self.submit_angle_adjust(increase) {
                Ok(TurnOutcome::AngleAdjusted { turn_angle }) => {
                    tracing::info!(
                        turn_angle,
                        lock_mode = self.is_lock_mode(),
                        "base turn angle"
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::trace!(?key, "dropped: {e}"),
            },
            None => tracing::trace!(?key, "{}", TurnError::UnrecognizedIntent),
        }
    }

    fn on_mouse_move(&mut self, delta: Vec2, dragging: bool) {
        if dragging {
            self.camera_rotation_delta(delta.x, delta.y);
        }
    }

    fn on_scroll(&mut self, lines: f32) {
        self.camera_zoom_delta(lines);
    }

    fn on_drag_end(&mut self) {
        tracing::info!("camera-relative controls: {}", self.control_summary());
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::axis::{Axis, Sign};
    use crate::cubies::FACE_SIZE;

    fn facing_front() -> PuzzleController {
        PuzzleController::default().with_orientation(Orientation::new().angles(0.0, 0.0))
    }

    fn finish(puzzle: &mut PuzzleController) -> Option<AxisMapping> {
        for _ in 0..10_000 {
            if let Some(done) = puzzle.advance(1.0 / 60.0) {
                return Some(done);
            }
        }
        None
    }

    #[test]
    fn front_key_at_default_view_turns_exactly_one_face() {
        let mut puzzle = PuzzleController::default();
        let before = puzzle.cubies().clone();

        let outcome = puzzle.submit_turn_intent(Vec3::Z, false).unwrap();
        let TurnOutcome::Started {
            mapping,
            target_angle,
        } = outcome
        else {
            panic!("expected a turn, got {outcome:?}");
        };
        assert_eq!(mapping, AxisMapping::new(Axis::Y, Sign::Positive));
        assert_eq!(target_angle, 90.0_f32.to_radians());

        let moving = puzzle.animation().unwrap().moving_indices().to_vec();
        assert_eq!(moving.len(), FACE_SIZE);

        // target / speed seconds, plus one frame of slack.
        let seconds = target_angle / 10.0 + 1.0 / 60.0;
        let mut elapsed = 0.0;
        while elapsed < seconds {
            puzzle.advance(1.0 / 60.0);
            elapsed += 1.0 / 60.0;
        }
        assert!(!puzzle.is_turning());

        let quarter = Mat4::from_rotation_y(FRAC_PI_2);
        for i in 0..CUBIE_COUNT {
            let now = puzzle.cubie_transforms()[i];
            let was = *before.get(i).unwrap();
            if moving.contains(&i) {
                assert!(now.abs_diff_eq(quarter * was, 1e-5), "cubie {i}");
            } else {
                assert_eq!(now, was, "cubie {i}");
            }
        }
        assert!(puzzle.cubies().is_at_rest());
    }

    #[test]
    fn intents_while_turning_are_dropped() {
        let mut puzzle = facing_front();
        puzzle.submit_turn_intent(Vec3::X, false).unwrap();
        puzzle.advance(0.05);

        let animation = puzzle.animation().cloned().unwrap();
        let cubies = puzzle.cubies().clone();

        assert_eq!(
            puzzle.submit_turn_intent(Vec3::Y, true),
            Err(TurnError::TurnInProgress { axis: Axis::X })
        );
        puzzle.on_key(KeyCode::KeyU, false);

        assert_eq!(puzzle.animation(), Some(&animation));
        assert_eq!(puzzle.cubies(), &cubies);
    }

    #[test]
    fn reverse_and_negative_faces_flip_the_target() {
        let mut puzzle = facing_front();
        let outcome = puzzle.submit_turn_intent(Vec3::NEG_X, false).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Started {
                mapping: AxisMapping::new(Axis::X, Sign::Negative),
                target_angle: -(90.0_f32.to_radians()),
            }
        );
        finish(&mut puzzle);

        puzzle.on_key(KeyCode::KeyL, true);
        assert_eq!(puzzle.animation().unwrap().target_angle, 90.0_f32.to_radians());
    }

    #[test]
    fn four_front_turns_restore_the_cube() {
        let mut puzzle = facing_front();
        for _ in 0..4 {
            puzzle.on_key(KeyCode::KeyF, false);
            assert_eq!(
                finish(&mut puzzle),
                Some(AxisMapping::new(Axis::Z, Sign::Positive))
            );
        }
        assert_eq!(puzzle.cubies(), &CubieRegistry::new());
    }

    #[test]
    fn lock_mode_toggles_and_blocks_other_axes() {
        let mut puzzle = facing_front();
        assert_eq!(
            puzzle.submit_angle_adjust(false),
            Ok(TurnOutcome::AngleAdjusted { turn_angle: 45.0 })
        );
        assert!(puzzle.is_lock_mode());

        let outcome = puzzle.submit_turn_intent(Vec3::X, false).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::LockToggled {
                mapping: AxisMapping::new(Axis::X, Sign::Positive),
                locked: true,
            }
        );
        assert!(!puzzle.is_turning());
        assert!(puzzle.locks().is_blocked(Axis::Y));
        assert!(puzzle.locks().is_blocked(Axis::Z));
        assert!(!puzzle.locks().is_blocked(Axis::X));

        puzzle.submit_angle_adjust(true).unwrap();
        assert_eq!(
            puzzle.submit_turn_intent(Vec3::Y, false),
            Err(TurnError::TurnBlocked {
                mapping: AxisMapping::new(Axis::Y, Sign::Positive)
            })
        );
        assert!(!puzzle.is_turning());
        assert!(matches!(
            puzzle.submit_turn_intent(Vec3::NEG_X, false),
            Ok(TurnOutcome::Started { .. })
        ));
    }

    #[test]
    fn blocked_axis_cannot_be_unlocked_from_lock_mode() {
        let mut puzzle = facing_front();
        puzzle.submit_angle_adjust(false).unwrap();
        puzzle.submit_turn_intent(Vec3::Z, false).unwrap();
        assert_eq!(
            puzzle.submit_turn_intent(Vec3::Y, false),
            Err(TurnError::TurnBlocked {
                mapping: AxisMapping::new(Axis::Y, Sign::Positive)
            })
        );
        assert!(!puzzle.locks().is_locked(Axis::Y, Sign::Positive));
    }

    #[test]
    fn angle_keys_adjust_the_base_angle() {
        let mut puzzle = PuzzleController::default();
        puzzle.on_key(KeyCode::Equal, false);
        assert_eq!(puzzle.turn_angle(), 180.0);
        puzzle.on_key(KeyCode::NumpadAdd, false);
        assert_eq!(puzzle.turn_angle(), 180.0);
        puzzle.on_key(KeyCode::Minus, false);
        puzzle.on_key(KeyCode::Minus, false);
        puzzle.on_key(KeyCode::NumpadSubtract, false);
        assert_eq!(puzzle.turn_angle(), 45.0);
    }

    #[test]
    fn angle_keys_are_dropped_while_turning() {
        let mut puzzle = PuzzleController::default();
        puzzle.submit_turn_intent(Vec3::Z, false).unwrap();
        puzzle.advance(0.05);
        assert!(puzzle.is_turning());

        puzzle.on_key(KeyCode::Minus, false);
        assert_eq!(puzzle.turn_angle(), 90.0);
        assert!(!puzzle.is_lock_mode());
        assert!(matches!(
            puzzle.submit_angle_adjust(true),
            Err(TurnError::TurnInProgress { .. })
        ));
        assert_eq!(puzzle.turn_angle(), 90.0);

        finish(&mut puzzle);
        puzzle.on_key(KeyCode::Minus, false);
        assert_eq!(puzzle.turn_angle(), 45.0);
    }

    #[test]
    fn half_turn_is_twice_as_long() {
        let mut puzzle = facing_front();
        puzzle.submit_angle_adjust(true).unwrap();
        let outcome = puzzle.submit_turn_intent(Vec3::Y, false).unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::Started { target_angle, .. } if target_angle == 180.0_f32.to_radians()
        ));
        finish(&mut puzzle);
        // (1, 1, 1) ends up opposite at (-1, 1, -1).
        assert_eq!(puzzle.cubies().position(26), Some(Vec3::new(-1.0, 1.0, -1.0)));
    }

    #[test]
    fn unrecognized_input_changes_nothing() {
        let mut puzzle = PuzzleController::default();
        puzzle.on_key(KeyCode::KeyQ, true);
        assert!(!puzzle.is_turning());
        assert_eq!(puzzle.turn_angle(), 90.0);
        assert_eq!(
            puzzle.submit_turn_intent(Vec3::ZERO, false),
            Err(TurnError::UnrecognizedIntent)
        );
    }

    #[test]
    fn dragging_rotates_and_scrolling_zooms() {
        let mut puzzle = PuzzleController::default();
        puzzle.on_mouse_move(Vec2::new(10.0, -5.0), false);
        assert_eq!(*puzzle.orientation(), Orientation::default());

        puzzle.on_mouse_move(Vec2::new(10.0, -5.0), true);
        assert_eq!(puzzle.orientation().angle_y, 47.0);
        assert_eq!(puzzle.orientation().angle_x, 44.0);

        puzzle.on_scroll(2.0);
        assert_eq!(puzzle.camera().distance, 9.0);
    }

    #[test]
    fn controls_follow_the_orientation() {
        let puzzle = facing_front();
        assert_eq!(
            puzzle.control_summary(),
            "F: Z+ | B: Z- | R: X+ | L: X- | U: Y+ | D: Y-"
        );

        let turned =
            PuzzleController::default().with_orientation(Orientation::new().angles(0.0, 90.0));
        let front = turned.control_mapping()[0];
        assert_eq!(front, (TurnKey::Front, AxisMapping::new(Axis::X, Sign::Negative)));
    }

    #[test]
    fn advance_when_idle_is_a_no_op() {
        let mut puzzle = PuzzleController::default();
        assert_eq!(puzzle.advance(1.0), None);
        assert_eq!(puzzle.cubies(), &CubieRegistry::new());
    }
}
