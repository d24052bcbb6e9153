use crate::error::ConfigError;

/// Base turn angle, in degrees, at which key presses toggle face locks instead of turning.
pub const LOCK_MODE_ANGLE: f32 = 45.0;

/// Largest base turn angle, in degrees.
pub const MAX_TURN_ANGLE: f32 = 180.0;

/// Tunables for the puzzle controller.
///
/// # Example
/// ```
/// use cubeturn::PuzzleConfig;
///
/// let config = PuzzleConfig::new()
///     .turn_speed(6.0)
///     .drag_sensitivity(0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleConfig {
    /// Base turn angle in degrees: 45 (lock mode), 90 or 180.
    pub turn_angle: f32,
    /// Turn animation speed in radians per second.
    pub turn_speed: f32,
    /// Degrees of cube rotation per pixel of mouse drag.
    pub drag_sensitivity: f32,
    /// Camera distance change per scroll line.
    pub zoom_sensitivity: f32,
    /// Minimum camera distance from the cube center.
    pub min_distance: f32,
    /// Maximum camera distance from the cube center.
    pub max_distance: f32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            turn_angle: 90.0,
            turn_speed: 10.0,
            drag_sensitivity: 0.2,
            zoom_sensitivity: 0.5,
            min_distance: 4.0,
            max_distance: 40.0,
        }
    }
}

impl PuzzleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base turn angle in degrees.
    pub fn turn_angle(mut self, degrees: f32) -> Self {
        self.turn_angle = degrees;
        self
    }

    /// Set the turn animation speed in radians per second.
    pub fn turn_speed(mut self, speed: f32) -> Self {
        self.turn_speed = speed;
        self
    }

    /// Set drag sensitivity in degrees per pixel.
    pub fn drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    /// Set scroll zoom sensitivity.
    pub fn zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Set camera distance limits.
    pub fn distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if ![LOCK_MODE_ANGLE, 90.0, MAX_TURN_ANGLE].contains(&self.turn_angle) {
            return Err(ConfigError::TurnAngle(self.turn_angle));
        }
        if !(self.turn_speed > 0.0) || !self.turn_speed.is_finite() {
            return Err(ConfigError::TurnSpeed(self.turn_speed));
        }
        if !(self.min_distance > 0.0 && self.min_distance <= self.max_distance) {
            return Err(ConfigError::DistanceLimits {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        Ok(())
    }
}

/// Double the base angle while it is below [`MAX_TURN_ANGLE`], capped there.
pub fn increased_turn_angle(degrees: f32) -> f32 {
    if degrees < MAX_TURN_ANGLE {
        (degrees * 2.0).min(MAX_TURN_ANGLE)
    } else {
        degrees
    }
}

/// Halve the base angle while it is above [`LOCK_MODE_ANGLE`], floored there.
pub fn decreased_turn_angle(degrees: f32) -> f32 {
    if degrees > LOCK_MODE_ANGLE {
        (degrees / 2.0).max(LOCK_MODE_ANGLE)
    } else {
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(PuzzleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_odd_turn_angles() {
        let config = PuzzleConfig::new().turn_angle(60.0);
        assert_eq!(config.validate(), Err(ConfigError::TurnAngle(60.0)));
    }

    #[test]
    fn rejects_bad_speed_and_limits() {
        assert_eq!(
            PuzzleConfig::new().turn_speed(0.0).validate(),
            Err(ConfigError::TurnSpeed(0.0))
        );
        assert!(matches!(
            PuzzleConfig::new().distance_limits(10.0, 5.0).validate(),
            Err(ConfigError::DistanceLimits { .. })
        ));
    }

    #[test]
    fn angle_steps_stay_in_range() {
        assert_eq!(increased_turn_angle(45.0), 90.0);
        assert_eq!(increased_turn_angle(90.0), 180.0);
        assert_eq!(increased_turn_angle(180.0), 180.0);
        assert_eq!(decreased_turn_angle(180.0), 90.0);
        assert_eq!(decreased_turn_angle(90.0), 45.0);
        assert_eq!(decreased_turn_angle(45.0), 45.0);
    }
}
