//! # cubeturn
//!
//! **An interactive 3×3×3 twisty puzzle with camera-relative face turns.**
//!
//! The cube is drawn under a global rotation the user drags with the mouse. Turn keys
//! name screen-space directions (front, right, up, ...), and each press is resolved to
//! whichever local face currently points that way, so controls always follow what is
//! on screen.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cubeturn::{AppConfig, PuzzleConfig, PuzzleController};
//!
//! let puzzle = PuzzleController::new(PuzzleConfig::default());
//! cubeturn::run(AppConfig::default(), puzzle).unwrap();
//! ```
//!
//! ## Headless use
//!
//! Everything except the window and renderer runs without a GPU:
//!
//! ```
//! use cubeturn::{PuzzleController, TurnKey};
//!
//! let mut puzzle = PuzzleController::default();
//! puzzle.submit_turn_intent(TurnKey::Front.world_direction(), false).unwrap();
//! while puzzle.is_turning() {
//!     puzzle.advance(1.0 / 60.0);
//! }
//! assert!(puzzle.cubies().is_at_rest());
//! ```
//!
//! ## Controls
//!
//! - **F B R L U D**: turn the face pointing front, back, right, left, up or down
//! - **Shift**: reverse the turn direction
//! - **= / -**: double or halve the turn angle (45° is lock mode)
//! - **Left drag**: rotate the cube; **scroll**: zoom

mod animation;
mod app;
mod axis;
mod camera;
mod config;
mod controller;
mod cube_pass;
mod cubies;
mod error;
mod face_lock;
mod gpu;
mod input;
mod mesh;
mod orientation;
mod texture;

pub use animation::{AnimationStep, RotationAnimation};
pub use app::{AppConfig, AppError, run};
pub use axis::{Axis, AxisMapping, Sign, TurnKey};
pub use camera::Camera;
pub use config::{
    LOCK_MODE_ANGLE, MAX_TURN_ANGLE, PuzzleConfig, decreased_turn_angle, increased_turn_angle,
};
pub use controller::{KeyBinding, PuzzleController};
pub use cube_pass::CubePass;
pub use cubies::{CUBIE_COUNT, CubieRegistry, FACE_SIZE, LATTICE_EPSILON};
pub use error::{ConfigError, TurnError, TurnOutcome};
pub use face_lock::FaceLocks;
pub use gpu::{GpuContext, GpuError};
pub use input::{Input, InputSink};
pub use mesh::{Mesh, Vertex};
pub use orientation::Orientation;
pub use texture::Texture;

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::keyboard::KeyCode;
