use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Receiver of discrete input events.
///
/// The window layer turns raw events into these calls; the puzzle controller
/// implements it.
pub trait InputSink {
    /// A key was pressed or auto-repeated.
    fn on_key(&mut self, key: KeyCode, shift: bool);

    /// The cursor moved by `delta` pixels. `dragging` is true while the left button is held.
    fn on_mouse_move(&mut self, delta: Vec2, dragging: bool);

    /// The wheel scrolled by `lines` (positive is away from the user).
    fn on_scroll(&mut self, lines: f32);

    /// The left button was released after a drag.
    fn on_drag_end(&mut self) {}
}

/// Translates winit window events into [`InputSink`] calls.
///
/// Tracks the little state needed for that: cursor position, whether the left button
/// is held, and whether Shift is down.
#[derive(Debug, Default)]
pub struct Input {
    shift: bool,
    dragging: bool,
    cursor: Option<Vec2>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, forwarding whatever it means to `sink`.
    pub fn handle_event(&mut self, event: &WindowEvent, sink: &mut impl InputSink) {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
            }
            WindowEvent::KeyboardInput {
                event, is_synthetic, ..
            } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.key(key, event.state == ElementState::Pressed, *is_synthetic, sink);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.left_button(*state == ElementState::Pressed, sink),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32), sink);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                if lines != 0.0 {
                    sink.on_scroll(lines);
                }
            }
            _ => {}
        }
    }

    /// A physical key changed state.
    ///
    /// Only real presses and their repeats reach the sink. Synthetic presses, sent for
    /// keys already held when the window gains focus, are ignored.
    pub fn key(&mut self, key: KeyCode, pressed: bool, synthetic: bool, sink: &mut impl InputSink) {
        if pressed && !synthetic {
            sink.on_key(key, self.shift);
        }
    }

    /// Left button pressed or released.
    pub fn left_button(&mut self, pressed: bool, sink: &mut impl InputSink) {
        let was_dragging = self.dragging;
        self.dragging = pressed;
        if was_dragging && !pressed {
            sink.on_drag_end();
        }
    }

    /// Cursor moved to `position` in window coordinates.
    pub fn cursor_moved(&mut self, position: Vec2, sink: &mut impl InputSink) {
        if let Some(last) = self.cursor {
            let delta = position - last;
            if delta != Vec2::ZERO {
                sink.on_mouse_move(delta, self.dragging);
            }
        }
        self.cursor = Some(position);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        keys: Vec<KeyCode>,
        moves: Vec<(Vec2, bool)>,
        drag_ends: usize,
    }

    impl InputSink for Recorder {
        fn on_key(&mut self, key: KeyCode, _shift: bool) {
            self.keys.push(key);
        }

        fn on_mouse_move(&mut self, delta: Vec2, dragging: bool) {
            self.moves.push((delta, dragging));
        }

        fn on_scroll(&mut self, _lines: f32) {}

        fn on_drag_end(&mut self) {
            self.drag_ends += 1;
        }
    }

    #[test]
    fn first_cursor_position_is_not_a_move() {
        let mut input = Input::new();
        let mut sink = Recorder::default();
        input.cursor_moved(Vec2::new(100.0, 100.0), &mut sink);
        assert!(sink.moves.is_empty());
        input.cursor_moved(Vec2::new(110.0, 95.0), &mut sink);
        assert_eq!(sink.moves, vec![(Vec2::new(10.0, -5.0), false)]);
    }

    #[test]
    fn drag_flag_follows_left_button() {
        let mut input = Input::new();
        let mut sink = Recorder::default();
        input.cursor_moved(Vec2::ZERO, &mut sink);
        input.left_button(true, &mut sink);
        input.cursor_moved(Vec2::new(3.0, 0.0), &mut sink);
        input.left_button(false, &mut sink);
        input.cursor_moved(Vec2::new(4.0, 0.0), &mut sink);

        assert_eq!(
            sink.moves,
            vec![(Vec2::new(3.0, 0.0), true), (Vec2::new(1.0, 0.0), false)]
        );
        assert_eq!(sink.drag_ends, 1);
        assert!(!input.is_dragging());
    }

    #[test]
    fn release_without_press_is_not_a_drag_end() {
        let mut input = Input::new();
        let mut sink = Recorder::default();
        input.left_button(false, &mut sink);
        assert_eq!(sink.drag_ends, 0);
    }

    #[test]
    fn only_real_presses_reach_the_sink() {
        let mut input = Input::new();
        let mut sink = Recorder::default();
        input.key(KeyCode::KeyF, true, true, &mut sink);
        input.key(KeyCode::KeyR, false, false, &mut sink);
        input.key(KeyCode::KeyU, true, false, &mut sink);
        assert_eq!(sink.keys, vec![KeyCode::KeyU]);
    }
}
