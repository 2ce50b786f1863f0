use std::collections::HashSet;

use crate::event::Event;

use super::types::{ButtonState, Key, Modifiers, MouseButton};

/// Input readouts visible to sketches.
///
/// Mouse coordinates are logical pixels, top-left origin. `pmouse_*` hold the
/// position the previous update saw: they are copied from `mouse_*` by
/// `begin_frame`, which the runtime calls before any event of the new frame
/// is applied.
#[derive(Debug, Default)]
pub struct InputState {
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub pmouse_x: f32,
    pub pmouse_y: f32,

    /// Vertical wheel movement accumulated since the run started, in the
    /// wheel notches. Positive is away from the user.
    pub wheel_delta: f32,

    pub modifiers: Modifiers,
    pub focused: bool,

    /// Whether the pointer is currently over the window.
    pub mouse_inside: bool,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Snapshots the current mouse position into `pmouse_*`.
    pub fn begin_frame(&mut self) {
        self.pmouse_x = self.mouse_x;
        self.pmouse_y = self.mouse_y;
    }

    /// Folds a platform event into the current state.
    ///
    /// Events that carry no input (quit, resize, text) leave the state unchanged.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::MouseMoved { x, y } => {
                self.mouse_x = *x;
                self.mouse_y = *y;
                self.mouse_inside = true;
            }

            Event::MouseLeft => {
                // Keep the last position; sketches keep drawing relative to it.
                self.mouse_inside = false;
            }

            Event::MouseButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(*button);
                }
                ButtonState::Released => {
                    self.buttons_down.remove(button);
                }
            },

            Event::MouseWheel { dy, .. } => {
                self.wheel_delta += *dy;
            }

            Event::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    self.keys_down.insert(*key);
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            Event::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            Event::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear held sets so nothing stays stuck.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            Event::Quit | Event::Resized { .. } | Event::Text(_) => {}
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> Event {
        Event::MouseMoved { x, y }
    }

    #[test]
    fn previous_position_is_the_last_frames_position() {
        let mut input = InputState::default();

        input.begin_frame();
        input.apply_event(&moved(10.0, 20.0));
        input.apply_event(&moved(12.0, 22.0));
        assert_eq!((input.pmouse_x, input.pmouse_y), (0.0, 0.0));
        assert_eq!((input.mouse_x, input.mouse_y), (12.0, 22.0));

        input.begin_frame();
        input.apply_event(&moved(30.0, 5.0));
        assert_eq!((input.pmouse_x, input.pmouse_y), (12.0, 22.0));
        assert_eq!((input.mouse_x, input.mouse_y), (30.0, 5.0));

        // A frame without movement makes both equal.
        input.begin_frame();
        assert_eq!((input.pmouse_x, input.pmouse_y), (30.0, 5.0));
        assert_eq!((input.mouse_x, input.mouse_y), (30.0, 5.0));
    }

    #[test]
    fn wheel_accumulates_across_frames() {
        let mut input = InputState::default();
        input.apply_event(&Event::MouseWheel { dx: 0.0, dy: 1.0 });
        input.begin_frame();
        input.apply_event(&Event::MouseWheel { dx: 0.0, dy: 2.5 });
        input.apply_event(&Event::MouseWheel { dx: 3.0, dy: -0.5 });
        assert_eq!(input.wheel_delta, 3.0);
    }

    #[test]
    fn focus_loss_releases_held_inputs() {
        let mut input = InputState::default();
        input.apply_event(&Event::Key { key: Key::A, state: ButtonState::Pressed, repeat: false });
        input.apply_event(&Event::MouseButton {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
        });
        assert!(input.key_down(Key::A));
        assert!(input.button_down(MouseButton::Left));

        input.apply_event(&Event::Focused(false));
        assert!(!input.key_down(Key::A));
        assert!(!input.button_down(MouseButton::Left));
    }

    #[test]
    fn mouse_left_keeps_last_position() {
        let mut input = InputState::default();
        input.apply_event(&moved(4.0, 8.0));
        input.apply_event(&Event::MouseLeft);
        assert!(!input.mouse_inside);
        assert_eq!((input.mouse_x, input.mouse_y), (4.0, 8.0));
    }
}
