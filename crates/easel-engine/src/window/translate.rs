use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::event::Event;
use crate::input::{ButtonState, Key, Modifiers, MouseButton};

/// Pixels per wheel notch for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f32 = 20.0;

/// Translates a winit `WindowEvent` into zero or more runtime events.
///
/// `scale` is the window's scale factor; positions and sizes come out in
/// logical pixels. A key press carrying text yields both `Key` and `Text`.
pub fn translate_window_event(scale: f64, event: &WindowEvent, out: &mut Vec<Event>) {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => out.push(Event::Quit),

        WindowEvent::Resized(size) => {
            let (width, height) = to_logical_size(scale, *size);
            out.push(Event::Resized { width, height });
        }

        WindowEvent::ModifiersChanged(m) => {
            out.push(Event::ModifiersChanged(map_modifiers(m.state())));
        }

        WindowEvent::Focused(f) => out.push(Event::Focused(*f)),

        WindowEvent::CursorLeft { .. } => out.push(Event::MouseLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale, *position);
            out.push(Event::MouseMoved { x, y });
        }

        WindowEvent::MouseInput { state, button, .. } => out.push(Event::MouseButton {
            button: map_mouse_button(*button),
            state: map_state(*state),
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = wheel_lines(scale, *delta);
            out.push(Event::MouseWheel { dx, dy });
        }

        WindowEvent::KeyboardInput { event, .. } => {
            out.push(Event::Key {
                key: map_key(event.physical_key),
                state: map_state(event.state),
                repeat: event.repeat,
            });

            if event.state == ElementState::Pressed {
                if let Some(text) = event.text.as_ref().filter(|t| !t.chars().any(char::is_control)) {
                    out.push(Event::Text(text.to_string()));
                }
            }
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) if !text.is_empty() => {
            out.push(Event::Text(text.clone()));
        }

        _ => {}
    }
}

pub(crate) fn to_logical_size(scale: f64, size: PhysicalSize<u32>) -> (u32, u32) {
    let logical = size.to_logical::<f64>(scale);
    (logical.width.round() as u32, logical.height.round() as u32)
}

fn to_logical_f32(scale: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

/// Wheel movement in notches. Positive y scrolls away from the user.
fn wheel_lines(scale: f64, delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = to_logical_f32(scale, p);
            (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE)
        }
    }
}

fn map_state(s: ElementState) -> ButtonState {
    match s {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        // Native codes have no stable numeric form in winit 0.30.
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        DeviceId::dummy()
    }

    fn translate(scale: f64, event: WindowEvent) -> Vec<Event> {
        let mut out = Vec::new();
        translate_window_event(scale, &event, &mut out);
        out
    }

    #[test]
    fn close_request_becomes_quit() {
        assert_eq!(translate(1.0, WindowEvent::CloseRequested), vec![Event::Quit]);
    }

    #[test]
    fn resize_is_reported_in_logical_pixels() {
        let events = translate(2.0, WindowEvent::Resized(PhysicalSize::new(1600, 900)));
        assert_eq!(events, vec![Event::Resized { width: 800, height: 450 }]);
    }

    #[test]
    fn cursor_position_is_scaled() {
        let events = translate(
            2.0,
            WindowEvent::CursorMoved {
                device_id: device(),
                position: PhysicalPosition::new(100.0, 50.0),
            },
        );
        assert_eq!(events, vec![Event::MouseMoved { x: 50.0, y: 25.0 }]);
    }

    #[test]
    fn wheel_pixels_convert_to_notches() {
        let events = translate(
            1.0,
            WindowEvent::MouseWheel {
                device_id: device(),
                delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)),
                phase: winit::event::TouchPhase::Moved,
            },
        );
        assert_eq!(events, vec![Event::MouseWheel { dx: 0.0, dy: 2.0 }]);
    }

    #[test]
    fn mouse_buttons_map_one_to_one() {
        let events = translate(
            1.0,
            WindowEvent::MouseInput {
                device_id: device(),
                state: ElementState::Pressed,
                button: WinitMouseButton::Right,
            },
        );
        assert_eq!(
            events,
            vec![Event::MouseButton {
                button: MouseButton::Right,
                state: ButtonState::Pressed,
            }]
        );
    }

    #[test]
    fn focus_and_leave_pass_through() {
        assert_eq!(translate(1.0, WindowEvent::Focused(false)), vec![Event::Focused(false)]);
        assert_eq!(
            translate(1.0, WindowEvent::CursorLeft { device_id: device() }),
            vec![Event::MouseLeft]
        );
    }

    #[test]
    fn unrelated_events_are_dropped() {
        assert!(translate(1.0, WindowEvent::RedrawRequested).is_empty());
    }

    #[test]
    fn key_codes_map_to_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
        assert!(matches!(
            map_key(PhysicalKey::Code(KeyCode::NumpadAdd)),
            Key::Unknown(_)
        ));
    }

    #[test]
    fn modifier_flags_are_copied() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        assert!(m.shift && m.meta);
        assert!(!m.ctrl && !m.alt);
    }
}
