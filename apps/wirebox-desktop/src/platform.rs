use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use wirebox_input::Key;

use crate::app::LoopEvent;

/// Translates a winit `WindowEvent` into a loop event.
///
/// Returns `None` for events the loop ignores, including unbound keys.
pub fn translate_window_event(event: &WindowEvent) -> Option<LoopEvent> {
    match event {
        WindowEvent::CloseRequested => Some(LoopEvent::CloseRequested),
        WindowEvent::Focused(false) => Some(LoopEvent::FocusLost),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    ..
                },
            ..
        } => {
            let key = map_key(*code)?;
            Some(match state {
                ElementState::Pressed => LoopEvent::KeyPressed(key),
                ElementState::Released => LoopEvent::KeyReleased(key),
            })
        }
        _ => None,
    }
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_translate() {
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key(KeyCode::KeyD), Some(Key::D));
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Space), None);
        assert_eq!(map_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn close_and_focus_events() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(LoopEvent::CloseRequested)
        );
        assert_eq!(
            translate_window_event(&WindowEvent::Focused(false)),
            Some(LoopEvent::FocusLost)
        );
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
