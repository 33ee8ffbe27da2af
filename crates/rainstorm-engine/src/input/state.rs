use std::collections::HashSet;

use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Current input state for the engine's window.
///
/// Holds "is down" sets and the pointer position, plus the transitions that
/// happened since the last [`begin_frame`](Self::begin_frame).
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels.
    pub pointer: Option<(i32, i32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,

    /// Keys pressed this frame (auto-repeat excluded).
    pub keys_pressed: HashSet<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,
}

impl InputState {
    /// Clears per-frame transitions. Called before the frame's event poll.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
    }

    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y } => self.pointer = Some((*x, *y)),

            InputEvent::PointerLeft => self.pointer = None,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::Key { key, state, repeat } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        self.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::Button { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        self.buttons_pressed.insert(*button);
                    }
                }
                ButtonState::Released => {
                    self.buttons_down.remove(button);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn pointer_tracks_moves_and_leave() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 12, y: -3 });
        assert_eq!(s.pointer, Some((12, -3)));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer, None);
    }

    #[test]
    fn press_is_reported_for_one_frame() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Space, ButtonState::Pressed));
        assert!(s.key_pressed(Key::Space));
        assert!(s.key_down(Key::Space));

        s.begin_frame();
        assert!(!s.key_pressed(Key::Space));
        assert!(s.key_down(Key::Space));

        s.apply_event(&key(Key::Space, ButtonState::Released));
        assert!(!s.key_down(Key::Space));
    }

    #[test]
    fn auto_repeat_is_not_a_new_press() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Character('a'), ButtonState::Pressed));
        s.begin_frame();
        s.apply_event(&InputEvent::Key {
            key: Key::Character('a'),
            state: ButtonState::Pressed,
            repeat: true,
        });
        assert!(!s.key_pressed(Key::Character('a')));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&key(Key::Escape, ButtonState::Pressed));
        s.apply_event(&InputEvent::Button {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
        });
        assert!(s.button_pressed(MouseButton::Left));

        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(!s.key_down(Key::Escape));
        assert!(!s.button_down(MouseButton::Left));
    }
}
