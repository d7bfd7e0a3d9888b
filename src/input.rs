use std::collections::HashSet;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
    Digit(u8),
}

impl KeyCode {
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(key) = parse_named_key(name) {
            return Some(Self::Named(key));
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => {
                Some(Self::Character(ch.to_ascii_uppercase()))
            }
            (Some(ch), None) if ch.is_ascii_digit() => Some(Self::Digit(ch as u8 - b'0')),
            _ => None,
        }
    }

    /// Shorthand for a letter key.
    pub fn letter(ch: char) -> Self {
        Self::Character(ch.to_ascii_uppercase())
    }
}

fn parse_named_key(name: &str) -> Option<NamedKey> {
    use NamedKey::*;
    let key = match name {
        "Space" => Space,
        "Enter" | "Return" => Enter,
        "Escape" | "Esc" => Escape,
        "Left" => Left,
        "Right" => Right,
        "Up" => Up,
        "Down" => Down,
        "LeftShift" | "LShift" => LeftShift,
        "LeftCtrl" | "LControl" => LeftCtrl,
        _ => return None,
    };
    Some(key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Space,
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    LeftShift,
    LeftCtrl,
}

/// Identifier for a mouse button (left button is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const MIDDLE: Self = Self(2);

    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Per-frame input snapshot shared with components that read the keyboard
/// and mouse. The host writes into it; components only read.
#[derive(Debug, Default)]
pub struct InputState {
    keys: RwLock<HashSet<KeyCode>>,
    mouse_buttons: RwLock<HashSet<MouseButton>>,
    mouse: RwLock<MouseTrack>,
}

#[derive(Debug, Default, Clone, Copy)]
struct MouseTrack {
    position: Vec2,
    previous: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&self, key: KeyCode) {
        self.keys.write().insert(key);
    }

    pub fn set_key_up(&self, key: KeyCode) {
        self.keys.write().remove(&key);
    }

    pub fn set_mouse_button_down(&self, button: MouseButton) {
        self.mouse_buttons.write().insert(button);
    }

    pub fn set_mouse_button_up(&self, button: MouseButton) {
        self.mouse_buttons.write().remove(&button);
    }

    pub fn set_mouse_position(&self, position: Vec2) {
        self.mouse.write().position = position;
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.read().contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.read().contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse.read().position
    }

    /// Mouse movement since the last [`end_frame`](Self::end_frame).
    pub fn mouse_delta(&self) -> Vec2 {
        let mouse = self.mouse.read();
        mouse.position - mouse.previous
    }

    /// Rolls the snapshot over to the next frame.
    pub fn end_frame(&self) {
        let mut mouse = self.mouse.write();
        mouse.previous = mouse.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_character_keys() {
        assert_eq!(
            KeyCode::from_name("Space"),
            Some(KeyCode::Named(NamedKey::Space))
        );
        assert_eq!(KeyCode::from_name("w"), Some(KeyCode::Character('W')));
        assert_eq!(KeyCode::from_name("7"), Some(KeyCode::Digit(7)));
        assert_eq!(KeyCode::from_name("Bogus"), None);
    }

    #[test]
    fn input_state_tracks_keys_and_buttons() {
        let state = InputState::new();
        state.set_key_down(KeyCode::letter('w'));
        state.set_mouse_button_down(MouseButton::RIGHT);
        assert!(state.is_key_down(KeyCode::Character('W')));
        assert!(state.is_mouse_button_down(MouseButton::RIGHT));
        state.set_key_up(KeyCode::letter('w'));
        assert!(!state.is_key_down(KeyCode::letter('w')));
    }

    #[test]
    fn mouse_delta_resets_each_frame() {
        let state = InputState::new();
        state.set_mouse_position(Vec2::new(10.0, 4.0));
        assert_eq!(state.mouse_delta(), Vec2::new(10.0, 4.0));
        state.end_frame();
        assert_eq!(state.mouse_delta(), Vec2::ZERO);
        state.set_mouse_position(Vec2::new(12.0, 1.0));
        assert_eq!(state.mouse_delta(), Vec2::new(2.0, -3.0));
    }
}
