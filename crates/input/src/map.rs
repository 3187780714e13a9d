//! Key mapping from terminal events to logical keys.

use crate::types::{Key, KeyMask};
use crossterm::event::{KeyCode, KeyEvent};

/// Map a terminal key code to a logical key.
pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Key::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(Key::RotateRight),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Key::RotateLeft),

        KeyCode::Char(' ') => Some(Key::QuickDrop),

        _ => None,
    }
}

/// Fold a batch of pressed key events into one held-key snapshot.
pub fn held_keys<'a>(events: impl IntoIterator<Item = &'a KeyEvent>) -> KeyMask {
    events
        .into_iter()
        .filter_map(|event| key_for(event.code))
        .fold(KeyMask::EMPTY, KeyMask::with)
}
