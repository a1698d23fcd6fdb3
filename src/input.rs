//! Input handling: raw keys and focus changes to host actions.
//!
//! Both the terminal and the browser client speak in [`HostAction`]s, so the
//! game loop never sees device-specific codes.

use crate::snake::types::Direction;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the player asked the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Turn(Direction),
    TogglePause,
    /// The game lost focus or visibility
    Pause,
    /// The game regained focus or visibility
    Resume,
    Quit,
}

/// Map a terminal event. Key releases and unrelated events map to `None`.
pub fn map_event(event: &Event) -> Option<HostAction> {
    match event {
        Event::Key(key) => map_key(key),
        Event::FocusLost => Some(HostAction::Pause),
        Event::FocusGained => Some(HostAction::Resume),
        _ => None,
    }
}

/// Arrow keys and WASD steer; Space or `p` pauses; `q`, Esc or Ctrl+C quit.
pub fn map_key(key: &KeyEvent) -> Option<HostAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(HostAction::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(HostAction::Turn(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(HostAction::Turn(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(HostAction::Turn(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(HostAction::Turn(Direction::Right))
        }
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(HostAction::TogglePause)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(HostAction::Quit),
        _ => None,
    }
}

/// Map a browser `KeyboardEvent.key` value. The browser cannot quit the host.
pub fn map_browser_key(key: &str) -> Option<HostAction> {
    let action = match key {
        "ArrowUp" | "w" | "W" => HostAction::Turn(Direction::Up),
        "ArrowDown" | "s" | "S" => HostAction::Turn(Direction::Down),
        "ArrowLeft" | "a" | "A" => HostAction::Turn(Direction::Left),
        "ArrowRight" | "d" | "D" => HostAction::Turn(Direction::Right),
        " " | "p" | "P" => HostAction::TogglePause,
        _ => return None,
    };
    Some(action)
}
