//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::SalutisError;

/// Action requested by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Select the previous pattern.
    Previous,
    /// Select the next pattern.
    Next,
    /// Start or pause.
    Toggle,
    /// Reset the exercise.
    Reset,
    /// Show or hide key help.
    Help,
}

/// Map a key press to an action.
#[must_use]
pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Previous),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Next),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(timeout: Duration) -> Result<Option<Action>, SalutisError> {
    if event::poll(timeout)
        .map_err(|e| SalutisError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| SalutisError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(key_action(key));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_action(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(key_action(key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(key_action(key(KeyCode::Char('j'))), Some(Action::Next));
        assert_eq!(key_action(key(KeyCode::Down)), Some(Action::Next));
        assert_eq!(key_action(key(KeyCode::Char('k'))), Some(Action::Previous));
        assert_eq!(key_action(key(KeyCode::Up)), Some(Action::Previous));
        assert_eq!(key_action(key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(key_action(key(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(key_action(key(KeyCode::Char('?'))), Some(Action::Help));
        assert_eq!(key_action(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(event), Some(Action::Quit));
    }
}
