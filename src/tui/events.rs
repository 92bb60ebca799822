//! Terminal Input
//!
//! Polls crossterm for key presses on a background task and forwards them as
//! [`Event`]s into the import session's channel.

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::events::Event;

/// Background reader of terminal events
pub struct EventHandler {
    cancellation_token: CancellationToken,
    _terminal_task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Start forwarding terminal input to `sender`
    pub fn spawn(sender: mpsc::UnboundedSender<Event>) -> Self {
        let cancellation_token = CancellationToken::new();
        let token = cancellation_token.clone();

        let terminal_task = tokio::spawn(async move {
            while !token.is_cancelled() {
                // Poll for events with a timeout to avoid blocking
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(terminal_event) = event::read() {
                        if let Some(app_event) = convert_terminal_event(terminal_event) {
                            if sender.send(app_event).is_err() {
                                break; // Channel closed, exit the loop
                            }
                        }
                    }
                }

                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        });

        Self {
            cancellation_token,
            _terminal_task: terminal_task,
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

fn convert_terminal_event(terminal_event: event::Event) -> Option<Event> {
    match terminal_event {
        event::Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            convert_key_event(key_event)
        }
        event::Event::Resize(_, _) => Some(Event::Tick),
        _ => None,
    }
}

/// Map a key press; plain characters are text input, so commands need Ctrl
pub fn convert_key_event(key_event: KeyEvent) -> Option<Event> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Event::Quit),
            KeyCode::Char('a') => Some(Event::ToggleActions),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Tab => Some(Event::Tab),
        KeyCode::BackTab => Some(Event::BackTab),
        KeyCode::Enter => Some(Event::Enter),
        KeyCode::Esc => Some(Event::Escape),
        KeyCode::Up => Some(Event::Up),
        KeyCode::Down => Some(Event::Down),
        KeyCode::Left => Some(Event::Left),
        KeyCode::Right => Some(Event::Right),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Delete => Some(Event::Delete),
        KeyCode::Char(c) => Some(Event::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_characters_are_text_input() {
        assert!(matches!(
            convert_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Event::Char('q'))
        ));
        assert!(matches!(
            convert_key_event(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(Event::Char('Q'))
        ));
    }

    #[test]
    fn test_control_keys() {
        assert!(matches!(
            convert_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Quit)
        ));
        assert!(matches!(
            convert_key_event(key(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            Some(Event::ToggleActions)
        ));
        assert!(convert_key_event(key(KeyCode::Char('x'), KeyModifiers::CONTROL)).is_none());
        assert!(matches!(
            convert_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Event::BackTab)
        ));
    }
}
