//! TUI event handling.
//!
//! This module handles terminal events (key presses, resize, etc.)
//! and converts them into actions.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::action::Action;
use super::state::AppState;

/// Event handler that polls for terminal events.
pub struct EventHandler {
    /// Receiver for events
    rx: mpsc::UnboundedReceiver<Event>,
    /// Cancellation token for the background polling task
    cancel_token: CancellationToken,
}

impl EventHandler {
    /// Create a new event handler.
    ///
    /// This spawns a background task that polls for terminal events.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        tokio::spawn(async move {
            loop {
                if token.is_cancelled() {
                    break;
                }
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(event) = event::read() {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, cancel_token }
    }

    /// Cancel the event polling task.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Get the next event, if available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current state.
pub fn map_key_event(key: KeyEvent, state: &AppState) -> Action {
    if state.help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::F(1) => Action::ToggleHelp,
            _ => Action::None,
        };
    }

    match key.code {
        // ctrl+c always quits
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q' | 'Q') => Action::Quit,

        KeyCode::Char('?') | KeyCode::F(1) => Action::ToggleHelp,
        KeyCode::Char('L') => Action::ToggleLog,

        // presentation
        KeyCode::Char('m') => Action::ShowMaster,
        KeyCode::Char('d') => Action::ShowDetail,
        KeyCode::Backspace | KeyCode::Esc | KeyCode::Char('b') => Action::Back,
        KeyCode::Char('r') => Action::RevealMaster,
        KeyCode::Char('s') => Action::ReshowDetail,
        KeyCode::Char('M') => Action::ToggleModal,
        KeyCode::Char('e') => Action::ToggleEnabled,
        KeyCode::Char('o') => Action::Rotate,

        // action bar
        KeyCode::Enter => Action::RunPrimary,
        KeyCode::Char(c @ '1'..='9') => Action::RunItem(usize::from(c as u8 - b'1')),

        _ => Action::None,
    }
}
