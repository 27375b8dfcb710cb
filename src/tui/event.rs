//! Event Handling
//!
//! Maps keyboard and timer events to application actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Force quit (Ctrl+C)
    ForceQuit,
    /// Open the highlighted directory or choose the highlighted image
    Select,
    /// Go to the parent directory
    ParentDir,
    /// Send the selected image for analysis
    Analyze,
    /// Show or hide dot-files in the picker
    ToggleHidden,
    /// Toggle help view
    ToggleHelp,
    /// Escape - close modals
    Escape,
    /// Move the picker cursor up one entry
    MoveUp,
    /// Move the picker cursor down one entry
    MoveDown,
    /// Move the picker cursor up one page
    PageUp,
    /// Move the picker cursor down one page
    PageDown,
    /// Jump to the first entry
    First,
    /// Jump to the last entry
    Last,
    /// Timer tick for animations
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        // Spawn event polling task
        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }
}

/// Map a crossterm event to an app action
pub fn map_event(event: Event) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key_event(key),
        _ => None,
    }
}

/// Map a key event to an app action
pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => Some(AppAction::ToggleHelp),

        (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => Some(AppAction::Escape),
            KeyCode::Enter | KeyCode::Right => Some(AppAction::Select),
            KeyCode::Backspace | KeyCode::Left => Some(AppAction::ParentDir),
            KeyCode::F(1) | KeyCode::Char('?') => Some(AppAction::ToggleHelp),
            KeyCode::F(5) | KeyCode::Char('a') => Some(AppAction::Analyze),
            KeyCode::Char('q') => Some(AppAction::Quit),
            KeyCode::Char('.') => Some(AppAction::ToggleHidden),

            KeyCode::Up | KeyCode::Char('k') => Some(AppAction::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppAction::MoveDown),
            KeyCode::PageUp => Some(AppAction::PageUp),
            KeyCode::PageDown => Some(AppAction::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(AppAction::First),
            KeyCode::End | KeyCode::Char('G') => Some(AppAction::Last),
            _ => None,
        },

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_analyze_keys() {
        assert_eq!(map_key_event(key(KeyCode::Char('a'))), Some(AppAction::Analyze));
        assert_eq!(map_key_event(key(KeyCode::F(5))), Some(AppAction::Analyze));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppAction::ForceQuit)
        );
        assert_eq!(map_key_event(key(KeyCode::Char('q'))), Some(AppAction::Quit));
    }

    #[test]
    fn test_shifted_g_jumps_to_last() {
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(AppAction::Last)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_event(Event::Key(release)), None);
        assert_eq!(map_event(Event::Key(key(KeyCode::Enter))), Some(AppAction::Select));
    }

    #[test]
    fn test_unbound_keys_map_to_nothing() {
        assert_eq!(map_key_event(key(KeyCode::Char('z'))), None);
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)),
            None
        );
    }
}
