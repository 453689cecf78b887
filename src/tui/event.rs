use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    ForceQuit, // Ctrl+C
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Increment,
    Decrement,
    Skip,
    Complete,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
/// Terminal read errors are logged and treated as "no event".
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Terminal poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Terminal read failed: {}", e);
            None
        }
    }
}

/// Translate a key press into a TuiEvent. Releases and repeats are ignored.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::Up),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::Down),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        (_, KeyCode::Home) | (_, KeyCode::Char('g')) => Some(TuiEvent::Home),
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => Some(TuiEvent::End),
        (_, KeyCode::Right) | (_, KeyCode::Char('l')) => Some(TuiEvent::Increment),
        (_, KeyCode::Left) | (_, KeyCode::Char('h')) => Some(TuiEvent::Decrement),
        (_, KeyCode::Char('s')) => Some(TuiEvent::Skip),
        (_, KeyCode::Enter) => Some(TuiEvent::Complete),
        _ => None,
    }
}
