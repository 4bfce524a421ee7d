use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::cat::Interaction;

/// Longest name a prompt accepts.
pub const NAME_MAX: usize = 24;

/// What a key or click asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Adopt,
    Interact(Interaction),
    InteractAll(Interaction),
    RenameOpen,
    Remove,
    SelectNext,
    Click { col: u16, row: u16 },
    PromptChar(char),
    PromptBackspace,
    PromptCommit,
    PromptCancel,
    Resize { cols: u16, rows: u16 },
    Quit,
}

/// Drain pending terminal events without blocking past `max_wait`.
pub fn collect_events(max_wait: Duration) -> Result<Vec<Event>> {
    let mut out = Vec::new();
    let timeout = max_wait.min(Duration::from_millis(1));
    while event::poll(timeout)? {
        out.push(event::read()?);
        if out.len() >= 32 {
            break;
        }
    }
    Ok(out)
}

/// Translate one event. `prompting` routes keys into the open text prompt.
pub fn map_event(ev: Event, prompting: bool) -> Option<Action> {
    match ev {
        Event::Key(key) => map_key(key, prompting),
        Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) && !prompting => {
            Some(Action::Click {
                col: m.column,
                row: m.row,
            })
        }
        Event::Resize(cols, rows) => Some(Action::Resize { cols, rows }),
        _ => None,
    }
}

fn map_key(key: KeyEvent, prompting: bool) -> Option<Action> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if prompting {
        return match key.code {
            KeyCode::Enter => Some(Action::PromptCommit),
            KeyCode::Esc => Some(Action::PromptCancel),
            KeyCode::Backspace => Some(Action::PromptBackspace),
            KeyCode::Char(ch) if !ch.is_control() => Some(Action::PromptChar(ch)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('a') => Some(Action::Adopt),
        KeyCode::Char('f') => Some(Action::Interact(Interaction::Feed)),
        KeyCode::Char('s') => Some(Action::Interact(Interaction::Snack)),
        KeyCode::Char('w') => Some(Action::Interact(Interaction::Water)),
        KeyCode::Char('p') => Some(Action::Interact(Interaction::Pet)),
        KeyCode::Char('t') => Some(Action::Interact(Interaction::Play)),
        KeyCode::Char('F') => Some(Action::InteractAll(Interaction::Feed)),
        KeyCode::Char('W') => Some(Action::InteractAll(Interaction::Water)),
        KeyCode::Char('P') => Some(Action::InteractAll(Interaction::Pet)),
        KeyCode::Char('A') => Some(Action::InteractAll(Interaction::Play)),
        KeyCode::Char('r') => Some(Action::RenameOpen),
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::Remove),
        KeyCode::Tab => Some(Action::SelectNext),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn keys_map_to_interactions() {
        assert_eq!(
            map_event(press(KeyCode::Char('f')), false),
            Some(Action::Interact(Interaction::Feed))
        );
        assert_eq!(
            map_event(press(KeyCode::Char('W')), false),
            Some(Action::InteractAll(Interaction::Water))
        );
        assert_eq!(
            map_event(press(KeyCode::Char('A')), false),
            Some(Action::InteractAll(Interaction::Play))
        );
        assert_eq!(
            map_event(press(KeyCode::Char('a')), false),
            Some(Action::Adopt)
        );
    }

    #[test]
    fn prompt_captures_letters() {
        assert_eq!(
            map_event(press(KeyCode::Char('q')), true),
            Some(Action::PromptChar('q'))
        );
        assert_eq!(
            map_event(press(KeyCode::Esc), true),
            Some(Action::PromptCancel)
        );
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            map_event(Event::Resize(100, 40), false),
            Some(Action::Resize { cols: 100, rows: 40 })
        );
    }
}
