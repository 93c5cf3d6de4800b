use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Toggle,
    ClearTags,
    Refresh,
    None,
}

pub fn map_event(ev: Event) -> Action {
    if let Event::Key(KeyEvent { code, kind, .. }) = ev {
        if kind == KeyEventKind::Release {
            return Action::None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Enter | KeyCode::Char(' ') => Action::Toggle,
            KeyCode::Char('a') => Action::ClearTags,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    } else {
        Action::None
    }
}
