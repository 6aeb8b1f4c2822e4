use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use pharmavigil_client::Language;

use crate::action::Action;
use crate::app::{App, Focus, Screen};

/// Map a crossterm terminal event to a TUI action.
///
/// Mapping is context-sensitive: overlays swallow everything except dismiss
/// and quit, and the editor pane turns printable keys into text edits.
pub fn map_event(event: &Event, app: &App) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key, app),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_key(key: &KeyEvent, app: &App) -> Action {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // A notice is blocking: only dismissal (and quit) gets through.
    if app.notice.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::DismissNotice,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    if app.show_help {
        return match key.code {
            KeyCode::Char('?') | KeyCode::Esc => Action::ToggleHelp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match app.screen {
        Screen::EntryDetail(_) => map_detail_key(key),
        Screen::Dashboard => match app.focus {
            Focus::Editor => map_editor_key(key),
            Focus::History => map_browse_key(key),
        },
    }
}

fn map_editor_key(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('p') => Action::Process,
            KeyCode::Char('x') => Action::ClearInput,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Tab => Action::LeaveEditor,
        KeyCode::Enter => Action::InsertNewline,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}

fn map_browse_key(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => Action::PageDown,
            KeyCode::Char('u') => Action::PageUp,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('i') | KeyCode::Tab => Action::FocusEditor,
        KeyCode::Char('p') => Action::Process,
        KeyCode::Char('c') => Action::ClearInput,
        KeyCode::Char('f') => Action::Translate(Language::French),
        KeyCode::Char('w') => Action::Translate(Language::Swahili),
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_detail_key(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => Action::PageDown,
            KeyCode::Char('u') => Action::PageUp,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Esc | KeyCode::Backspace => Action::NavigateBack,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}
