use crate::app::{App, AppEvent, InputFocus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translates a key press into an event for [`App::dispatch`]. Returns
/// `None` for keys that mean nothing in the current state.
pub fn handle_key(key: KeyEvent, app: &App) -> Option<AppEvent> {
    if app.show_quit_confirm {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(AppEvent::ConfirmQuit)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(AppEvent::CancelQuit),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(AppEvent::ConfirmQuit),
            KeyCode::Char('l') => Some(AppEvent::ClearConversation),
            KeyCode::Char('s') => Some(AppEvent::ExportChart),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(AppEvent::RequestQuit),
        KeyCode::Enter => match app.focus {
            InputFocus::Query => Some(AppEvent::Submit),
            // Enter in the token field just hands focus back.
            InputFocus::Token => Some(AppEvent::ToggleTokenFocus),
        },
        KeyCode::Tab | KeyCode::BackTab => Some(AppEvent::ToggleTokenFocus),
        KeyCode::Up => Some(AppEvent::ScrollUp),
        KeyCode::Down => Some(AppEvent::ScrollDown),
        KeyCode::PageUp => Some(AppEvent::ScrollPageUp),
        KeyCode::PageDown => Some(AppEvent::ScrollPageDown),
        KeyCode::Backspace => Some(AppEvent::InputBackspace),
        KeyCode::Char(c) => Some(AppEvent::InputChar(c)),
        _ => None,
    }
}
