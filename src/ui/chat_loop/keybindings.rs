//! Mapping from key presses to chat actions.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAmount {
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Quit,
    Submit,
    InsertChar(char),
    NewLine,
    Backspace,
    /// Cursor motion or editing chord forwarded to the input textarea.
    Edit(KeyEvent),
    ClearInput,
    ClearHistory,
    NextModel,
    PreviousModel,
    ScrollUp(ScrollAmount),
    ScrollDown(ScrollAmount),
    ScrollToBottom,
    Ignore,
}

pub fn action_for(key: &KeyEvent) -> ChatAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    // AltGr arrives as Ctrl+Alt on Windows layouts
    let command = ctrl && !alt;

    match key.code {
        KeyCode::Esc => ChatAction::Quit,
        KeyCode::Char('c') if command => ChatAction::Quit,
        KeyCode::Char('l') if command => ChatAction::ClearHistory,
        KeyCode::Char('u') if command => ChatAction::ClearInput,
        KeyCode::Char('a' | 'e' | 'w' | 'k') if command => ChatAction::Edit(*key),
        KeyCode::Char(_) if command => ChatAction::Ignore,
        KeyCode::Char('b' | 'f') if alt && !ctrl => ChatAction::Edit(*key),
        KeyCode::Char(c) => ChatAction::InsertChar(c),
        KeyCode::Enter if alt => ChatAction::NewLine,
        KeyCode::Enter => ChatAction::Submit,
        KeyCode::Backspace if ctrl || alt => ChatAction::Edit(*key),
        KeyCode::Backspace => ChatAction::Backspace,
        KeyCode::Tab => ChatAction::NextModel,
        KeyCode::BackTab => ChatAction::PreviousModel,
        KeyCode::Up => ChatAction::ScrollUp(ScrollAmount::Line),
        KeyCode::Down => ChatAction::ScrollDown(ScrollAmount::Line),
        KeyCode::PageUp => ChatAction::ScrollUp(ScrollAmount::Page),
        KeyCode::PageDown => ChatAction::ScrollDown(ScrollAmount::Page),
        KeyCode::End if ctrl => ChatAction::ScrollToBottom,
        KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End | KeyCode::Delete => {
            ChatAction::Edit(*key)
        }
        _ => ChatAction::Ignore,
    }
}
