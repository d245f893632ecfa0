use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::ui::ScreenLayout;

/// What the host asks of the app in response to raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The start button
    Start,
    /// The combined click target: start, react or false start
    Activate,
    /// The reset button
    Reset,
    ToggleHelp,
    Quit,
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char(' ') => Some(Command::Activate),
        KeyCode::Char('s') | KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('?') | KeyCode::Char('h') => Some(Command::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Left clicks map to whichever target they land on
pub fn command_for_mouse(mouse: MouseEvent, layout: &ScreenLayout) -> Option<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let at = Position::new(mouse.column, mouse.row);

    if layout.canvas.contains(at) {
        Some(Command::Activate)
    } else if layout.start_button.contains(at) {
        Some(Command::Start)
    } else if layout.reset_button.contains(at) {
        Some(Command::Reset)
    } else {
        None
    }
}
