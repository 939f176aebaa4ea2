//! Keyboard and mouse event handling.
//!
//! Normal mode uses Vim-style keys:
//! - `h`/`l`: move left/right, `j`/`k`: move one line down/up
//! - `0` or `Home`: first symbol, `$` or `End`: last symbol
//! - `w`/`b`: next/previous group of three
//! - `v`: visual selection, `i`: insert mode, `x`: delete
//! - `g`: toggle grouped display
//! - `n`/`N`: next/previous motif hit
//! - `o`: select the longest ORF
//! - `t`: translate the selection
//! - `?`: help
//! - `:`: enter command mode
//!   - `:q` quit, `:h` help, `:<number>` go to position
//!   - `:group`, `:ungroup`, `:toggle`
//!   - `:note <text>`, `:ann <label>`, `:clear`
//!   - `:ask <instruction>`, `:translate`, `:frame <1-3>`, `:orf`, `:info`
//!
//! Mouse drags in the sequence panel select symbols.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use crate::model::{AppMode, AppState};

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// First symbol (0 or Home)
    GotoStart,
    /// Last symbol ($ or End)
    GotoEnd,
    NextGroup,
    PreviousGroup,
    PageUp,
    PageDown,
    /// Start or end visual selection
    ToggleVisual,
    EnterInsertMode,
    InsertChar(char),
    Backspace,
    /// Delete under the cursor or the selection
    Delete,
    /// Leave the current mode or clear the selection
    Escape,
    ToggleGrouping,
    NextMotif,
    PreviousMotif,
    LongestOrf,
    Translate,
    ShowHelp,
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    ExecuteCommand,
    CancelCommand,
    CommandBackspace,
    /// Close the help or assistant overlay
    DismissOverlay,
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, overlay_open: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode, overlay_open),
        Event::Mouse(mouse_event) if !overlay_open => handle_mouse_event(mouse_event),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::MouseDown(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::MouseDrag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::MouseUp,
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, overlay_open: bool) -> Action {
    // Any key dismisses an overlay
    if overlay_open {
        return Action::DismissOverlay;
    }

    // Ctrl+C quits from every mode
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Visual { .. } => handle_visual_mode(key),
        AppMode::Insert => handle_insert_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Cursor keys shared by normal and visual mode.
fn navigation(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('0') | KeyCode::Home => Action::GotoStart,
        KeyCode::Char('$') | KeyCode::End => Action::GotoEnd,
        KeyCode::Char('w') => Action::NextGroup,
        KeyCode::Char('b') => Action::PreviousGroup,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => return None,
    };
    Some(action)
}

/// Handles key events in normal mode (Vim-style navigation).
fn handle_normal_mode(key: KeyEvent) -> Action {
    if let Some(action) = navigation(&key) {
        return action;
    }

    match key.code {
        KeyCode::Char('v') => Action::ToggleVisual,
        KeyCode::Char('i') => Action::EnterInsertMode,
        KeyCode::Char('x') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('g') => Action::ToggleGrouping,
        KeyCode::Char('n') => Action::NextMotif,
        KeyCode::Char('N') => Action::PreviousMotif,
        KeyCode::Char('o') => Action::LongestOrf,
        KeyCode::Char('t') => Action::Translate,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char(':') => Action::EnterCommandMode,
        KeyCode::Esc => Action::Escape,
        _ => Action::None,
    }
}

/// Handles key events while a selection is being extended.
fn handle_visual_mode(key: KeyEvent) -> Action {
    if let Some(action) = navigation(&key) {
        return action;
    }

    match key.code {
        KeyCode::Char('v') | KeyCode::Esc => Action::ToggleVisual,
        KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('t') => Action::Translate,
        KeyCode::Char(':') => Action::EnterCommandMode,
        _ => Action::None,
    }
}

/// True for a character typed without Ctrl, Alt or other chords.
fn is_plain(modifiers: KeyModifiers) -> bool {
    modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

/// Handles key events in insert mode.
fn handle_insert_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Escape,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Char(c) if is_plain(key.modifiers) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) if is_plain(key.modifiers) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::MoveLeft => state.move_left(),
        Action::MoveRight => state.move_right(),
        Action::GotoStart => state.goto_start(),
        Action::GotoEnd => state.goto_end(),
        Action::NextGroup => state.next_group(),
        Action::PreviousGroup => state.previous_group(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::ToggleVisual => state.toggle_visual(),
        Action::EnterInsertMode => state.enter_insert_mode(),
        Action::InsertChar(c) => state.insert_char(c),
        Action::Backspace => state.backspace(),
        Action::Delete => state.delete(),
        Action::Escape => state.escape(),
        Action::ToggleGrouping => state.toggle_display_mode(),
        Action::NextMotif => state.next_motif(),
        Action::PreviousMotif => state.previous_motif(),
        Action::LongestOrf => state.goto_longest_orf(),
        Action::Translate => state.translate_selection(),
        Action::ShowHelp => {
            state.show_help = true;
        }
        Action::EnterCommandMode => state.enter_command_mode(),
        Action::CommandChar(c) => state.command_input(c),
        Action::ExecuteCommand => state.execute_command(),
        Action::CancelCommand => state.cancel_command(),
        Action::CommandBackspace => state.command_backspace(),
        Action::DismissOverlay => state.dismiss_overlay(),
        Action::MouseDown(column, row) => state.mouse_down(column, row),
        Action::MouseDrag(column, row) => state.mouse_drag(column, row),
        Action::MouseUp => state.mouse_up(),
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::host::SummaryAssistant;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(mode: &AppMode, code: KeyCode) -> Action {
        handle_key_event(key(code), mode, false)
    }

    #[test]
    fn test_normal_mode_navigation() {
        let mode = AppMode::Normal;

        assert_eq!(press(&mode, KeyCode::Char('h')), Action::MoveLeft);
        assert_eq!(press(&mode, KeyCode::Char('j')), Action::MoveDown);
        assert_eq!(press(&mode, KeyCode::Char('k')), Action::MoveUp);
        assert_eq!(press(&mode, KeyCode::Char('l')), Action::MoveRight);
        assert_eq!(press(&mode, KeyCode::Char('w')), Action::NextGroup);
        assert_eq!(press(&mode, KeyCode::Char('b')), Action::PreviousGroup);
        assert_eq!(press(&mode, KeyCode::Home), Action::GotoStart);
        assert_eq!(press(&mode, KeyCode::Char('$')), Action::GotoEnd);
    }

    #[test]
    fn test_normal_mode_analysis_keys() {
        let mode = AppMode::Normal;
        assert_eq!(press(&mode, KeyCode::Char('g')), Action::ToggleGrouping);
        assert_eq!(press(&mode, KeyCode::Char('n')), Action::NextMotif);
        assert_eq!(press(&mode, KeyCode::Char('N')), Action::PreviousMotif);
        assert_eq!(press(&mode, KeyCode::Char('o')), Action::LongestOrf);
        assert_eq!(press(&mode, KeyCode::Char('t')), Action::Translate);
    }

    #[test]
    fn test_enter_command_mode() {
        let mode = AppMode::Normal;
        assert_eq!(press(&mode, KeyCode::Char(':')), Action::EnterCommandMode);
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());

        assert_eq!(press(&mode, KeyCode::Char('q')), Action::CommandChar('q'));
        assert_eq!(press(&mode, KeyCode::Enter), Action::ExecuteCommand);
        assert_eq!(press(&mode, KeyCode::Esc), Action::CancelCommand);
        assert_eq!(press(&mode, KeyCode::Backspace), Action::CommandBackspace);
    }

    #[test]
    fn test_insert_mode_input() {
        let mode = AppMode::Insert;

        // Letters that move in normal mode are inserted here
        assert_eq!(press(&mode, KeyCode::Char('g')), Action::InsertChar('g'));
        assert_eq!(press(&mode, KeyCode::Char('h')), Action::InsertChar('h'));
        assert_eq!(press(&mode, KeyCode::Left), Action::MoveLeft);
        assert_eq!(press(&mode, KeyCode::Backspace), Action::Backspace);
        assert_eq!(press(&mode, KeyCode::Esc), Action::Escape);
    }

    #[test]
    fn test_chords_are_not_typed() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::ALT);
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);

        let insert = AppMode::Insert;
        assert_eq!(handle_key_event(ctrl_a, &insert, false), Action::None);
        assert_eq!(handle_key_event(alt_g, &insert, false), Action::None);
        assert_eq!(handle_key_event(shift_a, &insert, false), Action::InsertChar('A'));

        let command = AppMode::Command(String::new());
        assert_eq!(handle_key_event(alt_g, &command, false), Action::None);
        assert_eq!(handle_key_event(shift_a, &command, false), Action::CommandChar('A'));

        let config = EditorConfig::default();
        let mut state = AppState::new("AT", None, config, Box::new(SummaryAssistant));
        state.enter_insert_mode();
        let action = handle_key_event(ctrl_a, &state.mode, false);
        apply_action(&mut state, action);
        assert_eq!(state.canonical(), "AT");
    }

    #[test]
    fn test_visual_mode_keys() {
        let mode = AppMode::Visual { anchor: 0 };
        assert_eq!(press(&mode, KeyCode::Char('l')), Action::MoveRight);
        assert_eq!(press(&mode, KeyCode::Char('d')), Action::Delete);
        assert_eq!(press(&mode, KeyCode::Esc), Action::ToggleVisual);
        assert_eq!(press(&mode, KeyCode::Char(':')), Action::EnterCommandMode);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &AppMode::Normal, false), Action::Quit);
        assert_eq!(handle_key_event(ctrl_c, &AppMode::Insert, false), Action::Quit);
    }

    #[test]
    fn test_dismiss_overlay() {
        let mode = AppMode::Normal;
        // Any key when an overlay is shown should dismiss it
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &mode, true), Action::DismissOverlay);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode, true), Action::DismissOverlay);
    }

    #[test]
    fn test_mouse_events() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 7,
                row: 3,
                modifiers: KeyModifiers::NONE,
            })
        };
        let mode = AppMode::Normal;

        assert_eq!(
            handle_event(mouse(MouseEventKind::Down(MouseButton::Left)), &mode, false),
            Action::MouseDown(7, 3)
        );
        assert_eq!(
            handle_event(mouse(MouseEventKind::Drag(MouseButton::Left)), &mode, false),
            Action::MouseDrag(7, 3)
        );
        assert_eq!(
            handle_event(mouse(MouseEventKind::Up(MouseButton::Left)), &mode, false),
            Action::MouseUp
        );
        assert_eq!(
            handle_event(mouse(MouseEventKind::Down(MouseButton::Right)), &mode, false),
            Action::None
        );
        // Ignored under an overlay
        assert_eq!(
            handle_event(mouse(MouseEventKind::Down(MouseButton::Left)), &mode, true),
            Action::None
        );
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            handle_event(Event::Resize(80, 24), &AppMode::Normal, false),
            Action::Resize(80, 24)
        );
    }

    #[test]
    fn test_apply_action_typing_session() {
        let mut state = AppState::new(
            "ATG",
            None,
            EditorConfig::default(),
            Box::new(SummaryAssistant),
        );
        state.update_viewport_size(5, 40);

        let press = |state: &mut AppState, code: KeyCode| {
            let action = handle_event(Event::Key(key(code)), &state.mode, state.overlay.is_some());
            apply_action(state, action)
        };

        press(&mut state, KeyCode::Char('$'));
        press(&mut state, KeyCode::Char('i'));
        press(&mut state, KeyCode::Right);
        for c in "ccc".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.canonical(), "ATGCCC");
        assert_eq!(state.mode, AppMode::Normal);

        press(&mut state, KeyCode::Char(':'));
        for c in "translate".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.overlay.as_ref().unwrap().body, "MP");

        // Next key closes the overlay without acting
        press(&mut state, KeyCode::Char('x'));
        assert!(state.overlay.is_none());
        assert_eq!(state.canonical(), "ATGCCC");

        press(&mut state, KeyCode::Char(':'));
        press(&mut state, KeyCode::Char('q'));
        assert!(!press(&mut state, KeyCode::Enter));
    }
}
