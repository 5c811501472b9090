//! Key dispatch shared by the terminal and browser front ends.

use crate::app::{App, Focus, Mode, OutputView};

/// Platform-neutral key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    /// Line break inside a multi-line field (Alt+Enter)
    Newline,
    Backspace,
    Esc,
    Tab,
    Up,
    Down,
}

/// Work the platform has to carry out on behalf of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save,
    Load,
    Download,
    /// Ask the user for a file to upload
    Upload,
    UploadFile(String),
    CopyHtml,
}

pub fn handle_key(app: &mut App, key: Key) -> Option<Command> {
    // Clear status on any key
    app.clear_status();

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Input => handle_input_mode(app, key),
        Mode::Help => {
            app.mode = Mode::Normal;
            None
        }
    }
}

fn handle_normal_mode(app: &mut App, key: Key) -> Option<Command> {
    match key {
        Key::Char('q') => app.running = false,
        Key::Char('?') => app.mode = Mode::Help,

        // Navigation
        Key::Char('j') | Key::Down => app.move_down(),
        Key::Char('k') | Key::Up => app.move_up(),
        Key::Tab => app.toggle_focus(),

        // Output pane
        Key::Char('c') => app.toggle_output(),
        Key::Enter | Key::Char(' ')
            if app.focus == Focus::Output && app.output == OutputView::Preview =>
        {
            app.toggle_selected_question()
        }

        // Structure
        Key::Char('n') => app.add_subject(),
        Key::Char('a') => app.add_question(),
        Key::Char('p') => app.add_paragraph(),
        Key::Char('d') if app.focus == Focus::Editor => {
            app.delete_selected();
        }
        Key::Enter | Key::Char('i') if app.focus == Focus::Editor => app.begin_edit(),

        // Persistence
        Key::Char('s') => return Some(Command::Save),
        Key::Char('l') => return Some(Command::Load),
        Key::Char('w') => return Some(Command::Download),
        Key::Char('o') => return Some(Command::Upload),
        Key::Char('y') => return Some(Command::CopyHtml),

        _ => {}
    }
    None
}

fn handle_input_mode(app: &mut App, key: Key) -> Option<Command> {
    match key {
        Key::Esc => app.cancel_input(),
        Key::Enter => return app.commit_input(),
        Key::Newline => app.input_buffer.push('\n'),
        Key::Backspace => {
            app.input_buffer.pop();
        }
        Key::Char(c) => app.input_buffer.push(c),
        _ => {}
    }
    None
}
