//! FAQ Builder Web - WebAssembly version of the FAQ editor
//!
//! This crate provides a browser-based version of the FAQ Builder using
//! Ratzilla for terminal rendering in the DOM.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{
    event::{KeyCode, KeyEvent},
    DomBackend, WebRenderer,
};
use wasm_bindgen::prelude::*;

use faq_core::{App, Command, Key, Mode, DOWNLOAD_FILENAME};

pub mod io;
mod logging;
mod ui;

type SharedApp = Rc<RefCell<App>>;

/// Initialize the FAQ Builder web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
    logging::init();

    let mut app = App::new();
    app.set_status("Welcome! Press 'n' to add a subject, '?' for help");

    // Wrap in Rc<RefCell> for shared state
    let app_state: SharedApp = Rc::new(RefCell::new(app));

    // Create terminal with DOM backend
    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    // Set up keyboard handler
    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let Some(key) = map_key(&event) else {
                return;
            };
            // Release the borrow before running the command
            let command = dispatch_key(&mut app_state_cloned.borrow_mut(), key);
            if let Some(command) = command {
                run_command(&app_state_cloned, command);
            }
        }
    });

    // Draw loop
    terminal.draw_web(move |frame| {
        let app = app_state.borrow();
        ui::draw(frame, &app);
    });

    tracing::info!("FAQ Builder WASM initialized");

    Ok(())
}

fn map_key(event: &KeyEvent) -> Option<Key> {
    let key = match event.code {
        KeyCode::Enter if event.alt => Key::Newline,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => return None,
    };
    Some(key)
}

/// Feed a key to the app. A browser tab cannot quit itself, so `q` only
/// reaches the app when it is being typed into a field.
fn dispatch_key(app: &mut App, key: Key) -> Option<Command> {
    if key == Key::Char('q') && app.mode == Mode::Normal {
        return None;
    }
    app.handle_key(key)
}

fn run_command(state: &SharedApp, command: Command) {
    match command {
        Command::Save => {
            state.borrow_mut().save_to(&mut io::BrowserStorage);
        }
        Command::Load => {
            state.borrow_mut().load_from(&io::BrowserStorage);
        }
        Command::Download => {
            let mut app = state.borrow_mut();
            if let Some(json) = app.download_json() {
                match io::download_json(DOWNLOAD_FILENAME, &json) {
                    Ok(()) => app.download_finished(DOWNLOAD_FILENAME),
                    Err(e) => {
                        tracing::error!(error = ?e, "error downloading file");
                        app.set_status(&format!("Download failed: {:?}", e));
                    }
                }
            }
        }
        Command::Upload | Command::UploadFile(_) => {
            let target = state.clone();
            let on_text = move |text: String| {
                target.borrow_mut().upload_json(&text);
            };
            if let Err(e) = io::pick_json_file(on_text) {
                tracing::error!(error = ?e, "error opening file picker");
                state
                    .borrow_mut()
                    .set_status(&format!("Upload failed: {:?}", e));
            }
        }
        Command::CopyHtml => {
            let html = state.borrow().html_output();
            let target = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = io::copy_to_clipboard(&html).await;
                let mut app = target.borrow_mut();
                match result {
                    Ok(()) => {
                        tracing::info!(bytes = html.len(), "copied html");
                        app.set_status("Copied HTML");
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "error copying html");
                        app.set_status(&format!("Copy failed: {:?}", e));
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) -> Option<Command> {
        let event = KeyEvent {
            code,
            ctrl: false,
            alt: false,
            shift: false,
        };
        map_key(&event).and_then(|key| dispatch_key(app, key))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_q_is_typed_in_input_mode() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "quiz");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.document.subjects()[0].title, "quiz");
        assert!(app.running);
    }

    #[test]
    fn test_q_does_not_quit_in_normal_mode() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert!(app.running);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_alt_enter_is_newline() {
        let event = KeyEvent {
            code: KeyCode::Enter,
            ctrl: false,
            alt: true,
            shift: false,
        };
        assert_eq!(map_key(&event), Some(Key::Newline));
    }
}
