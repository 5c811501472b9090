//! FAQ Builder CLI - Terminal-based FAQ document editor

mod config;
mod io;
mod ui;

use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use faq_core::{App, Command, Key};
use io::FileStorage;

/// Build FAQ documents and export them as embeddable HTML
#[derive(Debug, Parser)]
#[command(name = "faq", version, about)]
struct Cli {
    /// JSON document to open on startup
    file: Option<PathBuf>,

    /// Config file (defaults to ~/.faq-builder/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding saved documents
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Directory downloads are written to
    #[arg(long)]
    download_dir: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// error, warn, info, debug, trace or off
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply_to(self, config: &mut Config) {
        if let Some(dir) = self.storage_dir {
            config.storage_dir = dir;
        }
        if let Some(dir) = self.download_dir {
            config.download_dir = dir;
        }
        if let Some(file) = self.log_file {
            config.log_file = file;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let config_path = cli.config.take().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    let file_path = cli.file.take();
    cli.apply_to(&mut config);

    init_logging(&config.log_file, &config.log_level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting faq");

    let mut storage = FileStorage::new(&config.storage_dir);
    let mut app = App::new();

    // Open file if provided
    if let Some(path) = file_path {
        let path = path.to_string_lossy().to_string();
        upload_file(&mut app, &path);
    } else {
        app.set_status("Press 'n' to add a subject, '?' for help");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, &mut storage, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        tracing::error!(error = %e, "event loop failed");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Send tracing output to a log file; the terminal belongs to the UI
fn init_logging(log_file: &Path, level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level: {}", level))?;

    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(level)
        .init();

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    storage: &mut FileStorage,
    config: &Config,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(key) = map_key(key.code, key.modifiers) else {
                continue;
            };
            if let Some(command) = app.handle_key(key) {
                run_command(app, storage, config, command);
            }
        }
    }
    Ok(())
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => Key::Newline,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char('j') if modifiers.contains(KeyModifiers::CONTROL) => Key::Newline,
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

fn run_command(app: &mut App, storage: &mut FileStorage, config: &Config, command: Command) {
    match command {
        Command::Save => {
            app.save_to(storage);
        }
        Command::Load => {
            app.load_from(storage);
        }
        Command::Download => {
            if let Some(json) = app.download_json() {
                match io::download_json(&config.download_dir, &json) {
                    Ok(path) => app.download_finished(&path.display().to_string()),
                    Err(e) => {
                        tracing::error!(error = %e, "error downloading file");
                        app.set_status(&format!("Download failed: {}", e));
                    }
                }
            }
        }
        Command::Upload => app.begin_upload_prompt(),
        Command::UploadFile(path) => upload_file(app, &path),
        Command::CopyHtml => match io::copy_to_clipboard(&app.html_output()) {
            Ok(()) => app.set_status("Copied HTML"),
            Err(e) => {
                tracing::error!(error = %e, "error copying html");
                app.set_status(&format!("Copy failed: {}", e));
            }
        },
    }
}

fn upload_file(app: &mut App, path: &str) {
    match io::read_upload(path) {
        Ok(content) => {
            if app.upload_json(&content) {
                app.set_status(&format!("Loaded {}", path));
            }
        }
        Err(e) => {
            tracing::error!(error = %e, path, "error reading upload");
            app.set_status(&format!("Error: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_enter_is_newline() {
        assert_eq!(map_key(KeyCode::Enter, KeyModifiers::ALT), Some(Key::Newline));
        assert_eq!(map_key(KeyCode::Enter, KeyModifiers::NONE), Some(Key::Enter));
        assert_eq!(map_key(KeyCode::F(1), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::parse_from(["faq", "--download-dir", "/tmp/out", "--log-level", "debug"]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_commands_against_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage_dir: dir.path().join("storage"),
            download_dir: dir.path().join("downloads"),
            ..Config::default()
        };
        let mut storage = FileStorage::new(&config.storage_dir);

        let mut app = App::new();
        app.add_subject();
        app.add_subject();
        run_command(&mut app, &mut storage, &config, Command::Save);
        run_command(&mut app, &mut storage, &config, Command::Download);

        let downloaded = config.download_dir.join("faq-data.json");
        assert!(downloaded.exists());

        let mut other = App::new();
        run_command(&mut other, &mut storage, &config, Command::Load);
        assert_eq!(other.document.len(), 2);

        let mut third = App::new();
        let path = downloaded.to_string_lossy().to_string();
        run_command(&mut third, &mut storage, &config, Command::UploadFile(path));
        assert_eq!(third.document.subjects(), app.document.subjects());
    }
}
