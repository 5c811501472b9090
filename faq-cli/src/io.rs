//! File I/O for native CLI

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use faq_core::{PersistError, Storage, DOWNLOAD_FILENAME};

/// Key/value storage backed by one JSON file per key
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it
        let path = self.item_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Write a download into `dir` under the fixed download filename
pub fn download_json(dir: &Path, json: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(DOWNLOAD_FILENAME);
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// Read a `.json` file chosen for upload
pub fn read_upload(path: &str) -> Result<String> {
    let path = Path::new(path);
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        bail!("Only .json files can be uploaded: {}", path.display());
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// OSC 52 sequence asking the terminal to put `text` on the clipboard
pub fn clipboard_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(clipboard_sequence(text).as_bytes())
        .context("Failed to write clipboard sequence")?;
    stdout.flush()?;
    Ok(())
}
