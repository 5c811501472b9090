//! FAQ Core - Platform-agnostic FAQ document editor library
//!
//! This crate provides the document model, editing operations, preview
//! rendering, HTML export and persistence for the FAQ Builder. It's designed
//! to work both in native CLI and WASM environments.

pub mod actions;
pub mod app;
pub mod document;
pub mod editor;
pub mod export;
pub mod model;
pub mod persist;
pub mod preview;

pub use actions::{Command, Key};
pub use app::{App, Focus, InputTarget, Mode, OutputView};
pub use document::Document;
pub use editor::{Edit, Field};
pub use export::to_html;
pub use model::{IdGenerator, Question, Subject};
pub use persist::{MemoryStorage, PersistError, Storage, DOWNLOAD_FILENAME, STORAGE_KEY};
pub use preview::{Preview, PreviewLine, PreviewState};
