use crate::actions::{self, Command, Key};
use crate::document::Document;
use crate::editor::{self, Edit, Field};
use crate::export;
use crate::persist::{self, Storage, DOWNLOAD_FILENAME};
use crate::preview::{self, Preview, PreviewState};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    Help,
}

/// Focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Output,
}

/// What the output pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputView {
    Preview,
    Html,
}

/// Input target for text input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Field(Field),
    UploadPath,
}

/// Platform-agnostic application state
pub struct App {
    pub document: Document,
    pub preview: PreviewState,
    pub mode: Mode,
    pub focus: Focus,
    pub output: OutputView,
    pub running: bool,

    // Cursor state per pane
    pub field_selected: usize,
    pub preview_selected: usize,
    pub html_scroll: usize,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            preview: PreviewState::new(),
            mode: Mode::Normal,
            focus: Focus::Editor,
            output: OutputView::Preview,
            running: true,

            field_selected: 0,
            preview_selected: 0,
            html_scroll: 0,

            input_buffer: String::new(),
            input_target: InputTarget::UploadPath,

            status_message: None,
        }
    }

    /// Dispatch a key press; returns a command for the platform to run
    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        actions::handle_key(self, key)
    }

    /// Editable fields in display order
    pub fn fields(&self) -> Vec<Field> {
        editor::fields(self.document.subjects())
    }

    pub fn selected_field(&self) -> Option<Field> {
        self.fields().get(self.field_selected).copied()
    }

    fn select_field(&mut self, field: Field) {
        if let Some(pos) = self.fields().iter().position(|f| *f == field) {
            self.field_selected = pos;
        }
    }

    fn clamp_selection(&mut self) {
        let fields = self.fields().len();
        self.field_selected = self.field_selected.min(fields.saturating_sub(1));

        let toggles = preview::toggleable_questions(self.document.subjects()).len();
        self.preview_selected = self.preview_selected.min(toggles.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        match (self.focus, self.output) {
            (Focus::Editor, _) => self.field_selected = self.field_selected.saturating_sub(1),
            (Focus::Output, OutputView::Preview) => {
                self.preview_selected = self.preview_selected.saturating_sub(1)
            }
            (Focus::Output, OutputView::Html) => self.html_scroll = self.html_scroll.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match (self.focus, self.output) {
            (Focus::Editor, _) => {
                if self.field_selected + 1 < self.fields().len() {
                    self.field_selected += 1;
                }
            }
            (Focus::Output, OutputView::Preview) => {
                let count = preview::toggleable_questions(self.document.subjects()).len();
                if self.preview_selected + 1 < count {
                    self.preview_selected += 1;
                }
            }
            (Focus::Output, OutputView::Html) => {
                let lines = self.html_output().lines().count();
                if self.html_scroll + 1 < lines {
                    self.html_scroll += 1;
                }
            }
        }
    }

    /// Run an edit against one subject and store the resulting value
    pub fn apply_edit(&mut self, subject_id: i64, edit: Edit) -> bool {
        let Some(subject) = self.document.subject(subject_id) else {
            return false;
        };
        match editor::apply(subject, edit) {
            Some(updated) => self.document.update_subject(updated),
            None => false,
        }
    }

    pub fn add_subject(&mut self) {
        let subject_id = self.document.add_subject();
        self.select_field(Field::SubjectTitle { subject_id });
        self.set_status("Subject added");
    }

    /// Append a question to the subject under the cursor
    pub fn add_question(&mut self) {
        let Some(subject_id) = self.selected_field().map(|f| f.subject_id()) else {
            self.set_status("Add a subject first");
            return;
        };

        let question_id = self.document.next_id();
        if self.apply_edit(subject_id, Edit::AddQuestion { id: question_id }) {
            self.select_field(Field::QuestionText {
                subject_id,
                question_id,
            });
            self.set_status("Question added");
        }
    }

    /// Append a paragraph to the question under the cursor
    pub fn add_paragraph(&mut self) {
        let Some(field) = self.selected_field() else {
            self.set_status("Add a subject first");
            return;
        };
        let Some(question_id) = field.question_id() else {
            self.set_status("Select a question first");
            return;
        };

        let subject_id = field.subject_id();
        if self.apply_edit(subject_id, Edit::AddParagraph { question_id }) {
            let index = self
                .document
                .subject(subject_id)
                .and_then(|s| s.question(question_id))
                .map(|q| q.paragraphs.len().saturating_sub(1))
                .unwrap_or(0);
            self.select_field(Field::Paragraph {
                subject_id,
                question_id,
                index,
            });
            self.set_status("Paragraph added");
        }
    }

    /// Delete whatever node the cursor is on
    pub fn delete_selected(&mut self) -> bool {
        let Some(field) = self.selected_field() else {
            return false;
        };

        let deleted = match field {
            Field::SubjectTitle { subject_id } => {
                let removed = self.document.remove_subject(subject_id).is_some();
                if removed {
                    self.set_status("Subject deleted");
                }
                removed
            }
            Field::QuestionText {
                subject_id,
                question_id,
            } => {
                let removed = self.apply_edit(subject_id, Edit::RemoveQuestion { question_id });
                if removed {
                    self.set_status("Question deleted");
                }
                removed
            }
            Field::Paragraph {
                subject_id,
                question_id,
                index,
            } => {
                let removed =
                    self.apply_edit(subject_id, Edit::RemoveParagraph { question_id, index });
                if removed {
                    self.set_status("Paragraph deleted");
                } else {
                    self.set_status("A question needs at least one paragraph");
                }
                removed
            }
        };

        self.clamp_selection();
        deleted
    }

    /// Start editing the field under the cursor
    pub fn begin_edit(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        self.input_buffer = field
            .value(self.document.subjects())
            .unwrap_or_default()
            .to_string();
        self.input_target = InputTarget::Field(field);
        self.mode = Mode::Input;
    }

    /// Prompt for a path to upload from
    pub fn begin_upload_prompt(&mut self) {
        self.input_buffer.clear();
        self.input_target = InputTarget::UploadPath;
        self.mode = Mode::Input;
    }

    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.mode = Mode::Normal;
    }

    /// Finish text input
    pub fn commit_input(&mut self) -> Option<Command> {
        let text = std::mem::take(&mut self.input_buffer);
        self.mode = Mode::Normal;

        match self.input_target {
            InputTarget::Field(field) => {
                self.apply_edit(field.subject_id(), field.set(text));
                self.clamp_selection();
                None
            }
            InputTarget::UploadPath => {
                let path = text.trim().to_string();
                if path.is_empty() {
                    None
                } else {
                    Some(Command::UploadFile(path))
                }
            }
        }
    }

    /// Question ids that can be toggled in the preview, in display order
    pub fn toggleable_questions(&self) -> Vec<i64> {
        preview::toggleable_questions(self.document.subjects())
    }

    /// Id of the question under the preview cursor
    pub fn selected_preview_question(&self) -> Option<i64> {
        self.toggleable_questions().get(self.preview_selected).copied()
    }

    pub fn toggle_selected_question(&mut self) {
        if let Some(id) = self.selected_preview_question() {
            self.preview.toggle(id);
        }
    }

    pub fn toggle_output(&mut self) {
        self.output = match self.output {
            OutputView::Preview => OutputView::Html,
            OutputView::Html => OutputView::Preview,
        };
        self.html_scroll = 0;
    }

    /// Toggle focus between editor and output pane
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::Output,
            Focus::Output => Focus::Editor,
        };
    }

    pub fn preview(&self) -> Preview {
        preview::render(self.document.subjects(), &self.preview)
    }

    pub fn html_output(&self) -> String {
        export::to_html(self.document.subjects())
    }

    /// Save the document to storage; failures leave storage untouched
    pub fn save_to(&mut self, storage: &mut dyn Storage) -> bool {
        match persist::save(storage, self.document.subjects()) {
            Ok(()) => {
                tracing::info!(subjects = self.document.len(), "saved document to storage");
                self.set_status("Saved to storage");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error saving data");
                self.set_status(&format!("Save failed: {}", e));
                false
            }
        }
    }

    /// Replace the document with the stored one, if any
    pub fn load_from(&mut self, storage: &dyn Storage) -> bool {
        match persist::load(storage) {
            Ok(Some(subjects)) => {
                tracing::info!(subjects = subjects.len(), "loaded document from storage");
                self.replace_document(subjects);
                self.set_status("Loaded from storage");
                true
            }
            Ok(None) => {
                self.set_status("Nothing saved yet");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading data");
                self.set_status(&format!("Load failed: {}", e));
                false
            }
        }
    }

    /// Pretty JSON for a download, or `None` after logging the failure
    pub fn download_json(&mut self) -> Option<String> {
        match persist::to_json_pretty(self.document.subjects()) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!(error = %e, "error downloading file");
                self.set_status(&format!("Download failed: {}", e));
                None
            }
        }
    }

    pub fn download_finished(&mut self, location: &str) {
        tracing::info!(location, "downloaded {}", DOWNLOAD_FILENAME);
        self.set_status(&format!("Downloaded {}", location));
    }

    /// Replace the document with the contents of an uploaded file
    pub fn upload_json(&mut self, content: &str) -> bool {
        match persist::from_json(content) {
            Ok(subjects) => {
                tracing::info!(subjects = subjects.len(), "uploaded document");
                self.replace_document(subjects);
                self.set_status("Uploaded document");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error parsing file");
                self.set_status(&format!("Upload failed: {}", e));
                false
            }
        }
    }

    fn replace_document(&mut self, subjects: Vec<crate::model::Subject>) {
        self.document.replace(subjects);
        self.field_selected = 0;
        self.preview_selected = 0;
        self.html_scroll = 0;
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Get title for display
    pub fn title(&self) -> String {
        let questions: usize = self
            .document
            .subjects()
            .iter()
            .map(|s| s.questions.len())
            .sum();
        format!("{} subjects, {} questions", self.document.len(), questions)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryStorage, STORAGE_KEY};

    #[test]
    fn test_add_tree_through_app() {
        let mut app = App::new();
        app.add_question();
        assert_eq!(app.status_message.as_deref(), Some("Add a subject first"));

        app.add_subject();
        app.add_question();
        app.add_paragraph();

        let subject = &app.document.subjects()[0];
        assert_eq!(subject.questions.len(), 1);
        assert_eq!(subject.questions[0].paragraphs.len(), 2);
        assert!(matches!(
            app.selected_field(),
            Some(Field::Paragraph { index: 1, .. })
        ));
    }

    #[test]
    fn test_add_paragraph_needs_a_question() {
        let mut app = App::new();
        app.add_subject();
        app.add_paragraph();
        assert_eq!(app.status_message.as_deref(), Some("Select a question first"));
    }

    #[test]
    fn test_edit_field_round_trip() {
        let mut app = App::new();
        app.add_subject();
        app.begin_edit();
        assert_eq!(app.mode, Mode::Input);

        app.input_buffer.push_str("Billing");
        assert!(app.commit_input().is_none());
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.document.subjects()[0].title, "Billing");
    }

    #[test]
    fn test_clearing_question_text_clamps_preview_cursor() {
        let mut app = App::new();
        app.add_subject();
        for text in ["First?", "Second?"] {
            app.add_question();
            app.begin_edit();
            app.input_buffer.push_str(text);
            app.commit_input();
        }
        app.preview_selected = 1;
        let first = app.document.subjects()[0].questions[0].id;

        // Second question is still under the editor cursor
        app.begin_edit();
        app.input_buffer.clear();
        app.commit_input();

        assert_eq!(app.toggleable_questions(), vec![first]);
        assert_eq!(app.preview_selected, 0);
        app.toggle_selected_question();
        assert!(app.preview.is_expanded(first));
    }

    #[test]
    fn test_delete_last_paragraph_is_refused() {
        let mut app = App::new();
        app.add_subject();
        app.add_question();
        app.move_down();
        assert!(matches!(app.selected_field(), Some(Field::Paragraph { .. })));

        assert!(!app.delete_selected());
        assert_eq!(app.document.subjects()[0].questions[0].paragraphs.len(), 1);
        assert_eq!(
            app.status_message.as_deref(),
            Some("A question needs at least one paragraph")
        );
    }

    #[test]
    fn test_delete_subject_clamps_cursor() {
        let mut app = App::new();
        app.add_subject();
        app.add_subject();
        assert_eq!(app.field_selected, 1);

        assert!(app.delete_selected());
        assert_eq!(app.document.len(), 1);
        assert_eq!(app.field_selected, 0);
    }

    #[test]
    fn test_load_invalid_storage_keeps_document() {
        let mut app = App::new();
        app.add_subject();
        app.add_subject();

        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "not json").unwrap();

        assert!(!app.load_from(&storage));
        assert_eq!(app.document.len(), 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut app = App::new();
        app.add_subject();
        app.begin_edit();
        app.input_buffer.push_str("Shipping");
        app.commit_input();

        let mut storage = MemoryStorage::new();
        assert!(app.save_to(&mut storage));

        let mut other = App::new();
        assert!(other.load_from(&storage));
        assert_eq!(other.document.subjects(), app.document.subjects());
    }

    #[test]
    fn test_preview_toggle_follows_cursor() {
        let mut app = App::new();
        app.add_subject();
        app.add_question();
        app.begin_edit();
        app.input_buffer.push_str("Why?");
        app.commit_input();

        app.toggle_focus();
        app.toggle_selected_question();
        let id = app.document.subjects()[0].questions[0].id;
        assert!(app.preview.is_expanded(id));
    }

    #[test]
    fn test_upload_prompt_yields_command() {
        let mut app = App::new();
        app.begin_upload_prompt();
        app.input_buffer.push_str(" faq.json ");
        assert_eq!(
            app.commit_input(),
            Some(Command::UploadFile("faq.json".to_string()))
        );
    }
}
