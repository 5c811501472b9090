//! Read-only preview of the FAQ as a reader would see it.

use std::collections::HashMap;

use crate::model::Subject;

pub const EMPTY_PREVIEW: &str = "Add subjects and questions to see the preview";

/// Expand/collapse state for the preview, keyed by question id.
///
/// This is view state only; it is never stored in the document or persisted.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    expanded: HashMap<i64, bool>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, question_id: i64) -> bool {
        self.expanded.get(&question_id).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, question_id: i64) {
        let entry = self.expanded.entry(question_id).or_insert(false);
        *entry = !*entry;
    }
}

/// One rendered line of the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLine {
    SubjectTitle(String),
    QuestionHeader {
        question_id: i64,
        ordinal: usize,
        text: String,
        expanded: bool,
    },
    Paragraph(String),
    /// Spacing between subjects
    Gap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Empty(&'static str),
    Lines(Vec<PreviewLine>),
}

/// Render the document for reading.
///
/// Questions with empty text get no header, and so no toggle; their
/// paragraphs only show if an expand state for the id already exists.
pub fn render(subjects: &[Subject], state: &PreviewState) -> Preview {
    if subjects.is_empty() {
        return Preview::Empty(EMPTY_PREVIEW);
    }

    let mut lines = Vec::new();
    for (i, subject) in subjects.iter().enumerate() {
        if i > 0 {
            lines.push(PreviewLine::Gap);
        }
        if !subject.title.is_empty() {
            lines.push(PreviewLine::SubjectTitle(subject.title.clone()));
        }

        for (q_index, question) in subject.questions.iter().enumerate() {
            let expanded = state.is_expanded(question.id);
            if !question.text.is_empty() {
                lines.push(PreviewLine::QuestionHeader {
                    question_id: question.id,
                    ordinal: q_index + 1,
                    text: question.text.clone(),
                    expanded,
                });
            }
            if expanded {
                lines.extend(question.paragraphs.iter().cloned().map(PreviewLine::Paragraph));
            }
        }
    }

    Preview::Lines(lines)
}

/// Ids of the questions that show a toggle, in display order
pub fn toggleable_questions(subjects: &[Subject]) -> Vec<i64> {
    subjects
        .iter()
        .flat_map(|s| s.questions.iter())
        .filter(|q| !q.text.is_empty())
        .map(|q| q.id)
        .collect()
}
