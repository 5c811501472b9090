//! Self-contained HTML export of the FAQ.
//!
//! The output is meant to be pasted into a host page as-is: a `<style>` block,
//! a `<script>` block wiring up the toggle buttons, then one block per subject.
//! Titles, question texts and paragraphs are interpolated verbatim and are
//! treated as trusted markup.

use std::fmt::{self, Write};

use crate::model::{Question, Subject};

pub const EMPTY_EXPORT: &str = "Add subjects and questions to generate HTML";

const FAQ_STYLES: &str = r#"<style>
.faq-subject { margin-bottom: 2rem; }
.faq-subject-title { font-size: 1.5rem; font-weight: bold; margin-bottom: 1rem; color: #111827; }
.faq-questions { display: flex; flex-direction: column; gap: 1.5rem; }
.faq-question-header { display: flex; align-items: flex-start; gap: 0.5rem; }
.faq-question-title { font-size: 1.125rem; font-weight: 600; margin-bottom: 0.5rem; flex: 1; color: #1f2937; }
.faq-toggle { background: none; border: none; padding: 0.25rem; cursor: pointer; color: #4b5563; }
.faq-toggle:hover { background-color: #f3f4f6; border-radius: 9999px; }
.faq-answer { display: none; background-color: #f9fafb; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; margin-top: 0.5rem; }
.faq-question.expanded .faq-answer { display: block; }
.faq-question.expanded .chevron-down { transform: rotate(180deg); }
.faq-paragraphs { display: flex; flex-direction: column; gap: 0.5rem; padding-left: 1.5rem; }
.faq-paragraph { display: flex; gap: 0.5rem; align-items: flex-start; }
.bullet { color: #6b7280; }
.faq-text { color: #4b5563; font-size: 1rem; line-height: 1.5; flex: 1; }
.chevron-down { transition: transform 0.2s; }
</style>"#;

const FAQ_SCRIPT: &str = r#"<script>
document.querySelectorAll('.faq-toggle').forEach(button => {
  button.addEventListener('click', (e) => {
    e.preventDefault();
    const question = button.closest('.faq-question');
    question.classList.toggle('expanded');
  });
});
</script>"#;

const CHEVRON_SVG: &str = r#"<svg class="chevron-down" xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                  <polyline points="6 9 12 15 18 9"></polyline>
                </svg>"#;

/// Render the whole document as embeddable HTML.
///
/// Returns [`EMPTY_EXPORT`] instead of markup when there are no subjects.
pub fn to_html(subjects: &[Subject]) -> String {
    if subjects.is_empty() {
        return EMPTY_EXPORT.to_string();
    }

    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut html, subjects);
    html
}

fn write_document(out: &mut String, subjects: &[Subject]) -> fmt::Result {
    write!(out, "\n{}\n{}\n", FAQ_STYLES, FAQ_SCRIPT)?;
    for subject in subjects {
        write_subject(out, subject)?;
    }
    Ok(())
}

fn write_subject(out: &mut String, subject: &Subject) -> fmt::Result {
    write!(out, "\n<div class=\"faq-subject\">\n  ")?;
    if !subject.title.is_empty() {
        write!(out, "<div class=\"faq-subject-title\">{}</div>", subject.title)?;
    }
    write!(out, "\n  <div class=\"faq-questions\">\n    ")?;
    for (index, question) in subject.questions.iter().enumerate() {
        write_question(out, index + 1, question)?;
    }
    write!(out, "\n  </div>\n</div>")
}

fn write_question(out: &mut String, ordinal: usize, question: &Question) -> fmt::Result {
    write!(out, "\n    <div class=\"faq-question\">\n      ")?;
    if !question.text.is_empty() {
        write!(
            out,
            r#"<div class="faq-question-header">
              <div class="faq-question-title">{}. {}</div>
              <button class="faq-toggle" type="button" aria-label="Toggle answer">
                {}
              </button>
            </div>"#,
            ordinal, question.text, CHEVRON_SVG
        )?;
    }
    write!(
        out,
        "\n      <div class=\"faq-answer\">\n        <div class=\"faq-paragraphs\">\n          "
    )?;
    for paragraph in &question.paragraphs {
        write!(
            out,
            r#"
          <div class="faq-paragraph">
            <span class="bullet">•</span>
            <div class="faq-text">{}</div>
          </div>"#,
            paragraph
        )?;
    }
    write!(out, "\n        </div>\n      </div>\n    </div>")
}
