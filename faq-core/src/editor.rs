//! Edit operations for the subject/question/paragraph form.
//!
//! Every edit takes the current subject and produces a new subject value with
//! the edited node replaced and its siblings copied over. The caller hands the
//! result to [`Document::update_subject`](crate::Document::update_subject);
//! there is no field-level update path.

use crate::model::{Question, Subject};

/// A single change to one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SetTitle(String),
    AddQuestion { id: i64 },
    RemoveQuestion { question_id: i64 },
    SetQuestionText { question_id: i64, text: String },
    AddParagraph { question_id: i64 },
    RemoveParagraph { question_id: i64, index: usize },
    SetParagraph { question_id: i64, index: usize, text: String },
}

/// One editable control in the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SubjectTitle {
        subject_id: i64,
    },
    QuestionText {
        subject_id: i64,
        question_id: i64,
    },
    Paragraph {
        subject_id: i64,
        question_id: i64,
        index: usize,
    },
}

impl Field {
    pub fn subject_id(&self) -> i64 {
        match *self {
            Field::SubjectTitle { subject_id }
            | Field::QuestionText { subject_id, .. }
            | Field::Paragraph { subject_id, .. } => subject_id,
        }
    }

    pub fn question_id(&self) -> Option<i64> {
        match *self {
            Field::SubjectTitle { .. } => None,
            Field::QuestionText { question_id, .. } | Field::Paragraph { question_id, .. } => {
                Some(question_id)
            }
        }
    }

    /// Current text of this field, if it still exists
    pub fn value<'a>(&self, subjects: &'a [Subject]) -> Option<&'a str> {
        let subject = subjects.iter().find(|s| s.id == self.subject_id())?;
        match *self {
            Field::SubjectTitle { .. } => Some(subject.title.as_str()),
            Field::QuestionText { question_id, .. } => {
                subject.question(question_id).map(|q| q.text.as_str())
            }
            Field::Paragraph {
                question_id, index, ..
            } => subject
                .question(question_id)
                .and_then(|q| q.paragraphs.get(index))
                .map(String::as_str),
        }
    }

    /// The edit that stores `text` into this field
    pub fn set(&self, text: String) -> Edit {
        match *self {
            Field::SubjectTitle { .. } => Edit::SetTitle(text),
            Field::QuestionText { question_id, .. } => Edit::SetQuestionText { question_id, text },
            Field::Paragraph {
                question_id, index, ..
            } => Edit::SetParagraph {
                question_id,
                index,
                text,
            },
        }
    }
}

/// Flatten the document into its editable fields, in display order
pub fn fields(subjects: &[Subject]) -> Vec<Field> {
    let mut out = Vec::new();
    for subject in subjects {
        out.push(Field::SubjectTitle {
            subject_id: subject.id,
        });
        for question in &subject.questions {
            out.push(Field::QuestionText {
                subject_id: subject.id,
                question_id: question.id,
            });
            for index in 0..question.paragraphs.len() {
                out.push(Field::Paragraph {
                    subject_id: subject.id,
                    question_id: question.id,
                    index,
                });
            }
        }
    }
    out
}

/// Apply an edit, returning the new subject or `None` when nothing changes
pub fn apply(subject: &Subject, edit: Edit) -> Option<Subject> {
    match edit {
        Edit::SetTitle(title) => Some(Subject {
            title,
            ..subject.clone()
        }),
        Edit::AddQuestion { id } => {
            let mut questions = subject.questions.clone();
            questions.push(Question::new(id));
            Some(Subject {
                questions,
                ..subject.clone()
            })
        }
        Edit::RemoveQuestion { question_id } => {
            subject.question(question_id)?;
            let questions = subject
                .questions
                .iter()
                .filter(|q| q.id != question_id)
                .cloned()
                .collect();
            Some(Subject {
                questions,
                ..subject.clone()
            })
        }
        Edit::SetQuestionText { question_id, text } => {
            replace_question(subject, question_id, |q| Some(Question { text, ..q.clone() }))
        }
        Edit::AddParagraph { question_id } => replace_question(subject, question_id, |q| {
            let mut paragraphs = q.paragraphs.clone();
            paragraphs.push(String::new());
            Some(Question {
                paragraphs,
                ..q.clone()
            })
        }),
        Edit::RemoveParagraph { question_id, index } => {
            replace_question(subject, question_id, |q| {
                if !q.can_remove_paragraph(index) {
                    tracing::warn!(question_id, index, "refusing to remove paragraph");
                    return None;
                }
                let paragraphs = q
                    .paragraphs
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, p)| p.clone())
                    .collect();
                Some(Question {
                    paragraphs,
                    ..q.clone()
                })
            })
        }
        Edit::SetParagraph {
            question_id,
            index,
            text,
        } => replace_question(subject, question_id, |q| {
            if index >= q.paragraphs.len() {
                return None;
            }
            let mut paragraphs = q.paragraphs.clone();
            paragraphs[index] = text;
            Some(Question {
                paragraphs,
                ..q.clone()
            })
        }),
    }
}

fn replace_question<F>(subject: &Subject, question_id: i64, f: F) -> Option<Subject>
where
    F: FnOnce(&Question) -> Option<Question>,
{
    let pos = subject.questions.iter().position(|q| q.id == question_id)?;
    let updated = f(&subject.questions[pos])?;

    let mut questions = subject.questions.clone();
    questions[pos] = updated;
    Some(Subject {
        questions,
        ..subject.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Subject {
        let mut subject = Subject::new(1);
        subject.title = "Billing".to_string();
        subject.questions.push(Question {
            id: 10,
            text: "How do I pay?".to_string(),
            paragraphs: vec!["Use card".to_string(), "Use bank transfer".to_string()],
        });
        subject.questions.push(Question {
            id: 11,
            text: "Refunds?".to_string(),
            paragraphs: vec!["Within 30 days".to_string()],
        });
        subject
    }

    #[test]
    fn test_set_title_keeps_questions() {
        let subject = sample();
        let updated = apply(&subject, Edit::SetTitle("Payments".to_string())).unwrap();
        assert_eq!(updated.title, "Payments");
        assert_eq!(updated.questions, subject.questions);
        assert_eq!(updated.id, subject.id);
    }

    #[test]
    fn test_add_question_appends_with_blank_paragraph() {
        let updated = apply(&sample(), Edit::AddQuestion { id: 12 }).unwrap();
        assert_eq!(updated.questions.len(), 3);
        let added = &updated.questions[2];
        assert_eq!(added.id, 12);
        assert_eq!(added.paragraphs, vec![String::new()]);
        assert_eq!(updated.ordinal(12), Some(3));
    }

    #[test]
    fn test_remove_question() {
        let updated = apply(&sample(), Edit::RemoveQuestion { question_id: 10 }).unwrap();
        assert_eq!(updated.questions.len(), 1);
        assert_eq!(updated.questions[0].id, 11);
        assert_eq!(updated.ordinal(11), Some(1));

        assert!(apply(&sample(), Edit::RemoveQuestion { question_id: 99 }).is_none());
    }

    #[test]
    fn test_set_question_text_leaves_siblings_untouched() {
        let subject = sample();
        let updated = apply(
            &subject,
            Edit::SetQuestionText {
                question_id: 11,
                text: "Can I get a refund?".to_string(),
            },
        )
        .unwrap();
        assert_eq!(updated.questions[0], subject.questions[0]);
        assert_eq!(updated.questions[1].text, "Can I get a refund?");
        assert_eq!(updated.questions[1].paragraphs, subject.questions[1].paragraphs);
    }

    #[test]
    fn test_paragraph_edits() {
        let subject = sample();
        let added = apply(&subject, Edit::AddParagraph { question_id: 11 }).unwrap();
        assert_eq!(added.questions[1].paragraphs.len(), 2);
        assert_eq!(added.questions[1].paragraphs[1], "");

        let set = apply(
            &added,
            Edit::SetParagraph {
                question_id: 11,
                index: 1,
                text: "Contact support".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            set.questions[1].paragraphs,
            vec!["Within 30 days".to_string(), "Contact support".to_string()]
        );

        let removed = apply(
            &set,
            Edit::RemoveParagraph {
                question_id: 11,
                index: 0,
            },
        )
        .unwrap();
        assert_eq!(removed.questions[1].paragraphs, vec!["Contact support".to_string()]);
    }

    #[test]
    fn test_last_paragraph_removal_is_rejected() {
        let subject = sample();
        let result = apply(
            &subject,
            Edit::RemoveParagraph {
                question_id: 11,
                index: 0,
            },
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_out_of_range_paragraph_is_noop() {
        let subject = sample();
        let result = apply(
            &subject,
            Edit::SetParagraph {
                question_id: 10,
                index: 5,
                text: "x".to_string(),
            },
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_fields_follow_display_order() {
        let subject = sample();
        let fields = fields(std::slice::from_ref(&subject));
        assert_eq!(fields.len(), 1 + 1 + 2 + 1 + 1);
        assert_eq!(fields[0], Field::SubjectTitle { subject_id: 1 });
        assert_eq!(
            fields[1],
            Field::QuestionText {
                subject_id: 1,
                question_id: 10
            }
        );
        assert_eq!(
            fields[3],
            Field::Paragraph {
                subject_id: 1,
                question_id: 10,
                index: 1
            }
        );
        assert_eq!(fields[3].value(std::slice::from_ref(&subject)), Some("Use bank transfer"));
    }

    #[test]
    fn test_field_set_round_trips_through_apply() {
        let subject = sample();
        let field = Field::QuestionText {
            subject_id: 1,
            question_id: 10,
        };
        let updated = apply(&subject, field.set("Payment methods?".to_string())).unwrap();
        assert_eq!(field.value(std::slice::from_ref(&updated)), Some("Payment methods?"));
    }
}
