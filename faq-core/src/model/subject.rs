use serde::{Deserialize, Serialize};

use super::Question;

/// A titled group of questions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Subject {
    pub id: i64,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Subject {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: String::new(),
            questions: Vec::new(),
        }
    }

    pub fn question(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// 1-based position of a question, as shown before its text
    pub fn ordinal(&self, question_id: i64) -> Option<usize> {
        self.questions
            .iter()
            .position(|q| q.id == question_id)
            .map(|i| i + 1)
    }

    /// Largest id used by this subject or any of its questions
    pub fn max_id(&self) -> i64 {
        self.questions
            .iter()
            .map(|q| q.id)
            .fold(self.id, i64::max)
    }
}
