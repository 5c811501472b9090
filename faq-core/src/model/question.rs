use serde::{Deserialize, Serialize};

/// A question with its ordered answer paragraphs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub paragraphs: Vec<String>,
}

impl Question {
    /// Create an empty question with a single blank paragraph slot
    pub fn new(id: i64) -> Self {
        Self {
            id,
            text: String::new(),
            paragraphs: vec![String::new()],
        }
    }

    /// Whether the paragraph at `index` may be deleted
    pub fn can_remove_paragraph(&self, index: usize) -> bool {
        self.paragraphs.len() > 1 && index < self.paragraphs.len()
    }
}
