use crate::model::{IdGenerator, Subject};

/// The FAQ being edited: an ordered list of subjects
#[derive(Debug, Clone, Default)]
pub struct Document {
    subjects: Vec<Subject>,
    ids: IdGenerator,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from already existing subjects (e.g. a parsed file)
    pub fn from_subjects(subjects: Vec<Subject>) -> Self {
        let mut doc = Self::new();
        doc.replace(subjects);
        doc
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: i64) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Issue a fresh id for a new subject or question
    pub fn next_id(&mut self) -> i64 {
        self.ids.next_id()
    }

    /// Append an empty subject and return its id
    pub fn add_subject(&mut self) -> i64 {
        let id = self.next_id();
        self.subjects.push(Subject::new(id));
        id
    }

    pub fn remove_subject(&mut self, id: i64) -> Option<Subject> {
        let pos = self.subjects.iter().position(|s| s.id == id)?;
        Some(self.subjects.remove(pos))
    }

    /// Swap in a new value for the subject with the same id
    pub fn update_subject(&mut self, subject: Subject) -> bool {
        match self.subjects.iter_mut().find(|s| s.id == subject.id) {
            Some(slot) => {
                *slot = subject;
                true
            }
            None => false,
        }
    }

    /// Replace the whole document in one step
    pub fn replace(&mut self, subjects: Vec<Subject>) {
        for subject in &subjects {
            self.ids.observe(subject.max_id());
        }
        self.subjects = subjects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    #[test]
    fn test_add_subject_appends_blank_subject() {
        let mut doc = Document::new();
        let first = doc.add_subject();
        let second = doc.add_subject();

        assert_eq!(doc.len(), 2);
        assert_ne!(first, second);
        assert_eq!(doc.subjects()[1].id, second);
        assert!(doc.subjects()[1].title.is_empty());
        assert!(doc.subjects()[1].questions.is_empty());
    }

    #[test]
    fn test_remove_subject() {
        let mut doc = Document::new();
        let a = doc.add_subject();
        let b = doc.add_subject();

        let removed = doc.remove_subject(a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.subjects()[0].id, b);

        assert!(doc.remove_subject(a).is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_update_subject_replaces_only_matching_id() {
        let mut doc = Document::new();
        let a = doc.add_subject();
        let b = doc.add_subject();

        let mut edited = doc.subject(b).unwrap().clone();
        edited.title = "Shipping".to_string();
        assert!(doc.update_subject(edited));

        assert_eq!(doc.subject(a).unwrap().title, "");
        assert_eq!(doc.subject(b).unwrap().title, "Shipping");
        assert_eq!(doc.subjects()[1].id, b);
    }

    #[test]
    fn test_update_unknown_subject_is_noop() {
        let mut doc = Document::new();
        doc.add_subject();
        let before = doc.subjects().to_vec();

        let mut stranger = Subject::new(-1);
        stranger.title = "nope".to_string();
        assert!(!doc.update_subject(stranger));
        assert_eq!(doc.subjects(), before.as_slice());
    }

    #[test]
    fn test_replace_never_reissues_loaded_ids() {
        let far_future = i64::MAX / 2;
        let mut subject = Subject::new(far_future - 10);
        subject.questions.push(Question::new(far_future));

        let mut doc = Document::from_subjects(vec![subject]);
        assert!(doc.next_id() > far_future);
    }
}
