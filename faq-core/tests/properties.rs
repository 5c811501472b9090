//! Property tests for the document operations.

use proptest::prelude::*;

use faq_core::editor::{self, Edit};
use faq_core::persist::{self, from_json, to_json, to_json_pretty};
use faq_core::{to_html, MemoryStorage, Question, Subject};

fn question_strategy() -> impl Strategy<Value = Question> {
    (any::<i64>(), ".{0,20}", prop::collection::vec(".{0,20}", 1..5)).prop_map(
        |(id, text, paragraphs)| Question {
            id,
            text,
            paragraphs,
        },
    )
}

fn subject_strategy() -> impl Strategy<Value = Subject> {
    (any::<i64>(), ".{0,20}", prop::collection::vec(question_strategy(), 0..4)).prop_map(
        |(id, title, mut questions)| {
            for (i, q) in questions.iter_mut().enumerate() {
                q.id = i as i64;
            }
            Subject {
                id,
                title,
                questions,
            }
        },
    )
}

proptest! {
    #[test]
    fn export_is_pure(subjects in prop::collection::vec(subject_strategy(), 0..4)) {
        prop_assert_eq!(to_html(&subjects), to_html(&subjects));
    }

    #[test]
    fn json_round_trip(subjects in prop::collection::vec(subject_strategy(), 0..4)) {
        let json = to_json(&subjects).unwrap();
        prop_assert_eq!(from_json(&json).unwrap(), subjects);
    }

    #[test]
    fn pretty_json_round_trip(subjects in prop::collection::vec(subject_strategy(), 0..4)) {
        let json = to_json_pretty(&subjects).unwrap();
        prop_assert_eq!(from_json(&json).unwrap(), subjects);
    }

    #[test]
    fn storage_round_trip(subjects in prop::collection::vec(subject_strategy(), 0..4)) {
        let mut storage = MemoryStorage::new();
        persist::save(&mut storage, &subjects).unwrap();
        prop_assert_eq!(persist::load(&storage).unwrap(), Some(subjects));
    }

    #[test]
    fn paragraph_deletes_never_empty_a_question(
        paragraphs in 1usize..6,
        deletes in prop::collection::vec(0usize..6, 0..12),
    ) {
        let mut subject = Subject::new(1);
        subject.questions.push(Question {
            id: 2,
            text: "Q".to_string(),
            paragraphs: vec![String::new(); paragraphs],
        });

        for index in deletes {
            if let Some(updated) = editor::apply(&subject, Edit::RemoveParagraph { question_id: 2, index }) {
                subject = updated;
            }
            prop_assert!(!subject.questions[0].paragraphs.is_empty());
        }
    }

    #[test]
    fn added_questions_land_at_the_end(subject in subject_strategy()) {
        let before = subject.questions.len();
        let updated = editor::apply(&subject, Edit::AddQuestion { id: 1_000 }).unwrap();
        prop_assert_eq!(updated.questions.len(), before + 1);
        prop_assert_eq!(updated.ordinal(1_000), Some(before + 1));
        prop_assert_eq!(&updated.questions[..before], &subject.questions[..]);
    }
}
