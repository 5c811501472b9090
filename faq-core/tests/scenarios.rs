//! End-to-end scenarios for the editor, exporter and persistence.

use faq_core::persist::{self, Storage};
use faq_core::{to_html, App, Document, MemoryStorage, Question, Subject, STORAGE_KEY};

fn billing() -> Subject {
    Subject {
        id: 1,
        title: "Billing".to_string(),
        questions: vec![Question {
            id: 2,
            text: "How do I pay?".to_string(),
            paragraphs: vec!["Use card".to_string(), "Use bank transfer".to_string()],
        }],
    }
}

fn app_with_subjects(count: usize) -> App {
    let mut app = App::new();
    for _ in 0..count {
        app.add_subject();
    }
    app
}

#[test]
fn empty_document_exports_placeholder_text() {
    let html = to_html(&[]);
    assert_eq!(html, "Add subjects and questions to generate HTML");
}

#[test]
fn billing_subject_exports_title_header_and_bullets() {
    let html = to_html(&[billing()]);

    assert_eq!(html.matches("class=\"faq-subject-title\"").count(), 1);
    assert!(html.contains("<div class=\"faq-subject-title\">Billing</div>"));

    assert_eq!(html.matches("class=\"faq-question-title\"").count(), 1);
    assert!(html.contains("<div class=\"faq-question-title\">1. How do I pay?</div>"));

    assert_eq!(html.matches("class=\"faq-paragraph\"").count(), 2);
    let card = html.find("<div class=\"faq-text\">Use card</div>").unwrap();
    let bank = html.find("<div class=\"faq-text\">Use bank transfer</div>").unwrap();
    assert!(card < bank);
}

#[test]
fn export_is_repeatable() {
    let subjects = vec![billing(), Subject::new(3)];
    assert_eq!(to_html(&subjects), to_html(&subjects));
}

#[test]
fn invalid_storage_value_leaves_document_alone() {
    let mut app = app_with_subjects(2);
    let mut storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "{\"broken\": ").unwrap();

    app.load_from(&storage);

    assert_eq!(app.document.len(), 2);
}

#[test]
fn uploaded_file_replaces_document() {
    let uploaded = vec![billing(), Subject::new(10), Subject::new(20)];
    let json = persist::to_json_pretty(&uploaded).unwrap();

    for prior in [0, 1, 5] {
        let mut app = app_with_subjects(prior);
        assert!(app.upload_json(&json));
        assert_eq!(app.document.subjects(), uploaded.as_slice());
    }
}

#[test]
fn malformed_upload_leaves_document_alone() {
    let mut app = app_with_subjects(2);
    assert!(!app.upload_json("[{\"id\": 1,"));
    assert_eq!(app.document.len(), 2);
}

#[test]
fn json_round_trip_preserves_document() {
    let subjects = vec![billing(), Subject::new(9)];
    let json = persist::to_json(&subjects).unwrap();
    assert_eq!(persist::from_json(&json).unwrap(), subjects);
}

#[test]
fn new_ids_never_collide_with_uploaded_ones() {
    let mut doc = Document::from_subjects(vec![billing()]);
    let added = doc.add_subject();
    assert!(added > 2);
    assert_eq!(doc.subjects().last().map(|s| s.id), Some(added));
}
