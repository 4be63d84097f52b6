use std::sync::Arc;

use chrono::{TimeZone, Utc};

use quiz_core::model::{Difficulty, QuestionDraft, QuestionError, QuestionId};
use services::{AdminError, MemoryGateway, QuestionAdminService, QuestionRecord};

fn draft(text: &str, category: &str) -> QuestionDraft {
    QuestionDraft {
        text: text.to_string(),
        options: vec!["a".into(), "b".into()],
        correct_answer: "a".into(),
        category: category.to_string(),
        difficulty: Difficulty::Medium,
        marks: 1,
        negative_marking: false,
        negative_marks: 0,
    }
}

fn record(id: &str, category: &str, created_day: u32) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        question_text: format!("question {id}"),
        options: vec!["a".into(), "b".into()],
        correct_answer: "a".into(),
        question_type: category.to_string(),
        difficulty: Some("Medium".to_string()),
        marks: 1,
        has_negative_marking: false,
        negative_marks: 0,
        created_at: Some(Utc.with_ymd_and_hms(2025, 6, created_day, 12, 0, 0).unwrap()),
    }
}

#[tokio::test]
async fn create_then_list_round_trips_through_the_gateway() {
    let gateway = Arc::new(MemoryGateway::new());
    let admin = QuestionAdminService::new(Arc::clone(&gateway) as _);

    admin.create(draft("2 + 2?", "Aptitude")).await.unwrap();

    let listed = admin.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text(), "2 + 2?");
    assert_eq!(gateway.records().len(), 1);
}

#[tokio::test]
async fn create_rejects_an_invalid_draft_without_calling_the_api() {
    let gateway = Arc::new(MemoryGateway::new());
    let admin = QuestionAdminService::new(Arc::clone(&gateway) as _);

    let mut bad = draft("2 + 2?", "Aptitude");
    bad.correct_answer = "nope".into();
    let err = admin.create(bad).await.unwrap_err();

    assert!(matches!(
        err,
        AdminError::Question(QuestionError::CorrectAnswerNotAnOption)
    ));
    assert!(gateway.records().is_empty());
}

#[tokio::test]
async fn list_sorts_by_category_then_newest_first() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.push_record(record("c-old", "Coding", 1));
    gateway.push_record(record("a-old", "Aptitude", 1));
    gateway.push_record(record("a-new", "Aptitude", 20));

    let admin = QuestionAdminService::new(gateway);
    let listed = admin.list().await.unwrap();

    let order: Vec<&str> = listed.iter().map(|q| q.id().as_str()).collect();
    assert_eq!(order, ["a-new", "a-old", "c-old"]);
}

#[tokio::test]
async fn update_replaces_the_stored_record() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.push_record(record("q1", "Aptitude", 1));

    let admin = QuestionAdminService::new(Arc::clone(&gateway) as _);
    admin
        .update(&QuestionId::new("q1"), draft("rewritten?", "Aptitude"))
        .await
        .unwrap();

    assert_eq!(gateway.records()[0].question_text, "rewritten?");
}

#[tokio::test]
async fn update_of_a_missing_question_surfaces_the_status() {
    let admin = QuestionAdminService::new(Arc::new(MemoryGateway::new()));
    let err = admin
        .update(&QuestionId::new("ghost"), draft("2 + 2?", "Aptitude"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Gateway(_)));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.push_record(record("q1", "Aptitude", 1));
    gateway.push_record(record("q2", "Aptitude", 2));

    let admin = QuestionAdminService::new(Arc::clone(&gateway) as _);
    admin.delete(&QuestionId::new("q1")).await.unwrap();

    let remaining = gateway.records();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "q2");
}
