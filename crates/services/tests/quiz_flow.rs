use std::sync::Arc;

use quiz_core::model::{Difficulty, QuestionId, QuizSettings, QuizType, SessionError};
use services::{MemoryGateway, QuestionRecord, QuizError, QuizService};

fn record(id: &str, category: &str, difficulty: &str) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        question_text: format!("question {id}"),
        options: vec!["a".into(), "b".into(), "c".into()],
        correct_answer: "a".into(),
        question_type: category.to_string(),
        difficulty: Some(difficulty.to_string()),
        marks: 1,
        has_negative_marking: false,
        negative_marks: 0,
        created_at: None,
    }
}

fn seeded_gateway() -> Arc<MemoryGateway> {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.push_record(record("q1", "Aptitude", "Medium"));
    gateway.push_record(record("q2", "Aptitude", "Low"));
    gateway.push_record(record("q3", "Coding", "Medium"));
    gateway
}

#[tokio::test]
async fn catalog_reflects_the_seeded_bank() {
    let quiz = QuizService::new(seeded_gateway());
    let catalog = quiz.catalog().await.unwrap();

    assert_eq!(catalog.total_questions, 3);
    assert_eq!(catalog.categories.len(), 2);
    assert_eq!(catalog.categories[0].name, "Aptitude");
    assert_eq!(catalog.categories[0].question_count, 2);
    assert!(catalog.categories[0].offers(Difficulty::Low));
    assert!(!catalog.categories[1].offers(Difficulty::High));
    assert!(catalog.offers(Difficulty::Medium));
}

#[tokio::test]
async fn mixed_quiz_runs_through_answer_and_submit() {
    let quiz = QuizService::new(seeded_gateway());
    let mut session = quiz
        .start(QuizSettings::new(QuizType::Mixed, Difficulty::Medium))
        .await
        .unwrap();

    // q1 and q3 are Medium; Mixed ignores category.
    assert_eq!(session.total_questions(), 2);
    assert_eq!(session.time_left(), 2 * 30);

    session.select_answer(&QuestionId::new("q1"), "a");
    session.go_to(1);
    session.select_answer(&QuestionId::new("q3"), "b");

    let summary = *session.submit();
    assert_eq!(summary.correct(), 1);
    assert_eq!(summary.incorrect(), 1);
    assert_eq!(summary.unattempted(), 0);
    assert_eq!(summary.score(), 1);
}

#[tokio::test]
async fn category_quiz_filters_on_both_axes() {
    let quiz = QuizService::new(seeded_gateway());
    let session = quiz
        .start(QuizSettings::new(
            QuizType::Category("Coding".into()),
            Difficulty::Medium,
        ))
        .await
        .unwrap();

    assert_eq!(session.total_questions(), 1);
    assert_eq!(session.questions()[0].category(), "Coding");
}

#[tokio::test]
async fn empty_selection_reports_no_questions() {
    let quiz = QuizService::new(seeded_gateway());
    let err = quiz
        .start(QuizSettings::new(
            QuizType::Category("Coding".into()),
            Difficulty::High,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::Session(SessionError::NoQuestions)));
    assert_eq!(err.to_string(), "no questions found for the selected criteria");
}

#[tokio::test]
async fn malformed_records_are_skipped_not_fatal() {
    let gateway = seeded_gateway();
    let mut broken = record("q4", "Aptitude", "Medium");
    broken.correct_answer = "not an option".into();
    gateway.push_record(broken);

    let quiz = QuizService::new(gateway);
    let bank = quiz.load_bank().await.unwrap();
    assert_eq!(bank.len(), 3);
    assert!(bank.iter().all(|question| question.id().as_str() != "q4"));
}
