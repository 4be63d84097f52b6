use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use quiz_core::model::{Question, QuestionDraft, QuestionId};

use crate::error::AdminError;
use crate::gateway::{QuestionGateway, QuestionPayload};

/// One admin-panel section: a category and its questions.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Group an already-sorted question list by category, optionally keeping a
/// single category. Order within a group is preserved.
#[must_use]
pub fn group_by_category(questions: &[Question], filter: Option<&str>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for question in questions {
        if filter.is_some_and(|name| name != question.category()) {
            continue;
        }
        match groups.last_mut() {
            Some(group) if group.name == question.category() => {
                group.questions.push(question.clone());
            }
            _ => groups.push(CategoryGroup {
                name: question.category().to_string(),
                questions: vec![question.clone()],
            }),
        }
    }
    groups
}

/// Admin CRUD over the question bank.
pub struct QuestionAdminService {
    gateway: Arc<dyn QuestionGateway>,
}

impl QuestionAdminService {
    #[must_use]
    pub fn new(gateway: Arc<dyn QuestionGateway>) -> Self {
        Self { gateway }
    }

    /// All questions, sorted by category and newest-first within it — the
    /// admin panel's list order.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Gateway` on fetch failure.
    pub async fn list(&self) -> Result<Vec<Question>, AdminError> {
        let records = self.gateway.list_questions().await?;
        let mut questions = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            match record.into_question() {
                Ok(question) => questions.push(question),
                Err(err) => log::warn!("skipping malformed question {id}: {err}"),
            }
        }
        questions.sort_by_key(|question| {
            (
                question.category().to_string(),
                Reverse(question.created_at().unwrap_or(DateTime::<Utc>::MIN_UTC)),
            )
        });
        Ok(questions)
    }

    /// Validate and create a new question.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Question` when the draft is invalid (nothing is
    /// sent) or `AdminError::Gateway` when the API refuses it.
    pub async fn create(&self, draft: QuestionDraft) -> Result<(), AdminError> {
        let validated = draft.validate()?;
        let payload = QuestionPayload::from(&validated);
        self.gateway.create_question(&payload).await?;
        Ok(())
    }

    /// Validate and replace an existing question.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`QuestionAdminService::create`].
    pub async fn update(&self, id: &QuestionId, draft: QuestionDraft) -> Result<(), AdminError> {
        let validated = draft.validate()?;
        let payload = QuestionPayload::from(&validated);
        self.gateway.update_question(id, &payload).await?;
        Ok(())
    }

    /// Delete a question. The confirmation dialog is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Gateway` when the API refuses.
    pub async fn delete(&self, id: &QuestionId) -> Result<(), AdminError> {
        self.gateway.delete_question(id).await?;
        Ok(())
    }
}
