//! Wire contract for the quiz platform API.
//!
//! Records mirror the server's JSON shape exactly; domain conversion happens
//! at this boundary so nothing past it sees an unvalidated question.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quiz_core::model::{
    Difficulty, Question, QuestionDraft, QuestionError, QuestionId, ValidatedQuestion,
};

use crate::error::GatewayError;

//
// ─── QUESTION WIRE SHAPES ──────────────────────────────────────────────────────
//

/// A question exactly as `GET /api/questions` returns it.
///
/// Defaults match the original client's coercions: a missing difficulty is
/// `Medium`, missing marks is 1, missing negative-marking fields are off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub question_type: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default = "default_marks")]
    pub marks: u32,
    #[serde(default)]
    pub has_negative_marking: bool,
    #[serde(default)]
    pub negative_marks: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_marks() -> u32 {
    1
}

impl QuestionRecord {
    /// Convert the record into a validated domain question.
    ///
    /// An absent or unrecognized difficulty label coerces to `Medium`, the
    /// same way the original client treated the field.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the record fails domain validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let difficulty = self
            .difficulty
            .as_deref()
            .and_then(Difficulty::from_label)
            .unwrap_or_default();

        let validated = QuestionDraft {
            text: self.question_text,
            options: self.options,
            correct_answer: self.correct_answer,
            category: self.question_type,
            difficulty,
            marks: self.marks,
            negative_marking: self.has_negative_marking,
            negative_marks: self.negative_marks,
        }
        .validate()?;

        Ok(validated.assign_id(QuestionId::new(self.id), self.created_at))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsEnvelope {
    pub data: Vec<QuestionRecord>,
}

/// Body for `POST /api/questions` and `PUT /api/questions/:id`.
///
/// Built from a [`ValidatedQuestion`] only, so the admin panel cannot send
/// a question the domain layer would reject.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub question_type: String,
    pub difficulty: &'static str,
    pub marks: u32,
    pub has_negative_marking: bool,
    pub negative_marks: u32,
}

impl From<&ValidatedQuestion> for QuestionPayload {
    fn from(question: &ValidatedQuestion) -> Self {
        Self {
            question_text: question.text.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            question_type: question.category.clone(),
            difficulty: question.difficulty.label(),
            marks: question.marks,
            has_negative_marking: question.negative_marking,
            negative_marks: question.negative_marks,
        }
    }
}

//
// ─── AUTH WIRE SHAPES ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterBody {
    pub username: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub password: String,
    pub role: String,
}

/// Reply shape shared by `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthReply {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

//
// ─── BEARER SLOT ───────────────────────────────────────────────────────────────
//

/// Shared slot for the current bearer token.
///
/// `AuthService` writes it on login/logout; `HttpGateway` reads it per
/// request. One slot per app, cloned freely.
#[derive(Debug, Clone, Default)]
pub struct BearerSlot(Arc<RwLock<Option<String>>>);

impl BearerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: Option<String>) {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *guard = token;
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }
}

//
// ─── GATEWAY CONTRACT ──────────────────────────────────────────────────────────
//

/// The consumed REST surface, abstracted so tests can run in memory.
#[async_trait]
pub trait QuestionGateway: Send + Sync {
    /// `GET /api/questions`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure or a non-success status.
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, GatewayError>;

    /// `POST /api/questions`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure or a non-success status.
    async fn create_question(&self, payload: &QuestionPayload) -> Result<(), GatewayError>;

    /// `PUT /api/questions/:id`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure or a non-success status.
    async fn update_question(
        &self,
        id: &QuestionId,
        payload: &QuestionPayload,
    ) -> Result<(), GatewayError>;

    /// `DELETE /api/questions/:id`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure or a non-success status.
    async fn delete_question(&self, id: &QuestionId) -> Result<(), GatewayError>;

    /// `POST /api/auth/login`. Rejections come back as a reply with
    /// `success: false`, not as an `Err`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure.
    async fn login(&self, body: &LoginBody) -> Result<AuthReply, GatewayError>;

    /// `POST /api/auth/register`. Same reply convention as `login`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure.
    async fn register(&self, body: &RegisterBody) -> Result<AuthReply, GatewayError>;
}
