//! In-memory gateway so service and flow tests run without a server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use quiz_core::model::QuestionId;

use crate::auth::Role;
use crate::error::GatewayError;
use crate::gateway::{
    AuthReply, LoginBody, QuestionGateway, QuestionPayload, QuestionRecord, RegisterBody,
};

/// Build an unsigned JWT-shaped token the auth layer can decode.
///
/// Test support: the client never verifies signatures, so `unsigned` in the
/// signature slot is as good as the real thing here.
#[must_use]
pub fn mint_token(username: &str, role: Role, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "none", "typ": "JWT"}).to_string());
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "user": {"username": username, "role": role.as_str()},
            "exp": exp,
        })
        .to_string(),
    );
    format!("{header}.{payload}.unsigned")
}

struct Account {
    password: String,
    token: String,
}

/// Gateway double backed by vectors and maps.
#[derive(Default)]
pub struct MemoryGateway {
    questions: Mutex<Vec<QuestionRecord>>,
    accounts: Mutex<HashMap<String, Account>>,
    next_id: AtomicU64,
    /// Token handed to the next successful `register` call.
    register_exp: AtomicU64,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self {
            register_exp: AtomicU64::new(u32::MAX as u64),
            ..Self::default()
        }
    }

    /// Seed a question record as the server would return it.
    pub fn push_record(&self, record: QuestionRecord) {
        let mut guard = self
            .questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.push(record);
    }

    /// Seed an account whose successful login returns `token`.
    pub fn add_account(&self, email: &str, password: &str, token: &str) {
        let mut guard = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                token: token.to_string(),
            },
        );
    }

    /// Expiry used for tokens minted by `register`.
    pub fn set_register_exp(&self, exp: i64) {
        self.register_exp
            .store(exp.max(0).unsigned_abs(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn records(&self) -> Vec<QuestionRecord> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl QuestionGateway for MemoryGateway {
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, GatewayError> {
        Ok(self.records())
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<(), GatewayError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.push_record(QuestionRecord {
            id: format!("mem-{n}"),
            question_text: payload.question_text.clone(),
            options: payload.options.clone(),
            correct_answer: payload.correct_answer.clone(),
            question_type: payload.question_type.clone(),
            difficulty: Some(payload.difficulty.to_string()),
            marks: payload.marks,
            has_negative_marking: payload.has_negative_marking,
            negative_marks: payload.negative_marks,
            created_at: None,
        });
        Ok(())
    }

    async fn update_question(
        &self,
        id: &QuestionId,
        payload: &QuestionPayload,
    ) -> Result<(), GatewayError> {
        let mut guard = self
            .questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(record) = guard.iter_mut().find(|record| record.id == id.as_str()) else {
            return Err(GatewayError::HttpStatus(reqwest::StatusCode::NOT_FOUND));
        };
        record.question_text = payload.question_text.clone();
        record.options = payload.options.clone();
        record.correct_answer = payload.correct_answer.clone();
        record.question_type = payload.question_type.clone();
        record.difficulty = Some(payload.difficulty.to_string());
        record.marks = payload.marks;
        record.has_negative_marking = payload.has_negative_marking;
        record.negative_marks = payload.negative_marks;
        Ok(())
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), GatewayError> {
        let mut guard = self
            .questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|record| record.id != id.as_str());
        if guard.len() == before {
            return Err(GatewayError::HttpStatus(reqwest::StatusCode::NOT_FOUND));
        }
        Ok(())
    }

    async fn login(&self, body: &LoginBody) -> Result<AuthReply, GatewayError> {
        let guard = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.get(&body.email) {
            Some(account) if account.password == body.password => Ok(AuthReply {
                success: true,
                token: Some(account.token.clone()),
                message: None,
            }),
            _ => Ok(AuthReply {
                success: false,
                token: None,
                message: Some("Invalid credentials".to_string()),
            }),
        }
    }

    async fn register(&self, body: &RegisterBody) -> Result<AuthReply, GatewayError> {
        let role = if body.role == "admin" {
            Role::Admin
        } else {
            Role::User
        };
        let exp = i64::try_from(self.register_exp.load(Ordering::Relaxed)).unwrap_or(i64::MAX);
        let token = mint_token(&body.username, role, exp);

        let mut guard = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(
            body.email.clone(),
            Account {
                password: body.password.clone(),
                token: token.clone(),
            },
        );
        Ok(AuthReply {
            success: true,
            token: Some(token),
            message: None,
        })
    }
}
