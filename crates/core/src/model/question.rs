use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty band of a question, also the pacing policy for the countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Low,
    #[default]
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    /// Seconds granted per question when a quiz at this difficulty starts.
    #[must_use]
    pub fn seconds_per_question(self) -> u32 {
        match self {
            Difficulty::Low => 20,
            Difficulty::Medium => 30,
            Difficulty::High => 40,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Low => "Low",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
        }
    }

    /// Parses the wire/UI label. Unknown labels fall back to `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Difficulty::Low),
            "Medium" => Some(Difficulty::Medium),
            "High" => Some(Difficulty::High),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least two non-empty options, got {got}")]
    NotEnoughOptions { got: usize },

    #[error("correct answer is not one of the options")]
    CorrectAnswerNotAnOption,

    #[error("question category cannot be empty")]
    EmptyCategory,

    #[error("marks must be > 0")]
    ZeroMarks,
}

//
// ─── DRAFT / VALIDATION ────────────────────────────────────────────────────────
//

/// Unvalidated question input, as typed into the admin form or received off
/// the wire. Becomes a [`Question`] only through [`QuestionDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub marks: u32,
    pub negative_marking: bool,
    pub negative_marks: u32,
}

impl QuestionDraft {
    /// Validate the draft into a well-formed question (without an id).
    ///
    /// Blank options are dropped before validation; a negative-marks value
    /// with the flag off is normalized to zero, matching what the admin form
    /// submits.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text or category is empty, fewer
    /// than two options remain, the correct answer is not among the options,
    /// or marks is zero.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(QuestionError::EmptyCategory);
        }

        let options: Vec<String> = self
            .options
            .into_iter()
            .map(|opt| opt.trim().to_string())
            .filter(|opt| !opt.is_empty())
            .collect();
        if options.len() < 2 {
            return Err(QuestionError::NotEnoughOptions { got: options.len() });
        }

        let correct_answer = self.correct_answer.trim().to_string();
        if !options.iter().any(|opt| *opt == correct_answer) {
            return Err(QuestionError::CorrectAnswerNotAnOption);
        }

        if self.marks == 0 {
            return Err(QuestionError::ZeroMarks);
        }

        let negative_marks = if self.negative_marking {
            self.negative_marks
        } else {
            0
        };

        Ok(ValidatedQuestion {
            text,
            options,
            correct_answer,
            category,
            difficulty: self.difficulty,
            marks: self.marks,
            negative_marking: self.negative_marking,
            negative_marks,
        })
    }
}

/// A question that passed validation but has no server id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub marks: u32,
    pub negative_marking: bool,
    pub negative_marks: u32,
}

impl ValidatedQuestion {
    /// Attach the server-assigned id (and creation time, when known).
    #[must_use]
    pub fn assign_id(self, id: QuestionId, created_at: Option<DateTime<Utc>>) -> Question {
        Question {
            id,
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            category: self.category,
            difficulty: self.difficulty,
            marks: self.marks,
            negative_marking: self.negative_marking,
            negative_marks: self.negative_marks,
            created_at,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_answer: String,
    category: String,
    difficulty: Difficulty,
    marks: u32,
    negative_marking: bool,
    negative_marks: u32,
    created_at: Option<DateTime<Utc>>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in the order the server stored them.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Free-text category label ("Aptitude", "Coding", ...).
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn marks(&self) -> u32 {
        self.marks
    }

    #[must_use]
    pub fn has_negative_marking(&self) -> bool {
        self.negative_marking
    }

    /// Deduction for a wrong answer; zero unless negative marking is on.
    #[must_use]
    pub fn negative_marks(&self) -> u32 {
        self.negative_marks
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Turn the question back into a draft, e.g. to prefill the edit form.
    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            text: self.text.clone(),
            options: self.options.clone(),
            correct_answer: self.correct_answer.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
            marks: self.marks,
            negative_marking: self.negative_marking,
            negative_marks: self.negative_marks,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
