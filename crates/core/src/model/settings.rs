use std::fmt;

use crate::model::question::{Difficulty, Question};

/// What the user picked on the dashboard: every category, or one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizType {
    Mixed,
    Category(String),
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizType::Mixed => f.write_str("Mixed"),
            QuizType::Category(name) => f.write_str(name),
        }
    }
}

/// Quiz selection, fixed before a session starts and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    quiz_type: QuizType,
    difficulty: Difficulty,
}

impl QuizSettings {
    #[must_use]
    pub fn new(quiz_type: QuizType, difficulty: Difficulty) -> Self {
        Self {
            quiz_type,
            difficulty,
        }
    }

    #[must_use]
    pub fn quiz_type(&self) -> &QuizType {
        &self.quiz_type
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether a bank question belongs in a session with these settings.
    ///
    /// `Mixed` filters by difficulty only; a named category also requires an
    /// exact category string match.
    #[must_use]
    pub fn selects(&self, question: &Question) -> bool {
        if question.difficulty() != self.difficulty {
            return false;
        }
        match &self.quiz_type {
            QuizType::Mixed => true,
            QuizType::Category(name) => question.category() == name,
        }
    }
}
