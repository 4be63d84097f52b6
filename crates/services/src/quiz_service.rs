use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use quiz_core::model::{Difficulty, Question, QuizSession, QuizSettings};

use crate::error::QuizError;
use crate::gateway::QuestionGateway;

/// What the dashboard shows for one category card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub question_count: usize,
    pub difficulties: BTreeSet<Difficulty>,
}

impl CategorySummary {
    #[must_use]
    pub fn offers(&self, difficulty: Difficulty) -> bool {
        self.difficulties.contains(&difficulty)
    }
}

/// Aggregated view of the whole question bank for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizCatalog {
    pub total_questions: usize,
    /// Difficulties available across all categories (the Mixed card).
    pub difficulties: BTreeSet<Difficulty>,
    pub categories: Vec<CategorySummary>,
}

impl QuizCatalog {
    #[must_use]
    pub fn offers(&self, difficulty: Difficulty) -> bool {
        self.difficulties.contains(&difficulty)
    }

    fn from_questions(questions: &[Question]) -> Self {
        let mut categories: BTreeMap<String, CategorySummary> = BTreeMap::new();
        let mut difficulties = BTreeSet::new();

        for question in questions {
            difficulties.insert(question.difficulty());
            let entry = categories
                .entry(question.category().to_string())
                .or_insert_with(|| CategorySummary {
                    name: question.category().to_string(),
                    question_count: 0,
                    difficulties: BTreeSet::new(),
                });
            entry.question_count += 1;
            entry.difficulties.insert(question.difficulty());
        }

        Self {
            total_questions: questions.len(),
            difficulties,
            categories: categories.into_values().collect(),
        }
    }
}

/// Fetches the bank and turns it into dashboard data or a running session.
pub struct QuizService {
    gateway: Arc<dyn QuestionGateway>,
}

impl QuizService {
    #[must_use]
    pub fn new(gateway: Arc<dyn QuestionGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch and convert the whole bank, dropping records that fail domain
    /// validation. The server owns those; the client logs and moves on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Gateway` on fetch failure.
    pub async fn load_bank(&self) -> Result<Vec<Question>, QuizError> {
        let records = self.gateway.list_questions().await?;
        let mut questions = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            match record.into_question() {
                Ok(question) => questions.push(question),
                Err(err) => log::warn!("skipping malformed question {id}: {err}"),
            }
        }
        Ok(questions)
    }

    /// Dashboard aggregation: per-category counts plus available
    /// difficulties, and the Mixed totals.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Gateway` on fetch failure.
    pub async fn catalog(&self) -> Result<QuizCatalog, QuizError> {
        let questions = self.load_bank().await?;
        Ok(QuizCatalog::from_questions(&questions))
    }

    /// Fetch, filter by `settings`, and start a session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` (no questions for the criteria) or
    /// `QuizError::Gateway` (fetch failure); either way no timer starts.
    pub async fn start(&self, settings: QuizSettings) -> Result<QuizSession, QuizError> {
        let questions = self.load_bank().await?;
        Ok(QuizSession::new(settings, questions)?)
    }
}
