use std::collections::HashMap;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Final tallies of a submitted quiz. Computed exactly once, then immutable.
///
/// The score is signed: negative marking can push it below zero, and no
/// floor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    score: i32,
    total_questions: u32,
    correct: u32,
    incorrect: u32,
    unattempted: u32,
}

impl ResultSummary {
    /// Tally the final answers against the question list.
    ///
    /// Answered and correct contributes `+marks`; answered and wrong
    /// contributes `-negative_marks` when the question carries the flag;
    /// unattempted contributes nothing.
    pub(crate) fn tally(questions: &[Question], answers: &HashMap<QuestionId, String>) -> Self {
        let mut score = 0_i32;
        let mut correct = 0_u32;
        let mut incorrect = 0_u32;

        for question in questions {
            match answers.get(question.id()) {
                Some(choice) if choice == question.correct_answer() => {
                    score = score.saturating_add_unsigned(question.marks());
                    correct += 1;
                }
                Some(_) => {
                    if question.has_negative_marking() {
                        score = score.saturating_sub_unsigned(question.negative_marks());
                    }
                    incorrect += 1;
                }
                None => {}
            }
        }

        let total_questions = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Self {
            score,
            total_questions,
            correct,
            incorrect,
            unattempted: total_questions - correct - incorrect,
        }
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn unattempted(&self) -> u32 {
        self.unattempted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, QuestionDraft};

    fn question(id: &str, correct: &str, marks: u32, negative: Option<u32>) -> Question {
        QuestionDraft {
            text: format!("question {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct.into(),
            category: "Aptitude".into(),
            difficulty: Difficulty::Medium,
            marks,
            negative_marking: negative.is_some(),
            negative_marks: negative.unwrap_or(0),
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(id), None)
    }

    #[test]
    fn counts_partition_the_question_set() {
        let questions = vec![
            question("q1", "a", 1, None),
            question("q2", "a", 1, None),
            question("q3", "a", 1, None),
        ];
        let mut answers = HashMap::new();
        answers.insert(QuestionId::new("q1"), "a".to_string());
        answers.insert(QuestionId::new("q2"), "b".to_string());

        let summary = ResultSummary::tally(&questions, &answers);
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.unattempted(), 1);
        assert_eq!(
            summary.correct() + summary.incorrect() + summary.unattempted(),
            summary.total_questions()
        );
    }

    #[test]
    fn wrong_answer_with_negative_marking_deducts() {
        let questions = vec![question("q1", "a", 2, Some(1))];
        let mut answers = HashMap::new();
        answers.insert(QuestionId::new("q1"), "b".to_string());

        let summary = ResultSummary::tally(&questions, &answers);
        assert_eq!(summary.score(), -1);
        assert_eq!(summary.incorrect(), 1);
    }

    #[test]
    fn wrong_answer_without_negative_marking_is_free() {
        let questions = vec![question("q1", "a", 2, None)];
        let mut answers = HashMap::new();
        answers.insert(QuestionId::new("q1"), "c".to_string());

        let summary = ResultSummary::tally(&questions, &answers);
        assert_eq!(summary.score(), 0);
    }

    #[test]
    fn score_can_go_below_zero() {
        let questions = vec![
            question("q1", "a", 1, Some(2)),
            question("q2", "a", 1, Some(2)),
        ];
        let mut answers = HashMap::new();
        answers.insert(QuestionId::new("q1"), "b".to_string());
        answers.insert(QuestionId::new("q2"), "b".to_string());

        let summary = ResultSummary::tally(&questions, &answers);
        assert_eq!(summary.score(), -4);
    }
}
