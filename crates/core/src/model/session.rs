use std::collections::HashMap;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;
use crate::model::result::ResultSummary;
use crate::model::settings::QuizSettings;
use crate::model::tracker::TrackerDot;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions found for the selected criteria")]
    NoQuestions,
}

/// What a one-second tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains; the session keeps running.
    Running(u32),
    /// This tick exhausted the clock; the session auto-submitted.
    Expired,
    /// The session was already terminal; the caller should stop ticking.
    Stopped,
}

/// One user's in-progress attempt at a filtered subset of the question bank.
///
/// Owns the working set of questions, the answer map, the sticky viewed
/// flags, and the countdown. Becomes terminal exactly once, through
/// [`QuizSession::submit`], after which every mutation is a no-op.
#[derive(Debug, Clone)]
pub struct QuizSession {
    settings: QuizSettings,
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<QuestionId, String>,
    viewed: Vec<bool>,
    time_left: u32,
    result: Option<ResultSummary>,
}

impl QuizSession {
    /// Filter the bank by the chosen settings and start a session.
    ///
    /// Initial time is `question_count * seconds_per_question` for the
    /// chosen difficulty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` when nothing in the bank matches;
    /// the caller shows a blocking error with a way back to the dashboard,
    /// and no timer ever starts.
    pub fn new(settings: QuizSettings, bank: Vec<Question>) -> Result<Self, SessionError> {
        let questions: Vec<Question> = bank
            .into_iter()
            .filter(|question| settings.selects(question))
            .collect();
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        let count = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        let time_left = count.saturating_mul(settings.difficulty().seconds_per_question());
        let viewed = vec![false; questions.len()];

        Ok(Self {
            settings,
            questions,
            current: 0,
            answers: HashMap::new(),
            viewed,
            time_left,
            result: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Always within `[0, total_questions)`.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn answer_for(&self, id: &QuestionId) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// The summary, once [`QuizSession::submit`] has run.
    #[must_use]
    pub fn result(&self) -> Option<&ResultSummary> {
        self.result.as_ref()
    }

    /// Record (or overwrite) the chosen option for a question.
    ///
    /// The option string is trusted as-is; the rendering layer only offers
    /// options that exist. Ignored once the session is terminal.
    pub fn select_answer(&mut self, id: &QuestionId, option: impl Into<String>) {
        if self.result.is_some() {
            return;
        }
        self.answers.insert(id.clone(), option.into());
    }

    /// Move to `index`, marking the index being left behind as viewed.
    ///
    /// Out-of-range targets and terminal sessions are silently ignored; a
    /// stale jump button is not an error.
    pub fn go_to(&mut self, index: usize) {
        if self.result.is_some() || index >= self.questions.len() {
            return;
        }
        if let Some(flag) = self.viewed.get_mut(self.current) {
            *flag = true;
        }
        self.current = index;
    }

    /// Advance the countdown by one second.
    ///
    /// Reaching zero triggers [`QuizSession::submit`] exactly once; further
    /// ticks report [`TickOutcome::Stopped`] so the driving task can wind
    /// down.
    pub fn tick(&mut self) -> TickOutcome {
        if self.result.is_some() {
            return TickOutcome::Stopped;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.submit();
            return TickOutcome::Expired;
        }
        TickOutcome::Running(self.time_left)
    }

    /// Score the session and make it terminal. Idempotent: the summary is
    /// computed on the first call and never recomputed.
    ///
    /// Confirming an early submit with the user is the caller's job; the
    /// state machine applies no gate of its own.
    pub fn submit(&mut self) -> &ResultSummary {
        let questions = &self.questions;
        let answers = &self.answers;
        self.result
            .get_or_insert_with(|| ResultSummary::tally(questions, answers))
    }

    /// Sidebar projection: one dot per question.
    #[must_use]
    pub fn tracker(&self) -> Vec<TrackerDot> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| TrackerDot {
                index,
                current: index == self.current,
                answered: self.answers.contains_key(question.id()),
                viewed: self.viewed.get(index).copied().unwrap_or(false),
            })
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, QuestionDraft, QuizType};

    fn question(
        id: &str,
        category: &str,
        difficulty: Difficulty,
        marks: u32,
        negative: Option<u32>,
    ) -> Question {
        QuestionDraft {
            text: format!("question {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: "a".into(),
            category: category.into(),
            difficulty,
            marks,
            negative_marking: negative.is_some(),
            negative_marks: negative.unwrap_or(0),
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(id), None)
    }

    fn mixed_medium(bank: Vec<Question>) -> QuizSession {
        QuizSession::new(QuizSettings::new(QuizType::Mixed, Difficulty::Medium), bank).unwrap()
    }

    #[test]
    fn empty_filter_result_fails_before_any_timer() {
        let bank = vec![
            question("q1", "Aptitude", Difficulty::Medium, 1, None),
            question("q2", "Coding", Difficulty::Low, 1, None),
        ];
        let err = QuizSession::new(
            QuizSettings::new(QuizType::Category("Coding".into()), Difficulty::High),
            bank,
        )
        .unwrap_err();
        assert_eq!(err, SessionError::NoQuestions);
        assert_eq!(
            err.to_string(),
            "no questions found for the selected criteria"
        );
    }

    #[test]
    fn initial_time_follows_the_pacing_policy() {
        let bank = vec![
            question("q1", "Aptitude", Difficulty::High, 1, None),
            question("q2", "Coding", Difficulty::High, 1, None),
        ];
        let quiz =
            QuizSession::new(QuizSettings::new(QuizType::Mixed, Difficulty::High), bank).unwrap();
        assert_eq!(quiz.time_left(), 2 * 40);
    }

    #[test]
    fn go_to_stays_in_bounds() {
        let bank = vec![
            question("q1", "Aptitude", Difficulty::Medium, 1, None),
            question("q2", "Aptitude", Difficulty::Medium, 1, None),
        ];
        let mut quiz = mixed_medium(bank);

        quiz.go_to(5);
        assert_eq!(quiz.current_index(), 0);
        quiz.go_to(1);
        assert_eq!(quiz.current_index(), 1);
    }

    #[test]
    fn go_to_marks_the_previous_index_viewed() {
        let bank = vec![
            question("q1", "Aptitude", Difficulty::Medium, 1, None),
            question("q2", "Aptitude", Difficulty::Medium, 1, None),
        ];
        let mut quiz = mixed_medium(bank);

        quiz.go_to(1);
        let dots = quiz.tracker();
        assert!(dots[0].viewed);
        assert!(!dots[1].viewed);
    }

    #[test]
    fn select_answer_overwrites_previous_choice() {
        let bank = vec![question("q1", "Aptitude", Difficulty::Medium, 1, None)];
        let mut quiz = mixed_medium(bank);
        let id = QuestionId::new("q1");

        quiz.select_answer(&id, "b");
        quiz.select_answer(&id, "a");
        assert_eq!(quiz.answer_for(&id), Some("a"));
    }

    #[test]
    fn scores_one_correct_one_unattempted() {
        let bank = vec![
            question("q1", "Aptitude", Difficulty::Medium, 1, None),
            question("q2", "Coding", Difficulty::Medium, 1, None),
        ];
        let mut quiz = mixed_medium(bank);
        quiz.select_answer(&QuestionId::new("q1"), "a");

        let summary = *quiz.submit();
        assert_eq!(summary.score(), 1);
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.incorrect(), 0);
        assert_eq!(summary.unattempted(), 1);
    }

    #[test]
    fn submit_is_idempotent() {
        let bank = vec![question("q1", "Aptitude", Difficulty::Medium, 2, Some(1))];
        let mut quiz = mixed_medium(bank);
        let id = QuestionId::new("q1");
        quiz.select_answer(&id, "a");

        let first = *quiz.submit();
        // Late events must not change the stored summary.
        quiz.select_answer(&id, "b");
        let second = *quiz.submit();
        assert_eq!(first, second);
        assert_eq!(second.score(), 2);
    }

    #[test]
    fn tick_to_zero_submits_exactly_once() {
        let bank = vec![question("q1", "Aptitude", Difficulty::Low, 1, None)];
        let mut quiz = QuizSession::new(
            QuizSettings::new(QuizType::Mixed, Difficulty::Low),
            bank,
        )
        .unwrap();

        let mut expirations = 0;
        for _ in 0..25 {
            match quiz.tick() {
                TickOutcome::Running(_) => {}
                TickOutcome::Expired => expirations += 1,
                TickOutcome::Stopped => break,
            }
        }
        assert_eq!(expirations, 1);
        assert!(quiz.is_finished());
        assert_eq!(quiz.result().unwrap().unattempted(), 1);
    }

    #[test]
    fn terminal_session_ignores_every_mutation() {
        let bank = vec![
            question("q1", "Aptitude", Difficulty::Medium, 1, None),
            question("q2", "Aptitude", Difficulty::Medium, 1, None),
        ];
        let mut quiz = mixed_medium(bank);
        quiz.submit();

        quiz.go_to(1);
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.tick(), TickOutcome::Stopped);
        quiz.select_answer(&QuestionId::new("q2"), "a");
        assert_eq!(quiz.result().unwrap().correct(), 0);
    }
}
