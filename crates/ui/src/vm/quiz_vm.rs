use quiz_core::model::{
    Difficulty, Question, QuizSession, QuizSettings, QuizType, ResultSummary, SessionError,
    TickOutcome, TrackerDot,
};
use services::{QuizError, QuizService};

use crate::views::ViewError;

/// Everything the quiz page can ask the view model to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    GoTo(usize),
    Next,
    Previous,
    /// Open the submit confirmation.
    RequestSubmit,
    CancelSubmit,
    ConfirmSubmit,
}

/// Wraps the session state machine with page-local concerns: the submit
/// confirmation gate and presentation accessors.
pub struct QuizVm {
    session: QuizSession,
    confirming: bool,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            confirming: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} · {}",
            self.session.settings().quiz_type(),
            self.session.settings().difficulty().label()
        )
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.session.time_left()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    /// The option currently selected for the question on screen.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.current_question()
            .and_then(|question| self.session.answer_for(question.id()))
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.session
            .tracker()
            .iter()
            .filter(|dot| dot.answered)
            .count()
    }

    #[must_use]
    pub fn tracker(&self) -> Vec<TrackerDot> {
        self.session.tracker()
    }

    #[must_use]
    pub fn confirming(&self) -> bool {
        self.confirming
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    #[must_use]
    pub fn result(&self) -> Option<&ResultSummary> {
        self.session.result()
    }

    /// One second of countdown. The driving task stops on anything but
    /// `Running`.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if outcome == TickOutcome::Expired {
            // Time ran out mid-confirmation: the session is already
            // submitted, drop the stale dialog.
            self.confirming = false;
        }
        outcome
    }

    pub fn apply(&mut self, intent: QuizIntent) {
        match intent {
            QuizIntent::Select(option) => {
                if let Some(id) = self.current_question().map(|question| question.id().clone()) {
                    self.session.select_answer(&id, option);
                }
            }
            QuizIntent::GoTo(index) => self.session.go_to(index),
            QuizIntent::Next => {
                let next = self.session.current_index() + 1;
                self.session.go_to(next);
            }
            QuizIntent::Previous => {
                if let Some(previous) = self.session.current_index().checked_sub(1) {
                    self.session.go_to(previous);
                }
            }
            QuizIntent::RequestSubmit => {
                if !self.session.is_finished() {
                    self.confirming = true;
                }
            }
            QuizIntent::CancelSubmit => self.confirming = false,
            QuizIntent::ConfirmSubmit => {
                self.confirming = false;
                self.session.submit();
            }
        }
    }
}

/// Translate route segments back into quiz settings.
///
/// The dashboard encodes `Mixed` as the literal segment `mixed`; anything
/// else is a category name. An unknown difficulty label is a dead link, not
/// a default.
#[must_use]
pub fn parse_route_settings(quiz_type: &str, difficulty: &str) -> Option<QuizSettings> {
    let difficulty = Difficulty::from_label(difficulty)?;
    let quiz_type = if quiz_type.eq_ignore_ascii_case("mixed") {
        QuizType::Mixed
    } else {
        QuizType::Category(quiz_type.to_string())
    };
    Some(QuizSettings::new(quiz_type, difficulty))
}

/// Route segment for a quiz type, the inverse of [`parse_route_settings`].
#[must_use]
pub fn quiz_type_segment(quiz_type: &QuizType) -> String {
    match quiz_type {
        QuizType::Mixed => "mixed".to_string(),
        QuizType::Category(name) => name.clone(),
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when the filters match nothing and
/// `ViewError::Unknown` for gateway failures.
pub async fn start_quiz(service: &QuizService, settings: QuizSettings) -> Result<QuizVm, ViewError> {
    match service.start(settings).await {
        Ok(session) => Ok(QuizVm::new(session)),
        Err(QuizError::Session(SessionError::NoQuestions)) => Err(ViewError::EmptyQuiz),
        Err(_) => Err(ViewError::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;

    fn session() -> QuizSession {
        let bank = (1..=3)
            .map(|n| {
                QuestionDraft {
                    text: format!("question {n}"),
                    options: vec!["a".into(), "b".into()],
                    correct_answer: "a".into(),
                    category: "Aptitude".into(),
                    difficulty: Difficulty::Medium,
                    marks: 1,
                    negative_marking: false,
                    negative_marks: 0,
                }
                .validate()
                .unwrap()
                .assign_id(quiz_core::model::QuestionId::new(format!("q{n}")), None)
            })
            .collect();
        QuizSession::new(
            QuizSettings::new(QuizType::Mixed, Difficulty::Medium),
            bank,
        )
        .unwrap()
    }

    #[test]
    fn route_settings_round_trip() {
        let settings = parse_route_settings("mixed", "High").unwrap();
        assert_eq!(*settings.quiz_type(), QuizType::Mixed);
        assert_eq!(settings.difficulty(), Difficulty::High);
        assert_eq!(quiz_type_segment(settings.quiz_type()), "mixed");

        let settings = parse_route_settings("Coding", "Low").unwrap();
        assert_eq!(
            *settings.quiz_type(),
            QuizType::Category("Coding".to_string())
        );
        assert_eq!(quiz_type_segment(settings.quiz_type()), "Coding");
    }

    #[test]
    fn bad_difficulty_label_is_a_dead_link() {
        assert!(parse_route_settings("mixed", "Impossible").is_none());
    }

    #[test]
    fn navigation_intents_stay_in_bounds() {
        let mut vm = QuizVm::new(session());
        vm.apply(QuizIntent::Previous);
        assert_eq!(vm.current_index(), 0);
        vm.apply(QuizIntent::Next);
        assert_eq!(vm.current_index(), 1);
        vm.apply(QuizIntent::GoTo(99));
        assert_eq!(vm.current_index(), 1);
        vm.apply(QuizIntent::GoTo(2));
        vm.apply(QuizIntent::Next);
        assert_eq!(vm.current_index(), 2);
    }

    #[test]
    fn select_records_against_the_question_on_screen() {
        let mut vm = QuizVm::new(session());
        vm.apply(QuizIntent::Select("a".into()));
        vm.apply(QuizIntent::Next);
        assert_eq!(vm.current_answer(), None);
        vm.apply(QuizIntent::Previous);
        assert_eq!(vm.current_answer(), Some("a"));
        assert_eq!(vm.answered_count(), 1);
    }

    #[test]
    fn submit_goes_through_the_confirmation_gate() {
        let mut vm = QuizVm::new(session());
        vm.apply(QuizIntent::RequestSubmit);
        assert!(vm.confirming());
        assert!(!vm.is_finished());

        vm.apply(QuizIntent::CancelSubmit);
        assert!(!vm.confirming());
        assert!(!vm.is_finished());

        vm.apply(QuizIntent::RequestSubmit);
        vm.apply(QuizIntent::ConfirmSubmit);
        assert!(vm.is_finished());
        // A finished session does not re-open the dialog.
        vm.apply(QuizIntent::RequestSubmit);
        assert!(!vm.confirming());
    }

    #[test]
    fn expiry_drops_a_pending_confirmation() {
        let mut vm = QuizVm::new(session());
        vm.apply(QuizIntent::RequestSubmit);
        while matches!(vm.tick(), TickOutcome::Running(_)) {}
        assert!(vm.is_finished());
        assert!(!vm.confirming());
    }
}
