use quiz_core::model::{Difficulty, Question, QuestionDraft, QuestionId};

/// String-typed state behind the admin question form.
///
/// Everything stays a string until submit; `to_draft` coerces the numeric
/// fields the way a web form would, with unparseable input becoming zero so
/// domain validation produces the user-facing error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionFormVm {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub marks: String,
    pub negative_marking: bool,
    pub negative_marks: String,
    /// `Some` while editing an existing question.
    pub editing: Option<QuestionId>,
}

impl Default for QuestionFormVm {
    fn default() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(); 4],
            correct_answer: String::new(),
            category: String::new(),
            difficulty: Difficulty::Medium,
            marks: "1".to_string(),
            negative_marking: false,
            negative_marks: "0".to_string(),
            editing: None,
        }
    }
}

impl QuestionFormVm {
    /// Prefill the form from an existing question for editing.
    #[must_use]
    pub fn edit(question: &Question) -> Self {
        let draft = question.to_draft();
        let mut options = draft.options;
        // The form always shows four option slots.
        options.resize(4, String::new());
        Self {
            text: draft.text,
            options,
            correct_answer: draft.correct_answer,
            category: draft.category,
            difficulty: draft.difficulty,
            marks: draft.marks.to_string(),
            negative_marking: draft.negative_marking,
            negative_marks: draft.negative_marks.to_string(),
            editing: Some(question.id().clone()),
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_option(&mut self, index: usize, value: String) {
        if let Some(slot) = self.options.get_mut(index) {
            *slot = value;
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            text: self.text.clone(),
            options: self.options.clone(),
            correct_answer: self.correct_answer.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
            marks: self.marks.trim().parse().unwrap_or(0),
            negative_marking: self.negative_marking,
            negative_marks: self.negative_marks.trim().parse().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;

    #[test]
    fn blank_form_fails_validation_not_parsing() {
        let draft = QuestionFormVm::default().to_draft();
        assert!(matches!(
            draft.validate(),
            Err(QuestionError::EmptyText)
        ));
    }

    #[test]
    fn unparseable_marks_become_zero_and_fail_validation() {
        let mut form = QuestionFormVm {
            text: "2 + 2?".into(),
            correct_answer: "4".into(),
            category: "Aptitude".into(),
            marks: "lots".into(),
            ..QuestionFormVm::default()
        };
        form.set_option(0, "3".into());
        form.set_option(1, "4".into());

        assert!(matches!(
            form.to_draft().validate(),
            Err(QuestionError::ZeroMarks)
        ));
    }

    #[test]
    fn edit_round_trips_through_the_form() {
        let question = QuestionDraft {
            text: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            correct_answer: "4".into(),
            category: "Aptitude".into(),
            difficulty: Difficulty::High,
            marks: 2,
            negative_marking: true,
            negative_marks: 1,
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new("q1"), None);

        let form = QuestionFormVm::edit(&question);
        assert!(form.is_editing());
        assert_eq!(form.options.len(), 4);
        assert_eq!(form.marks, "2");

        let validated = form.to_draft().validate().unwrap();
        assert_eq!(validated.text, "2 + 2?");
        assert_eq!(validated.negative_marks, 1);
    }
}
