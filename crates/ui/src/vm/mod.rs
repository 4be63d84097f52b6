mod question_form;
mod quiz_vm;
mod time_fmt;

pub use question_form::QuestionFormVm;
pub use quiz_vm::{
    QuizIntent, QuizVm, parse_route_settings, quiz_type_segment, start_quiz,
};
pub use time_fmt::{format_clock, format_datetime};
