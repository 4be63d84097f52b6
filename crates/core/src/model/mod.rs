mod ids;
mod question;
mod result;
mod session;
mod settings;
mod tracker;

pub use ids::QuestionId;
pub use question::{Difficulty, Question, QuestionDraft, QuestionError, ValidatedQuestion};
pub use result::ResultSummary;
pub use session::{QuizSession, SessionError, TickOutcome};
pub use settings::{QuizSettings, QuizType};
pub use tracker::TrackerDot;
