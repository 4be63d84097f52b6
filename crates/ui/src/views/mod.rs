mod admin;
mod dashboard;
mod login;
mod quiz;
mod register;
mod state;

pub use admin::AdminView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use quiz::QuizView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
