use std::sync::Arc;

use services::{AuthService, QuestionAdminService, QuizService};

pub trait UiApp: Send + Sync {
    fn app_name(&self) -> &str;

    fn auth(&self) -> Arc<AuthService>;
    fn quizzes(&self) -> Arc<QuizService>;
    fn admin(&self) -> Arc<QuestionAdminService>;
}

#[derive(Clone)]
pub struct AppContext {
    app_name: String,

    auth: Arc<AuthService>,
    quizzes: Arc<QuizService>,
    admin: Arc<QuestionAdminService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app_name: app.app_name().to_string(),
            auth: app.auth(),
            quizzes: app.quizzes(),
            admin: app.admin(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<QuestionAdminService> {
        Arc::clone(&self.admin)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
