#![forbid(unsafe_code)]

pub mod admin_service;
pub mod auth;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use admin_service::{CategoryGroup, QuestionAdminService};
pub use auth::{AuthService, AuthState, Gender, RegisterForm, Role, UserProfile};
pub use error::{AdminError, AuthError, GatewayError, QuizError};
pub use gateway::{
    AuthReply, BearerSlot, LoginBody, QuestionGateway, QuestionPayload, QuestionRecord,
    RegisterBody,
};
pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use quiz_service::{CategorySummary, QuizCatalog, QuizService};
