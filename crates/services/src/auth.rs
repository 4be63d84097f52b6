//! Auth lifecycle: one explicit state machine instead of ambient globals.
//!
//! The token is a JWT the client never verifies — it only decodes the
//! payload to learn who is signed in and when that stops being true. The
//! server remains the authority; a forged token buys nothing but a broken
//! session.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use quiz_core::Clock;
use storage::TokenRepository;

use crate::error::AuthError;
use crate::gateway::{BearerSlot, LoginBody, QuestionGateway, RegisterBody};

//
// ─── PROFILE / STATE ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// The identity carried inside the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
}

/// Current auth state, owned by the UI layer and replaced on transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedOut,
    SignedIn { user: UserProfile, token: String },
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::SignedOut => None,
            AuthState::SignedIn { user, .. } => Some(user),
        }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn { .. })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.role.is_admin())
    }
}

//
// ─── TOKEN DECODE ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct Claims {
    user: UserProfile,
    exp: i64,
}

/// Decode the payload segment of a JWT and check its expiry.
///
/// # Errors
///
/// Returns `AuthError::TokenInvalid` for anything that does not parse as
/// `header.payload.signature` with the expected claims, and
/// `AuthError::TokenExpired` once `exp` has passed.
pub fn decode_token(token: &str, clock: &Clock) -> Result<UserProfile, AuthError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::TokenInvalid);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::TokenInvalid)?;
    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::TokenInvalid)?;

    if claims.exp <= clock.now().timestamp() {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims.user)
}

//
// ─── REGISTRATION FORM ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Everything the register view collects before calling the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: Gender,
    pub password: String,
    pub password_confirm: String,
    /// Optional; the right key registers an admin, a wrong one is rejected
    /// before any request goes out.
    pub company_key: String,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Explicit `initialize` / `login` / `register` / `logout` transitions over
/// [`AuthState`]. Persists the raw token through a [`TokenRepository`] and
/// mirrors it into the gateway's [`BearerSlot`].
pub struct AuthService {
    gateway: Arc<dyn QuestionGateway>,
    tokens: Arc<dyn TokenRepository>,
    bearer: BearerSlot,
    clock: Clock,
    admin_key: Option<String>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn QuestionGateway>,
        tokens: Arc<dyn TokenRepository>,
        bearer: BearerSlot,
        clock: Clock,
        admin_key: Option<String>,
    ) -> Self {
        Self {
            gateway,
            tokens,
            bearer,
            clock,
            admin_key,
        }
    }

    /// Restore auth state from the stored token at startup.
    ///
    /// A missing, malformed, or expired token means signed out; the bad
    /// token is discarded silently (a log line, nothing user-facing).
    #[must_use]
    pub fn initialize(&self) -> AuthState {
        let stored = match self.tokens.load() {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!("token store unreadable, treating as signed out: {err}");
                return AuthState::SignedOut;
            }
        };
        let Some(token) = stored else {
            return AuthState::SignedOut;
        };

        match decode_token(&token, &self.clock) {
            Ok(user) => {
                self.bearer.set(Some(token.clone()));
                AuthState::SignedIn { user, token }
            }
            Err(err) => {
                log::info!("discarding stored token: {err}");
                if let Err(err) = self.tokens.clear() {
                    log::warn!("could not clear stale token: {err}");
                }
                AuthState::SignedOut
            }
        }
    }

    /// Sign in. With `admin_gate` set, a token that does not carry the
    /// admin role is rejected and never stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's message on refusal,
    /// `AuthError::NotAuthorizedAsAdmin` when the gate filters the login,
    /// and token/transport/storage errors otherwise.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        admin_gate: bool,
    ) -> Result<AuthState, AuthError> {
        let body = LoginBody {
            email: email.to_string(),
            password: password.to_string(),
        };
        let reply = self.gateway.login(&body).await?;

        if !reply.success {
            return Err(AuthError::Rejected(
                reply.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }
        let token = reply.token.ok_or(AuthError::TokenInvalid)?;
        let user = decode_token(&token, &self.clock)?;

        if admin_gate && !user.role.is_admin() {
            return Err(AuthError::NotAuthorizedAsAdmin);
        }

        self.store(&token)?;
        Ok(AuthState::SignedIn { user, token })
    }

    /// Create an account and sign in with the returned token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` or
    /// `AuthError::InvalidCompanyKey` before any request is made, and the
    /// same failures as [`AuthService::login`] afterwards.
    pub async fn register(&self, form: RegisterForm) -> Result<AuthState, AuthError> {
        if form.password != form.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        let role = self.resolve_role(form.company_key.trim())?;

        let body = RegisterBody {
            username: form.username,
            name: form.name,
            email: form.email,
            age: form.age,
            gender: form.gender.as_str().to_string(),
            password: form.password,
            role: role.as_str().to_string(),
        };
        let reply = self.gateway.register(&body).await?;

        if !reply.success {
            return Err(AuthError::Rejected(
                reply
                    .message
                    .unwrap_or_else(|| "Registration failed".to_string()),
            ));
        }
        let token = reply.token.ok_or(AuthError::TokenInvalid)?;
        let user = decode_token(&token, &self.clock)?;

        self.store(&token)?;
        Ok(AuthState::SignedIn { user, token })
    }

    /// Drop the stored token and the bearer slot.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` when the token file cannot be removed.
    pub fn logout(&self) -> Result<AuthState, AuthError> {
        self.bearer.set(None);
        self.tokens.clear()?;
        Ok(AuthState::SignedOut)
    }

    fn resolve_role(&self, company_key: &str) -> Result<Role, AuthError> {
        if company_key.is_empty() {
            return Ok(Role::User);
        }
        match &self.admin_key {
            Some(expected) if company_key == expected => Ok(Role::Admin),
            _ => Err(AuthError::InvalidCompanyKey),
        }
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        self.tokens.save(token)?;
        self.bearer.set(Some(token.to_string()));
        Ok(())
    }
}
