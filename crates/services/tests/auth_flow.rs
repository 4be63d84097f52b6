use std::sync::Arc;

use quiz_core::time::{FIXED_TEST_TIMESTAMP, fixed_clock};
use services::memory::mint_token;
use services::{
    AuthError, AuthService, AuthState, BearerSlot, Gender, MemoryGateway, RegisterForm, Role,
};
use storage::{MemoryTokenStore, TokenRepository};

fn service(
    gateway: Arc<MemoryGateway>,
    tokens: Arc<MemoryTokenStore>,
    bearer: BearerSlot,
) -> AuthService {
    AuthService::new(
        gateway,
        tokens,
        bearer,
        fixed_clock(),
        Some("HIRING-2025".to_string()),
    )
}

fn register_form(company_key: &str) -> RegisterForm {
    RegisterForm {
        username: "dana".into(),
        name: "Dana Voss".into(),
        email: "dana@example.com".into(),
        age: 29,
        gender: Gender::Other,
        password: "hunter22".into(),
        password_confirm: "hunter22".into(),
        company_key: company_key.into(),
    }
}

#[tokio::test]
async fn login_stores_token_and_initialize_restores_it() {
    let gateway = Arc::new(MemoryGateway::new());
    let token = mint_token("ben", Role::User, FIXED_TEST_TIMESTAMP + 3600);
    gateway.add_account("ben@example.com", "hunter2", &token);

    let tokens = Arc::new(MemoryTokenStore::new());
    let bearer = BearerSlot::new();
    let auth = service(gateway, Arc::clone(&tokens), bearer.clone());

    let state = auth.login("ben@example.com", "hunter2", false).await.unwrap();
    assert!(state.is_signed_in());
    assert!(!state.is_admin());
    assert_eq!(tokens.load().unwrap().as_deref(), Some(token.as_str()));
    assert_eq!(bearer.get().as_deref(), Some(token.as_str()));

    // A fresh service over the same store picks the session back up.
    let restored = service(
        Arc::new(MemoryGateway::new()),
        Arc::clone(&tokens),
        BearerSlot::new(),
    )
    .initialize();
    assert_eq!(restored.user().map(|u| u.username.as_str()), Some("ben"));
}

#[tokio::test]
async fn wrong_password_surfaces_the_server_message() {
    let gateway = Arc::new(MemoryGateway::new());
    let token = mint_token("ben", Role::User, FIXED_TEST_TIMESTAMP + 3600);
    gateway.add_account("ben@example.com", "hunter2", &token);

    let auth = service(gateway, Arc::new(MemoryTokenStore::new()), BearerSlot::new());
    let err = auth
        .login("ben@example.com", "wrong", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Rejected(message) if message == "Invalid credentials"));
}

#[tokio::test]
async fn admin_gate_rejects_a_user_token_and_stores_nothing() {
    let gateway = Arc::new(MemoryGateway::new());
    let token = mint_token("ben", Role::User, FIXED_TEST_TIMESTAMP + 3600);
    gateway.add_account("ben@example.com", "hunter2", &token);

    let tokens = Arc::new(MemoryTokenStore::new());
    let auth = service(gateway, Arc::clone(&tokens), BearerSlot::new());

    let err = auth
        .login("ben@example.com", "hunter2", true)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotAuthorizedAsAdmin));
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn expired_stored_token_is_discarded_silently() {
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens
        .save(&mint_token("ben", Role::User, FIXED_TEST_TIMESTAMP - 10))
        .unwrap();

    let auth = service(
        Arc::new(MemoryGateway::new()),
        Arc::clone(&tokens),
        BearerSlot::new(),
    );
    assert_eq!(auth.initialize(), AuthState::SignedOut);
    // The stale token is gone, not just ignored.
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn garbage_stored_token_is_discarded_silently() {
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.save("definitely-not-a-jwt").unwrap();

    let auth = service(
        Arc::new(MemoryGateway::new()),
        Arc::clone(&tokens),
        BearerSlot::new(),
    );
    assert_eq!(auth.initialize(), AuthState::SignedOut);
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn register_with_matching_key_creates_an_admin() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.set_register_exp(FIXED_TEST_TIMESTAMP + 3600);

    let auth = service(gateway, Arc::new(MemoryTokenStore::new()), BearerSlot::new());
    let state = auth.register(register_form("HIRING-2025")).await.unwrap();
    assert!(state.is_admin());
}

#[tokio::test]
async fn register_rejects_mismatched_passwords_before_any_request() {
    let auth = service(
        Arc::new(MemoryGateway::new()),
        Arc::new(MemoryTokenStore::new()),
        BearerSlot::new(),
    );
    let mut form = register_form("");
    form.password_confirm = "different".into();
    assert!(matches!(
        auth.register(form).await.unwrap_err(),
        AuthError::PasswordMismatch
    ));
}

#[tokio::test]
async fn register_rejects_a_wrong_company_key() {
    let auth = service(
        Arc::new(MemoryGateway::new()),
        Arc::new(MemoryTokenStore::new()),
        BearerSlot::new(),
    );
    assert!(matches!(
        auth.register(register_form("WRONG-KEY")).await.unwrap_err(),
        AuthError::InvalidCompanyKey
    ));
}

#[tokio::test]
async fn logout_clears_both_the_store_and_the_bearer_slot() {
    let gateway = Arc::new(MemoryGateway::new());
    let token = mint_token("ben", Role::User, FIXED_TEST_TIMESTAMP + 3600);
    gateway.add_account("ben@example.com", "hunter2", &token);

    let tokens = Arc::new(MemoryTokenStore::new());
    let bearer = BearerSlot::new();
    let auth = service(gateway, Arc::clone(&tokens), bearer.clone());

    auth.login("ben@example.com", "hunter2", false).await.unwrap();
    let state = auth.logout().unwrap();

    assert_eq!(state, AuthState::SignedOut);
    assert!(tokens.load().unwrap().is_none());
    assert!(bearer.get().is_none());
}
