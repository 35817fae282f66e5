// src/services/auth.rs
//
// Provedor de sessão simulado: não existe verificação de senha.
// Dois e-mails especiais forçam os caminhos de erro.

use std::sync::{Arc, RwLock};

use crate::{
    common::error::AppError,
    db::SessionRepository,
    models::auth::{SessionState, User},
};

const REJECTED_LOGIN_EMAIL: &str = "error@test.com";
const EXISTING_ACCOUNT_EMAIL: &str = "exists@test.com";
const MIN_SIGNUP_PASSWORD_CHARS: usize = 6;

#[derive(Clone)]
pub struct AuthService {
    repo: SessionRepository,
    state: Arc<RwLock<SessionState>>,
}

impl AuthService {
    pub fn new(repo: SessionRepository) -> Self {
        Self {
            repo,
            state: Arc::new(RwLock::new(SessionState::Loading)),
        }
    }

    /// Reads the persisted session once at start-up. An unreadable value
    /// counts as no session.
    pub fn restore(&self) -> SessionState {
        let restored = match self.repo.load() {
            Some(user) => {
                tracing::info!(email = %user.email, "Session restored");
                SessionState::Authenticated { user }
            }
            None => SessionState::Anonymous,
        };
        self.set_state(restored.clone());
        restored
    }

    pub fn state(&self) -> SessionState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    pub fn login(&self, email: &str, _password: &str) -> Result<User, AppError> {
        if email.eq_ignore_ascii_case(REJECTED_LOGIN_EMAIL) {
            tracing::warn!(email, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }
        self.authenticate(email)
    }

    // Só o cadastro exige tamanho mínimo; o login aceita qualquer senha
    pub fn signup(&self, email: &str, password: &str) -> Result<User, AppError> {
        if password.chars().count() < MIN_SIGNUP_PASSWORD_CHARS {
            return Err(AppError::ValidationError(
                "Password must be at least 6 characters long.".to_string(),
            ));
        }
        if email.eq_ignore_ascii_case(EXISTING_ACCOUNT_EMAIL) {
            return Err(AppError::AccountExists);
        }
        self.authenticate(email)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.repo.clear()?;
        self.set_state(SessionState::Anonymous);
        tracing::info!("Session closed");
        Ok(())
    }

    fn authenticate(&self, email: &str) -> Result<User, AppError> {
        let user = User {
            email: email.to_string(),
        };
        // Persiste antes de trocar o estado em memória
        self.repo.save(&user)?;
        self.set_state(SessionState::Authenticated { user: user.clone() });
        tracing::info!(email, "✅ User authenticated");
        Ok(user)
    }

    fn set_state(&self, next: SessionState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{store::keys, Store};

    fn service(store: &Store) -> AuthService {
        AuthService::new(SessionRepository::new(store.clone()))
    }

    #[test]
    fn starts_loading_then_restores() {
        let store = Store::in_memory();
        let auth = service(&store);
        assert_eq!(auth.state(), SessionState::Loading);
        assert_eq!(auth.restore(), SessionState::Anonymous);

        auth.login("ana@shop.com", "whatever").unwrap();

        let reopened = service(&store);
        assert_eq!(reopened.restore().user().unwrap().email, "ana@shop.com");
    }

    #[test]
    fn sentinel_emails_fail_in_any_case() {
        let store = Store::in_memory();
        let auth = service(&store);
        auth.restore();

        assert!(matches!(auth.login("Error@Test.com", "x"), Err(AppError::InvalidCredentials)));
        assert!(matches!(auth.signup("EXISTS@test.com", "secret1"), Err(AppError::AccountExists)));
        assert_eq!(auth.current_user(), None);
    }

    #[test]
    fn corrupt_session_is_anonymous_and_logout_clears() {
        let store = Store::in_memory();
        store.save_raw(keys::SESSION_USER, "{{oops").unwrap();
        let auth = service(&store);
        assert_eq!(auth.restore(), SessionState::Anonymous);

        auth.signup("new@shop.com", "secret1").unwrap();
        auth.logout().unwrap();
        assert_eq!(auth.state(), SessionState::Anonymous);
        assert_eq!(service(&store).restore(), SessionState::Anonymous);
    }

    #[test]
    fn signup_needs_six_characters_but_login_does_not() {
        let store = Store::in_memory();
        let auth = service(&store);
        auth.restore();

        let err = auth.signup("new@shop.com", "12345").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters long.");
        // O tamanho é checado antes do e-mail especial
        assert!(matches!(auth.signup("exists@test.com", "x"), Err(AppError::ValidationError(_))));
        assert_eq!(auth.current_user(), None);

        auth.login("new@shop.com", "x").unwrap();
        assert!(auth.current_user().is_some());
    }
}
