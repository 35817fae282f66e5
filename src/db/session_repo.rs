// src/db/session_repo.rs

use crate::{
    common::error::AppError,
    db::store::{keys, Store},
    models::auth::User,
};

// Espelho persistido da sessão atual (apenas o e-mail)
#[derive(Clone)]
pub struct SessionRepository {
    store: Store,
}

impl SessionRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<User> {
        self.store.load_optional(keys::SESSION_USER)
    }

    pub fn save(&self, user: &User) -> Result<(), AppError> {
        self.store.save(keys::SESSION_USER, user)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(keys::SESSION_USER)
    }
}
