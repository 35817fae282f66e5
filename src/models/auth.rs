// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// A sessão guarda só o e-mail. Nenhuma senha é persistida.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    // Enquanto a sessão salva ainda não foi lida
    Loading,
    Anonymous,
    Authenticated { user: User },
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user } => Some(user),
            _ => None,
        }
    }
}

// Dados para login e cadastro (mesmo formato)
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsPayload {
    #[validate(email(message = "The email provided is invalid."))]
    pub email: String,
    // Aceita qualquer valor: a senha nunca é verificada
    #[serde(default)]
    pub password: String,
}
