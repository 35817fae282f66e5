// src/db/store.rs
//
// Armazenamento chave-valor no estilo do localStorage do navegador:
// cada chave guarda um documento JSON inteiro, sobrescrito a cada gravação.

use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use crate::common::error::AppError;

// Chaves lógicas dos registros persistidos
pub mod keys {
    pub const CAMPAIGNS: &str = "campaigns_v4";
    pub const LEADS: &str = "leads_v4";
    pub const SESSION_USER: &str = "user";
    pub const USER_PROFILE: &str = "userProfile";
    pub const USER_NOTIFICATIONS: &str = "userNotifications";
    pub const INTEGRATIONS: &str = "integrations";
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

// =============================================================================
//  BACKEND EM ARQUIVO (um arquivo .json por chave)
// =============================================================================

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        // Escreve num temporário e renomeia: o arquivo nunca fica pela metade
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
//  BACKEND EM MEMÓRIA (testes), com cota opcional como a do navegador
// =============================================================================

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes once the total stored size would exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());

        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(AppError::PersistenceError(format!(
                    "storage quota of {} bytes exceeded",
                    quota
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
//  ACESSOR TIPADO
// =============================================================================

#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Reads and parses `key`. A missing key, an unreadable backend or a
    /// corrupt value all yield `T::default()`; corruption is logged.
    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.load_optional(key).unwrap_or_default()
    }

    pub fn load_optional<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read from store");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt value in store, falling back to default");
                None
            }
        }
    }

    /// Like `load`, but a corrupt value or a failed read is an error.
    /// Used before overwriting a collection, so bad data is never replaced
    /// by an empty one.
    pub fn load_strict<T>(&self, key: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                tracing::error!(key, error = %e, "Corrupt value in store, refusing to overwrite");
                AppError::PersistenceError(format!("stored value for '{}' is unreadable", key))
            }),
            None => Ok(T::default()),
        }
    }

    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        self.backend.remove(key)
    }

    /// Raw write, bypassing serialization.
    pub fn save_raw(&self, key: &str, raw: &str) -> Result<(), AppError> {
        self.backend.set(key, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Counter {
        hits: u32,
    }

    #[test]
    fn missing_key_loads_default() {
        let store = Store::in_memory();
        let items: Vec<String> = store.load("nothing-here");
        assert!(items.is_empty());
        assert_eq!(store.load_optional::<Counter>("nothing-here"), None);
    }

    #[test]
    fn corrupt_value_loads_default() {
        let store = Store::in_memory();
        store.save_raw(keys::LEADS, "{not json").unwrap();
        let items: Vec<Counter> = store.load(keys::LEADS);
        assert!(items.is_empty());
    }

    #[test]
    fn strict_load_reports_corruption() {
        let store = Store::in_memory();
        assert!(store.load_strict::<Vec<Counter>>(keys::LEADS).unwrap().is_empty());

        store.save_raw(keys::LEADS, "{not json").unwrap();
        let err = store.load_strict::<Vec<Counter>>(keys::LEADS).unwrap_err();
        assert!(matches!(err, AppError::PersistenceError(_)));
    }

    #[test]
    fn save_then_load() {
        let store = Store::in_memory();
        store.save("counter", &Counter { hits: 3 }).unwrap();
        assert_eq!(store.load::<Counter>("counter"), Counter { hits: 3 });
        store.remove("counter").unwrap();
        assert_eq!(store.load::<Counter>("counter"), Counter::default());
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let store = Store::new(Arc::new(MemoryStore::with_quota(32)));
        store.save("a", &"short").unwrap();
        let err = store.save("b", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, AppError::PersistenceError(_)));
        // O valor anterior continua lá
        assert_eq!(store.load::<String>("a"), "short");
    }

    #[test]
    fn file_store_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStore::open(dir.path()).unwrap();
        assert_eq!(backend.get(keys::CAMPAIGNS).unwrap(), None);

        backend.set(keys::CAMPAIGNS, "[]").unwrap();
        assert_eq!(backend.get(keys::CAMPAIGNS).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("campaigns_v4.json").exists());

        backend.remove(keys::CAMPAIGNS).unwrap();
        backend.remove(keys::CAMPAIGNS).unwrap();
        assert_eq!(backend.get(keys::CAMPAIGNS).unwrap(), None);
    }
}
