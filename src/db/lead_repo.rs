// src/db/lead_repo.rs

use std::sync::{Arc, Mutex};

use crate::{
    common::error::AppError,
    db::store::{keys, Store},
    models::lead::Lead,
};

// O repositório de leads. A coleção inteira é regravada a cada mutação;
// o lock só serializa ler-modificar-gravar dentro deste processo.
#[derive(Clone)]
pub struct LeadRepository {
    store: Store,
    write_lock: Arc<Mutex<()>>,
}

impl LeadRepository {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // Sub-coleções ausentes já chegam vazias (serde default no model)
    pub fn list_all(&self) -> Vec<Lead> {
        self.store.load(keys::LEADS)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Lead> {
        self.list_all().into_iter().find(|l| l.id == id)
    }

    /// Loads the collection, applies `f` and writes everything back.
    /// Nothing is written when `f` fails or the stored value is unreadable.
    pub fn update<R, F>(&self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Vec<Lead>) -> Result<R, AppError>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut leads: Vec<Lead> = self.store.load_strict(keys::LEADS)?;
        let result = f(&mut leads)?;
        self.store.save(keys::LEADS, &leads)?;
        Ok(result)
    }

    pub fn update_lead<R, F>(&self, id: &str, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Lead) -> Result<R, AppError>,
    {
        self.update(|leads| {
            let lead = leads
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or(AppError::LeadNotFound)?;
            f(lead)
        })
    }

    pub fn append(&self, new_leads: Vec<Lead>) -> Result<(), AppError> {
        self.update(|leads| {
            leads.extend(new_leads);
            Ok(())
        })
    }

    // Lead manual entra no topo da lista
    pub fn prepend(&self, lead: Lead) -> Result<(), AppError> {
        self.update(|leads| {
            leads.insert(0, lead);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{KeyValueStore, MemoryStore};

    #[test]
    fn corrupt_collection_is_not_overwritten() {
        let backend = Arc::new(MemoryStore::new());
        let raw = "[{\"id\": broken";
        backend.set(keys::LEADS, raw).unwrap();
        let repo = LeadRepository::new(Store::new(backend.clone()));

        let result = repo.update(|leads| {
            leads.clear();
            Ok(())
        });
        assert!(matches!(result, Err(AppError::PersistenceError(_))));
        assert!(matches!(repo.update_lead("x", |_| Ok(())), Err(AppError::PersistenceError(_))));

        // Leitura continua tolerante; o valor gravado fica intacto
        assert!(repo.list_all().is_empty());
        assert_eq!(backend.get(keys::LEADS).unwrap().as_deref(), Some(raw));
    }
}
