// ============================================================================
// STORAGE - Almacenamiento clave/valor durable (localStorage o memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use gloo_storage::Storage as _;

/// Storage durable de strings por clave
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    /// Los fallos de escritura no se reportan al llamador
    fn set_item(&self, key: &str, value: &str);
}

/// `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        gloo_storage::LocalStorage::raw().get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if gloo_storage::LocalStorage::raw().set_item(key, value).is_err() {
            log::warn!("⚠️ [STORAGE] No se pudo escribir '{}' en localStorage", key);
        }
    }
}

/// Backend en memoria. Los clones comparten el mapa: un reinicio se simula
/// armando stores nuevos sobre un clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        for (key, value) in items {
            storage.set_item(key, value);
        }
        storage
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}
