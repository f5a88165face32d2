// ============================================================================
// PREFERENCE STORE - Preferencias escalares con nombre sobre storage durable
// ============================================================================

use std::rc::Rc;
use crate::utils::storage::KeyValueStorage;

#[derive(Clone)]
pub struct PreferenceStore {
    backend: Rc<dyn KeyValueStorage>,
}

impl PreferenceStore {
    pub fn new(backend: Rc<dyn KeyValueStorage>) -> Self {
        Self { backend }
    }

    /// Valor guardado, o `default` si no hay nada bajo `key`
    pub fn get(&self, key: &str, default: &str) -> String {
        self.backend
            .get_item(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Lectura cruda, para quien trata la ausencia aparte
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.backend.get_item(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        log::debug!("💾 [PREFS] {} = {}", key, value);
        self.backend.set_item(key, value);
    }
}
