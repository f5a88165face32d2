// ============================================================================
// I18N - Catálogos embebidos + resolución del idioma activo
// ============================================================================

use std::collections::HashMap;
use serde_json::Value;
use thiserror::Error;
use crate::models::Locale;
use crate::stores::LocaleStore;

const EN_MESSAGES: &str = include_str!("../../locales/en.json");
const ZH_MESSAGES: &str = include_str!("../../locales/zh.json");

/// Catálogo consultado cuando al activo le falta una clave
pub const FALLBACK_LOCALE: Locale = Locale::En;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("catalog '{locale}' is not valid JSON: {source}")]
    InvalidJson {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog '{locale}' must be a JSON object at the top level")]
    NotAnObject { locale: Locale },
}

/// Mapa plano clave → mensaje. Objetos JSON anidados → claves con puntos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn from_json(locale: Locale, source: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(source)
            .map_err(|source| I18nError::InvalidJson { locale, source })?;
        let Value::Object(root) = value else {
            return Err(I18nError::NotAnObject { locale });
        };

        let mut messages = HashMap::new();
        flatten_into(&mut messages, "", &root);
        Ok(Self { messages })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: &str, object: &serde_json::Map<String, Value>) {
    for (key, value) in object {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::String(message) => {
                out.insert(full_key, message.clone());
            }
            Value::Object(nested) => flatten_into(out, &full_key, nested),
            other => {
                log::debug!("[I18N] Ignorando mensaje no string '{}': {}", full_key, other);
            }
        }
    }
}

/// Resuelve claves en el idioma activo, con fallback a `en`. El idioma
/// vive en `LocaleStore`: un cambio por cualquier handle aplica en la
/// siguiente búsqueda.
#[derive(Clone)]
pub struct LocaleResolver {
    catalogs: HashMap<Locale, Catalog>,
    store: LocaleStore,
}

impl LocaleResolver {
    /// Cargar los dos catálogos compilados en el binario
    pub fn bundled(store: LocaleStore) -> Result<Self, I18nError> {
        let mut catalogs = HashMap::new();
        catalogs.insert(Locale::En, Catalog::from_json(Locale::En, EN_MESSAGES)?);
        catalogs.insert(Locale::Zh, Catalog::from_json(Locale::Zh, ZH_MESSAGES)?);
        log::info!(
            "🌐 [I18N] Catálogos cargados (en: {}, zh: {})",
            catalogs[&Locale::En].len(),
            catalogs[&Locale::Zh].len()
        );
        Ok(Self::new(store, catalogs))
    }

    pub fn new(store: LocaleStore, catalogs: HashMap<Locale, Catalog>) -> Self {
        Self { catalogs, store }
    }

    pub fn locale(&self) -> Locale {
        self.store.locale()
    }

    /// Cambiar y persistir el idioma activo
    pub fn set_locale(&self, locale: Locale) {
        self.store.set_locale(locale);
    }

    /// Mensaje de `key`, o `None` si ningún catálogo la tiene
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let active = self.locale();
        self.catalog_get(active, key).or_else(|| {
            if active == FALLBACK_LOCALE {
                return None;
            }
            log::debug!("[I18N] '{}' no está en {}, usando {}", key, active, FALLBACK_LOCALE);
            self.catalog_get(FALLBACK_LOCALE, key)
        })
    }

    /// Mensaje traducido; la propia clave si no se resuelve
    pub fn t(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(message) => message.to_string(),
            None => {
                log::warn!("⚠️ [I18N] Clave sin resolver '{}'", key);
                key.to_string()
            }
        }
    }

    /// Igual que `t`, reemplazando placeholders `{name}`
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.t(key), |message, (name, value)| {
            message.replace(&format!("{{{}}}", name), value)
        })
    }

    fn catalog_get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.catalogs.get(&locale)?.get(key)
    }
}
