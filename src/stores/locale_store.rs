// ============================================================================
// LOCALE STORE - Idioma activo, restaurado y persistido en storage
// ============================================================================

use crate::models::Locale;
use crate::state::ReactiveState;
use crate::stores::PreferenceStore;
use crate::utils::constants::LOCALE_KEY;

#[derive(Clone)]
pub struct LocaleStore {
    prefs: PreferenceStore,
    locale: ReactiveState<Locale>,
}

impl LocaleStore {
    /// Restaurar idioma guardado; ausente o desconocido → `en`
    pub fn load(prefs: PreferenceStore) -> Self {
        let saved = prefs.get(LOCALE_KEY, Locale::En.code());
        let locale = Locale::from_code(&saved).unwrap_or_else(|| {
            log::warn!("⚠️ [PREFS] Idioma guardado desconocido '{}', usando en", saved);
            Locale::En
        });
        log::info!("🌐 [PREFS] Idioma: {}", locale);

        Self {
            prefs,
            locale: ReactiveState::new(locale),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale.get()
    }

    /// Persistir primero: los subscribers ya ven el valor en storage
    pub fn set_locale(&self, locale: Locale) {
        self.prefs.set(LOCALE_KEY, locale.code());
        self.locale.set(locale);
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Locale) + 'static,
    {
        self.locale.subscribe(callback);
    }
}
