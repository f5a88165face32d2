// ============================================================================
// THEME STORE - Tema claro/oscuro, restaurado y persistido en storage
// ============================================================================

use crate::models::Theme;
use crate::state::ReactiveState;
use crate::stores::PreferenceStore;
use crate::utils::constants::THEME_KEY;

#[derive(Clone)]
pub struct ThemeStore {
    prefs: PreferenceStore,
    theme: ReactiveState<Theme>,
}

impl ThemeStore {
    pub fn load(prefs: PreferenceStore) -> Self {
        let theme = Theme::from_stored(prefs.get_raw(THEME_KEY).as_deref());
        log::info!("🎨 [PREFS] Tema: {}", theme.as_str());

        Self {
            prefs,
            theme: ReactiveState::new(theme),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn is_dark(&self) -> bool {
        self.theme().is_dark()
    }

    /// Alternar claro/oscuro y persistir el resultado
    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    /// Persistir primero: los subscribers ya ven el valor en storage
    pub fn set_theme(&self, theme: Theme) {
        self.prefs.set(THEME_KEY, theme.as_str());
        self.theme.set(theme);
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Theme) + 'static,
    {
        self.theme.subscribe(callback);
    }
}
