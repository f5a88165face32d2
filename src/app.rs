// ============================================================================
// APP - Bootstrap: arma cada componente sobre backends compartidos
// ============================================================================

use std::rc::Rc;
use crate::config::AppConfig;
use crate::models::RouteRecord;
use crate::services::{
    ApiClient, AuthGuard, AuthHeaderInjector, BrowserHistory, HistoryBackend, NavigationOutcome,
    Router, RouterError, RouteTable, SessionProbe,
};
use crate::stores::{LocaleStore, PreferenceStore, ThemeStore};
use crate::utils::constants::{PAGES, ROOT_PATH};
use crate::utils::cookies::{CookieSource, DocumentCookies};
use crate::utils::i18n::{I18nError, LocaleResolver};
use crate::utils::storage::{KeyValueStorage, LocalStorage};

pub struct App {
    config: AppConfig,
    locale: LocaleStore,
    theme: ThemeStore,
    i18n: LocaleResolver,
    session: SessionProbe,
    router: Router<AuthGuard>,
    api: ApiClient,
    history: Rc<dyn HistoryBackend>,
}

impl App {
    pub fn bootstrap(
        config: AppConfig,
        storage: Rc<dyn KeyValueStorage>,
        cookies: Rc<dyn CookieSource>,
        history: Rc<dyn HistoryBackend>,
    ) -> Result<Self, I18nError> {
        let prefs = PreferenceStore::new(storage);
        let locale = LocaleStore::load(prefs.clone());
        let theme = ThemeStore::load(prefs);
        let i18n = LocaleResolver::bundled(locale.clone())?;

        let session = SessionProbe::new(cookies);
        let table = RouteTable::with_pages(PAGES.iter().map(|page| RouteRecord::page(page)));
        let router = Router::new(table, AuthGuard::new(session.clone()), history.clone());
        let api = ApiClient::new(&config).with_augmenter(AuthHeaderInjector::new(session.clone()));

        log::info!(
            "🚀 [APP] Inicializada ({}, api: {})",
            config.environment,
            config.api_host
        );

        Ok(Self {
            config,
            locale,
            theme,
            i18n,
            session,
            router,
            api,
            history,
        })
    }

    /// Conectada a localStorage, document.cookie y window.history
    pub fn browser(config: AppConfig) -> Result<Self, I18nError> {
        let history = Rc::new(BrowserHistory::new(&config.base_path));
        Self::bootstrap(
            config,
            Rc::new(LocalStorage),
            Rc::new(DocumentCookies),
            history,
        )
    }

    /// Pasar el guard sobre la ubicación actual del backend de history, al
    /// arrancar y tras atrás/adelante. Usa replace para no duplicar la entrada.
    pub fn sync_location(&self) -> Result<NavigationOutcome, RouterError> {
        let location = self
            .history
            .current_path()
            .unwrap_or_else(|| ROOT_PATH.to_string());
        self.router.replace(&location)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn locale(&self) -> &LocaleStore {
        &self.locale
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn i18n(&self) -> &LocaleResolver {
        &self.i18n
    }

    pub fn session(&self) -> &SessionProbe {
        &self.session
    }

    pub fn router(&self) -> &Router<AuthGuard> {
        &self.router
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Locale, Theme};
    use crate::services::{MemoryHistory, Method};
    use crate::utils::cookies::StaticCookies;
    use crate::utils::storage::MemoryStorage;

    struct Harness {
        storage: MemoryStorage,
        cookies: StaticCookies,
        history: MemoryHistory,
    }

    impl Harness {
        fn new(cookie_header: &str, start: &str) -> Self {
            Self {
                storage: MemoryStorage::new(),
                cookies: StaticCookies::new(cookie_header),
                history: MemoryHistory::starting_at(start),
            }
        }

        fn boot(&self) -> App {
            App::bootstrap(
                AppConfig::default(),
                Rc::new(self.storage.clone()),
                Rc::new(self.cookies.clone()),
                Rc::new(self.history.clone()),
            )
            .unwrap()
        }
    }

    #[test]
    fn test_fresh_start_defaults() {
        let harness = Harness::new("", "/");
        let app = harness.boot();
        assert_eq!(app.locale().locale(), Locale::En);
        assert_eq!(app.theme().theme(), Theme::Light);
        assert_eq!(app.sync_location().unwrap().resolved.path, "/home");
        assert_eq!(harness.history.entries(), vec!["/home"]);
    }

    #[test]
    fn test_start_applies_guard_to_initial_location() {
        let harness = Harness::new("a=b", "/dashboard/settings");
        let app = harness.boot();
        assert_eq!(app.sync_location().unwrap().resolved.path, "/login");
        assert_eq!(harness.history.entries(), vec!["/login"]);
    }

    #[test]
    fn test_preferences_survive_restart() {
        let harness = Harness::new("", "/");
        let app = harness.boot();
        app.i18n().set_locale(Locale::Zh);
        app.theme().toggle_theme();
        assert_eq!(app.i18n().t("nav.home"), "首页");

        let restarted = harness.boot();
        assert_eq!(restarted.locale().locale(), Locale::Zh);
        assert!(restarted.theme().is_dark());
        assert_eq!(restarted.i18n().t("nav.home"), "首页");
    }

    #[test]
    fn test_guard_and_client_share_the_cookie_jar() {
        let harness = Harness::new("", "/");
        let app = harness.boot();
        let anonymous = app.api().prepare(Ok(app.api().request(Method::Get, "/me"))).unwrap();
        assert_eq!(anonymous.header("Authorization"), None);

        harness.cookies.replace("lang=en; token=abc123");
        assert_eq!(app.router().push("/login").unwrap().resolved.path, "/dashboard/home");
        let request = app.api().prepare(Ok(app.api().request(Method::Get, "/me"))).unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer abc123"));
        assert!(app.session().has_token());
    }
}
