// ============================================================================
// ROUTER - Tabla de rutas, política dinámica y escrituras en history
// ============================================================================
// Dos mecanismos separados:
// - aliases estáticos en la tabla (`/` -> `/home`), resueltos antes de que
//   la política vea el destino
// - una `NavigationPolicy` consultada en cada intento, que puede redirigir
// ============================================================================

use std::collections::HashMap;
use std::rc::Rc;
use std::cell::RefCell;
use thiserror::Error;
use wasm_bindgen::JsValue;
use crate::models::{Route, RouteRecord};
use crate::services::navigation_guard::{Decision, NavigationPolicy};
use crate::state::ReactiveState;
use crate::utils::constants::{HOME_PATH, ROOT_PATH};

/// Máximo de redirects encadenados por navegación
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("navigation to '{target}' exceeded {hops} redirects")]
    RedirectLoop { target: String, hops: usize },
    #[error("history update failed: {0}")]
    History(String),
}

// ----------------------------------------------------------------------------
// Tabla de rutas
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
}

impl RouteTable {
    /// Páginas descubiertas, con el alias raíz primero
    pub fn with_pages(pages: impl IntoIterator<Item = RouteRecord>) -> Self {
        let mut records = vec![RouteRecord::alias(ROOT_PATH, HOME_PATH)];
        records.extend(pages);
        Self { records }
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Primer record que coincide con `path`, con sus params
    pub fn match_path(&self, path: &str) -> Option<(&RouteRecord, HashMap<String, String>)> {
        self.records
            .iter()
            .find_map(|record| record.matches(path).map(|params| (record, params)))
    }

    /// Seguir aliases estáticos hasta llegar a una ubicación real
    pub fn resolve_aliases(&self, route: Route) -> Result<Route, RouterError> {
        let target = route.full_path();
        let mut current = route;
        for _ in 0..=MAX_REDIRECTS {
            let alias = self
                .match_path(&current.path)
                .and_then(|(record, _)| record.redirect.clone());
            match alias {
                Some(next) => current = Route::parse(&next),
                None => return Ok(current),
            }
        }
        Err(RouterError::RedirectLoop {
            target,
            hops: MAX_REDIRECTS,
        })
    }
}

// ----------------------------------------------------------------------------
// Backends de history
// ----------------------------------------------------------------------------

pub trait HistoryBackend {
    fn push(&self, path: &str) -> Result<(), String>;
    fn replace(&self, path: &str) -> Result<(), String>;
    /// Ruta interna mostrada ahora, si el backend la conoce
    fn current_path(&self) -> Option<String>;
}

/// `window.history`, con cada ruta bajo `base_path`
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    base_path: String,
}

impl BrowserHistory {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn to_url(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    pub fn strip_base(&self, url_path: &str) -> String {
        let stripped = match url_path.strip_prefix(self.base_path.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => url_path,
        };
        if stripped.starts_with('/') {
            stripped.to_string()
        } else {
            format!("/{}", stripped)
        }
    }

    fn history(&self) -> Result<web_sys::History, String> {
        web_sys::window()
            .ok_or("No window available")?
            .history()
            .map_err(|e| format!("{:?}", e))
    }
}

impl HistoryBackend for BrowserHistory {
    fn push(&self, path: &str) -> Result<(), String> {
        self.history()?
            .push_state_with_url(&JsValue::NULL, "", Some(&self.to_url(path)))
            .map_err(|e| format!("{:?}", e))
    }

    fn replace(&self, path: &str) -> Result<(), String> {
        self.history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&self.to_url(path)))
            .map_err(|e| format!("{:?}", e))
    }

    fn current_path(&self) -> Option<String> {
        let location = web_sys::window()?.location();
        let path = location.pathname().ok()?;
        let search = location.search().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        Some(format!("{}{}{}", self.strip_base(&path), search, hash))
    }
}

/// Lista de entradas en memoria; los clones comparten entradas
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(path: &str) -> Self {
        let history = Self::new();
        history.entries.borrow_mut().push(path.to_string());
        history
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&self, path: &str) -> Result<(), String> {
        self.entries.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn replace(&self, path: &str) -> Result<(), String> {
        let mut entries = self.entries.borrow_mut();
        match entries.last_mut() {
            Some(last) => *last = path.to_string(),
            None => entries.push(path.to_string()),
        }
        Ok(())
    }

    fn current_path(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }
}

// ----------------------------------------------------------------------------
// Router
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Push,
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationOutcome {
    /// Ubicación pedida
    pub requested: Route,
    /// Ubicación confirmada
    pub resolved: Route,
    pub matched: Option<RouteRecord>,
    pub params: HashMap<String, String>,
    /// La ubicación ya era la actual; history no se tocó
    pub duplicate: bool,
}

impl NavigationOutcome {
    pub fn was_redirected(&self) -> bool {
        self.requested.path != self.resolved.path
    }
}

pub struct Router<P: NavigationPolicy> {
    table: RouteTable,
    policy: P,
    history: Rc<dyn HistoryBackend>,
    current: ReactiveState<Route>,
}

impl<P: NavigationPolicy> Router<P> {
    pub fn new(table: RouteTable, policy: P, history: Rc<dyn HistoryBackend>) -> Self {
        Self {
            table,
            policy,
            history,
            // Nada se confirma hasta la primera navegación
            current: ReactiveState::new(Route::parse(ROOT_PATH)),
        }
    }

    pub fn current(&self) -> Route {
        self.current.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Route) + 'static,
    {
        self.current.subscribe(callback);
    }

    pub fn push(&self, target: &str) -> Result<NavigationOutcome, RouterError> {
        self.navigate(target, NavigationMode::Push)
    }

    pub fn replace(&self, target: &str) -> Result<NavigationOutcome, RouterError> {
        self.navigate(target, NavigationMode::Replace)
    }

    /// Resolver aliases, correr la política (reinicia en cada redirect) y
    /// confirmar la ubicación final
    pub fn navigate(&self, target: &str, mode: NavigationMode) -> Result<NavigationOutcome, RouterError> {
        let from = self.current();
        let requested = Route::parse(target);
        let mut to = self.table.resolve_aliases(requested.clone())?;

        let mut hops = 0;
        while let Decision::Redirect(next) = self.policy.decide(&to, &from) {
            hops += 1;
            if hops > MAX_REDIRECTS {
                log::error!("❌ [ROUTER] Loop de redirects navegando a {}", target);
                return Err(RouterError::RedirectLoop {
                    target: target.to_string(),
                    hops: MAX_REDIRECTS,
                });
            }
            to = self.table.resolve_aliases(Route::parse(&next))?;
        }

        let (matched, params) = match self.table.match_path(&to.path) {
            Some((record, params)) => (Some(record.clone()), params),
            None => {
                log::warn!("⚠️ [ROUTER] Ninguna ruta coincide con {}", to.path);
                (None, HashMap::new())
            }
        };

        let full_path = to.full_path();
        let duplicate = self.history.current_path().as_deref() == Some(full_path.as_str());
        if !duplicate {
            let written = match mode {
                NavigationMode::Push => self.history.push(&full_path),
                NavigationMode::Replace => self.history.replace(&full_path),
            };
            written.map_err(RouterError::History)?;
        }

        log::info!("🧭 [ROUTER] {} -> {}", from.full_path(), full_path);
        self.current.set(to.clone());

        Ok(NavigationOutcome {
            requested,
            resolved: to,
            matched,
            params,
            duplicate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::navigation_guard::AuthGuard;
    use crate::services::session_probe::SessionProbe;
    use crate::utils::constants::PAGES;
    use crate::utils::cookies::StaticCookies;

    fn table() -> RouteTable {
        RouteTable::with_pages(PAGES.iter().map(|page| RouteRecord::page(page)))
    }

    fn router(cookies: &StaticCookies, history: &MemoryHistory) -> Router<AuthGuard> {
        let guard = AuthGuard::new(SessionProbe::new(Rc::new(cookies.clone())));
        Router::new(table(), guard, Rc::new(history.clone()))
    }

    struct AllowAll;

    impl NavigationPolicy for AllowAll {
        fn decide(&self, _to: &Route, _from: &Route) -> Decision {
            Decision::Allow
        }
    }

    /// Redirige cada intento a la otra de dos rutas
    struct PingPong;

    impl NavigationPolicy for PingPong {
        fn decide(&self, to: &Route, _from: &Route) -> Decision {
            if to.path == "/a" {
                Decision::Redirect("/b".into())
            } else {
                Decision::Redirect("/a".into())
            }
        }
    }

    #[test]
    fn test_root_alias_is_first_record() {
        let table = table();
        assert_eq!(table.records()[0], RouteRecord::alias("/", "/home"));
        let resolved = table.resolve_aliases(Route::parse("/")).unwrap();
        assert_eq!(resolved.path, "/home");
    }

    #[test]
    fn test_alias_loop_is_reported() {
        let table = RouteTable::with_pages([RouteRecord::alias("/home", "/")]);
        assert!(matches!(
            table.resolve_aliases(Route::parse("/")),
            Err(RouterError::RedirectLoop { .. })
        ));
    }

    #[test]
    fn test_root_goes_home_without_token() {
        let history = MemoryHistory::new();
        let outcome = router(&StaticCookies::new(""), &history).push("/").unwrap();
        assert_eq!(outcome.resolved.path, "/home");
        assert!(outcome.was_redirected());
        assert_eq!(history.entries(), vec!["/home"]);
    }

    #[test]
    fn test_signed_in_user_skips_login() {
        let history = MemoryHistory::new();
        let router = router(&StaticCookies::new("a=1; token=abc"), &history);
        let outcome = router.push("/login").unwrap();
        assert_eq!(outcome.resolved.path, "/dashboard/home");
        assert_eq!(router.current().path, "/dashboard/home");
    }

    #[test]
    fn test_deep_path_without_token_goes_to_login() {
        let history = MemoryHistory::new();
        let router = router(&StaticCookies::new("a=1"), &history);
        let outcome = router.push("/dashboard/settings/profile").unwrap();
        assert_eq!(outcome.resolved.path, "/login");
        assert_eq!(outcome.matched, Some(RouteRecord::page("/login")));
    }

    #[test]
    fn test_single_segment_without_token_is_allowed() {
        let history = MemoryHistory::new();
        let outcome = router(&StaticCookies::new(""), &history).push("/dashboard").unwrap();
        assert_eq!(outcome.resolved.path, "/dashboard");
        assert!(!outcome.was_redirected());
    }

    #[test]
    fn test_guard_sees_cookie_changes_between_navigations() {
        let cookies = StaticCookies::new("");
        let history = MemoryHistory::new();
        let router = router(&cookies, &history);
        assert_eq!(router.push("/dashboard/home").unwrap().resolved.path, "/login");

        cookies.replace("; token=abc");
        assert_eq!(router.push("/dashboard/home").unwrap().resolved.path, "/dashboard/home");
        assert_eq!(history.entries(), vec!["/login", "/dashboard/home"]);
    }

    #[test]
    fn test_duplicate_navigation_leaves_history_alone() {
        let history = MemoryHistory::new();
        let router = router(&StaticCookies::new(""), &history);
        assert!(!router.push("/home").unwrap().duplicate);
        assert!(router.push("/").unwrap().duplicate);
        assert!(!router.push("/home#top").unwrap().duplicate);
        assert_eq!(history.entries(), vec!["/home", "/home#top"]);
    }

    #[test]
    fn test_replace_overwrites_last_entry() {
        let history = MemoryHistory::starting_at("/dashboard/home");
        let router = router(&StaticCookies::new(""), &history);
        router.replace("/dashboard/home").unwrap();
        assert_eq!(history.entries(), vec!["/login"]);
    }

    #[test]
    fn test_unmatched_path_is_still_committed() {
        let history = MemoryHistory::new();
        let outcome = router(&StaticCookies::new(""), &history).push("/nowhere").unwrap();
        assert_eq!(outcome.matched, None);
        assert_eq!(history.entries(), vec!["/nowhere"]);
    }

    #[test]
    fn test_query_and_hash_are_kept() {
        let history = MemoryHistory::new();
        let outcome = router(&StaticCookies::new(""), &history).push("/home?tab=1#top").unwrap();
        assert_eq!(outcome.resolved.full_path(), "/home?tab=1#top");
        assert_eq!(history.entries(), vec!["/home?tab=1#top"]);
    }

    #[test]
    fn test_params_are_captured() {
        let table = RouteTable::with_pages([RouteRecord::named("/users/:id", "user")]);
        let router = Router::new(table, AllowAll, Rc::new(MemoryHistory::new()));
        let outcome = router.push("/users/7").unwrap();
        assert_eq!(outcome.params.get("id").map(String::as_str), Some("7"));
        assert_eq!(outcome.matched.and_then(|r| r.name).as_deref(), Some("user"));
    }

    #[test]
    fn test_policy_redirect_loop_is_bounded() {
        let history = MemoryHistory::new();
        let router = Router::new(table(), PingPong, Rc::new(history.clone()));
        assert_eq!(
            router.push("/a"),
            Err(RouterError::RedirectLoop {
                target: "/a".to_string(),
                hops: MAX_REDIRECTS
            })
        );
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_browser_history_base_path_handling() {
        let history = BrowserHistory::new("/app/");
        assert_eq!(history.to_url("/home"), "/app/home");
        assert_eq!(history.strip_base("/app/dashboard/home"), "/dashboard/home");
        assert_eq!(history.strip_base("/app"), "/");
        assert_eq!(history.strip_base("/application"), "/application");

        let root = BrowserHistory::new("/");
        assert_eq!(root.to_url("/home"), "/home");
        assert_eq!(root.strip_base("/home"), "/home");
    }
}
