// ============================================================================
// SPA BOOTSTRAP - Capa de arranque del cliente (Rust + WASM)
// ============================================================================
// - Stores: preferencias de idioma/tema persistidas en localStorage
// - Services: sesión por cookie, guard de navegación + router, cliente HTTP
// - Utils: backends de storage/cookies, catálogos i18n
// - State: valores compartidos con Rc<RefCell> + subscribers
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::app::App;
use crate::config::AppConfig;
use crate::models::{Locale, Theme};
use crate::services::ApiClient;

// Instancia única de la app, dueña el hilo de UI
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    log::info!("🚀 Iniciando SPA bootstrap ({})", config.environment);

    let app = App::browser(config).map_err(to_js_error)?;

    reflect_theme(app.theme().theme());
    reflect_locale(app.locale().locale());
    app.theme().subscribe(|theme| reflect_theme(*theme));
    app.locale().subscribe(|locale| reflect_locale(*locale));

    app.sync_location()
        .map_err(to_js_error)?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    // Atrás/adelante: volver a pasar el guard sobre la nueva ubicación.
    // Se registra una sola vez al arrancar, forget() no acumula closures.
    if let Some(window) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            with_app(|app| {
                if let Err(e) = app.sync_location() {
                    log::error!("❌ [ROUTER] Error navegando en popstate: {}", e);
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    APP.with(|cell| match cell.borrow().as_ref() {
        Some(app) => Some(f(app)),
        None => {
            log::warn!("⚠️ App no inicializada");
            None
        }
    })
}

fn not_ready() -> JsValue {
    JsValue::from_str("App no inicializada")
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn reflect_theme(theme: Theme) {
    set_root_attribute("data-theme", theme.as_str());
}

fn reflect_locale(locale: Locale) {
    set_root_attribute("lang", locale.code());
}

fn set_root_attribute(name: &str, value: &str) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    if let Some(root) = root {
        if root.set_attribute(name, value).is_err() {
            log::warn!("⚠️ No se pudo establecer <html {}>", name);
        }
    }
}

/// Navegación desde JavaScript; retorna la ubicación confirmada
#[wasm_bindgen]
pub fn navigate(path: &str) -> Result<String, JsValue> {
    with_app(|app| {
        app.router()
            .push(path)
            .map(|outcome| outcome.resolved.full_path())
            .map_err(to_js_error)
    })
    .unwrap_or_else(|| Err(not_ready()))
}

/// Alternar tema; retorna `"light"` o `"dark"`
#[wasm_bindgen]
pub fn toggle_theme() -> Result<String, JsValue> {
    with_app(|app| app.theme().toggle_theme().as_str().to_string()).ok_or_else(not_ready)
}

#[wasm_bindgen]
pub fn set_locale(code: &str) -> Result<(), JsValue> {
    let locale = Locale::from_code(code)
        .ok_or_else(|| JsValue::from_str(&format!("Idioma no soportado '{}'", code)))?;
    with_app(|app| app.i18n().set_locale(locale)).ok_or_else(not_ready)
}

#[wasm_bindgen]
pub fn translate(key: &str) -> Result<String, JsValue> {
    with_app(|app| app.i18n().t(key)).ok_or_else(not_ready)
}

// ============================================================================
// HTTP desde JavaScript - Promise resuelta con el JSON de la respuesta
// ============================================================================

fn api_client() -> Result<ApiClient, JsValue> {
    with_app(|app| app.api().clone()).ok_or_else(not_ready)
}

fn to_js_json(value: &serde_json::Value) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(&value.to_string())
}

/// GET autenticado; la Promise rechaza con el mensaje de `ApiError`
#[wasm_bindgen]
pub fn api_get(path: String) -> Result<js_sys::Promise, JsValue> {
    let api = api_client()?;
    Ok(wasm_bindgen_futures::future_to_promise(async move {
        let value: serde_json::Value = api.get_json(&path).await.map_err(to_js_error)?;
        to_js_json(&value)
    }))
}

#[wasm_bindgen]
pub fn api_post(path: String, body: JsValue) -> Result<js_sys::Promise, JsValue> {
    let api = api_client()?;
    let raw: String = js_sys::JSON::stringify(&body)?.into();
    let body: serde_json::Value = serde_json::from_str(&raw).map_err(to_js_error)?;
    Ok(wasm_bindgen_futures::future_to_promise(async move {
        let value: serde_json::Value = api.post_json(&path, &body).await.map_err(to_js_error)?;
        to_js_json(&value)
    }))
}
