// ============================================================================
// COOKIES - Lectura del header de cookies (document.cookie o fijo)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

/// Vista de solo lectura de las cookies como un único header
pub trait CookieSource {
    fn cookie_header(&self) -> String;
}

/// `document.cookie` con prefijo `"; "`, así la primera cookie lleva
/// separador igual que las demás.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookies;

impl CookieSource for DocumentCookies {
    fn cookie_header(&self) -> String {
        let raw = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
            .and_then(|document| document.cookie().ok())
            .unwrap_or_default();
        format!("; {}", raw)
    }
}

/// Header fijo, reemplazable en runtime. Para tests y hosts sin navegador.
#[derive(Clone, Debug, Default)]
pub struct StaticCookies {
    header: Rc<RefCell<String>>,
}

impl StaticCookies {
    pub fn new(header: &str) -> Self {
        Self {
            header: Rc::new(RefCell::new(header.to_string())),
        }
    }

    pub fn replace(&self, header: &str) {
        *self.header.borrow_mut() = header.to_string();
    }
}

impl CookieSource for StaticCookies {
    fn cookie_header(&self) -> String {
        self.header.borrow().clone()
    }
}
