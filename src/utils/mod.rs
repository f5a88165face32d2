// Utilidades compartidas

pub mod constants;
pub mod cookies;
pub mod i18n;
pub mod storage;

pub use constants::*;
pub use cookies::{CookieSource, DocumentCookies, StaticCookies};
pub use i18n::{Catalog, I18nError, LocaleResolver};
pub use storage::{KeyValueStorage, LocalStorage, MemoryStorage};
