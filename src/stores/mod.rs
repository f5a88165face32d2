pub mod locale_store;
pub mod preference_store;
pub mod theme_store;

pub use locale_store::LocaleStore;
pub use preference_store::PreferenceStore;
pub use theme_store::ThemeStore;
