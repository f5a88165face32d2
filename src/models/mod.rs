pub mod preferences;
pub mod route;

pub use preferences::{Locale, Theme};
pub use route::{Route, RouteRecord};
