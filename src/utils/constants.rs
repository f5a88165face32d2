/// Claves de storage
pub const LOCALE_KEY: &str = "locale";
pub const THEME_KEY: &str = "theme";

/// Cookie con el token bearer
pub const TOKEN_COOKIE: &str = "token";

pub const LOGIN_PATH: &str = "/login";
/// Destino de un usuario ya logueado en vez del login
pub const DASHBOARD_HOME_PATH: &str = "/dashboard/home";
pub const HOME_PATH: &str = "/home";
pub const ROOT_PATH: &str = "/";

/// Páginas de la app; el alias raíz lo agrega la tabla de rutas
pub const PAGES: &[&str] = &[
    "/home",
    "/login",
    "/dashboard",
    "/dashboard/home",
    "/dashboard/settings",
    "/dashboard/settings/profile",
];
