// ============================================================================
// CONFIG - Configuración global, fijada en tiempo de compilación
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dirección base para toda ruta relativa de la API
    pub api_host: String,
    /// Enviar cookies con las requests (`credentials: include`)
    pub with_credentials: bool,
    /// Prefijo bajo el que se sirve la app, usado por history
    pub base_path: String,
    pub environment: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: "http://localhost:3000".to_string(),
            with_credentials: true,
            base_path: "/".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Cargar configuración desde variables de entorno de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_HOST"),
            option_env!("WITH_CREDENTIALS"),
            option_env!("BASE_PATH"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
        )
    }

    fn from_values(
        api_host: Option<&str>,
        with_credentials: Option<&str>,
        base_path: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_host: api_host
                .map(str::to_string)
                .unwrap_or(defaults.api_host),
            with_credentials: with_credentials
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.with_credentials),
            base_path: base_path
                .map(str::to_string)
                .unwrap_or(defaults.base_path),
            environment: environment
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel para el logger al arrancar
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}
