// ============================================================================
// NAVIGATION GUARD - Política de redirect por transición
// ============================================================================
// Es una comodidad de UI, no una barrera de seguridad. El token nunca se
// valida aquí: lo que esté detrás del guard lo sigue protegiendo la API.
// ============================================================================

use crate::models::route::{path_segments, Route};
use crate::services::session_probe::SessionProbe;
use crate::utils::constants::{DASHBOARD_HOME_PATH, LOGIN_PATH};

/// Resultado de la política para un intento de navegación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

/// Decide, de forma síncrona y antes de confirmar, si la transición sigue
/// o se manda a otro lado
pub trait NavigationPolicy {
    fn decide(&self, to: &Route, from: &Route) -> Decision;
}

/// Más de un segmento no vacío separado por `/`
pub fn is_multi_level(path: &str) -> bool {
    path_segments(path).nth(1).is_some()
}

/// Gana la primera regla:
/// 1. con token y destino `/login` → `/dashboard/home`
/// 2. destino multinivel sin token → `/login`
/// 3. si no, permitir
///
/// Rutas de un segmento como `/dashboard` pasan sin token.
pub fn decide(has_token: bool, target_path: &str) -> Decision {
    if has_token && target_path == LOGIN_PATH {
        return Decision::Redirect(DASHBOARD_HOME_PATH.to_string());
    }
    if !has_token && is_multi_level(target_path) {
        return Decision::Redirect(LOGIN_PATH.to_string());
    }
    Decision::Allow
}

#[derive(Clone)]
pub struct AuthGuard {
    probe: SessionProbe,
}

impl AuthGuard {
    pub fn new(probe: SessionProbe) -> Self {
        Self { probe }
    }
}

impl NavigationPolicy for AuthGuard {
    fn decide(&self, to: &Route, from: &Route) -> Decision {
        let has_token = self.probe.has_token();
        let decision = decide(has_token, &to.path);
        match decision {
            Decision::Allow => {
                log::debug!("[GUARD] {} -> {} permitido", from.path, to.path);
            }
            Decision::Redirect(ref next) => {
                log::info!(
                    "🔐 [GUARD] {} -> {} redirigido a {} (token: {})",
                    from.path,
                    to.path,
                    next,
                    if has_token { "presente" } else { "ausente" }
                );
            }
        }
        decision
    }
}
