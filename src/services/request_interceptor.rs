// ============================================================================
// REQUEST INTERCEPTOR - Inyección del token bearer
// ============================================================================

use crate::services::api_client::{ApiError, RequestAugmenter, RequestConfig};
use crate::services::session_probe::SessionProbe;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Agrega `Authorization: Bearer <token>` si hay token en las cookies.
/// Sin token la request sale igual; los errores previos vuelven tal cual.
#[derive(Clone)]
pub struct AuthHeaderInjector {
    probe: SessionProbe,
}

impl AuthHeaderInjector {
    pub fn new(probe: SessionProbe) -> Self {
        Self { probe }
    }
}

impl RequestAugmenter for AuthHeaderInjector {
    fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, ApiError> {
        if let Some(token) = self.probe.read_token() {
            config.set_header(AUTHORIZATION_HEADER, &format!("Bearer {}", token));
        }
        Ok(config)
    }

    fn on_error(&self, error: ApiError) -> ApiError {
        log::debug!("[HTTP] Error previo de request sin cambios: {}", error);
        error
    }
}
