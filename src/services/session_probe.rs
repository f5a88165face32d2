// ============================================================================
// SESSION PROBE - Lee el token bearer de las cookies
// ============================================================================
// Solo lectura: aquí no se emiten ni validan credenciales. Un token no vacío
// cuenta como "logueado" solo para la UI; el backend decide si es válido.
// ============================================================================

use std::rc::Rc;
use crate::utils::constants::TOKEN_COOKIE;
use crate::utils::cookies::CookieSource;

/// Extrae el valor de la cookie `token` de un header crudo.
///
/// El header se parte en `"; token="` y debe haber exactamente un corte:
/// sin corte (incluido un header que empieza con `token=` sin separador) o
/// con cortes duplicados → `None`. El valor llega hasta el siguiente `;`.
/// Un valor vacío cuenta como ausente.
pub fn parse_token(cookie_header: &str) -> Option<String> {
    let boundary = format!("; {}=", TOKEN_COOKIE);
    let mut parts = cookie_header.split(boundary.as_str());

    let _before = parts.next();
    let after = parts.next()?;
    if parts.next().is_some() {
        log::debug!("[SESSION] Header de cookies ambiguo: más de un token");
        return None;
    }

    after
        .split(';')
        .next()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct SessionProbe {
    cookies: Rc<dyn CookieSource>,
}

impl SessionProbe {
    pub fn new(cookies: Rc<dyn CookieSource>) -> Self {
        Self { cookies }
    }

    /// Relee las cookies en cada llamada
    pub fn read_token(&self) -> Option<String> {
        parse_token(&self.cookies.cookie_header())
    }

    pub fn has_token(&self) -> bool {
        self.read_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cookies::StaticCookies;

    #[test]
    fn test_leading_token_without_separator_is_absent() {
        assert_eq!(parse_token("token=abc"), None);
    }

    #[test]
    fn test_token_between_other_cookies() {
        assert_eq!(
            parse_token("session=x; token=abc123; other=y").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_token_at_end_of_header() {
        assert_eq!(parse_token("; token=abc").as_deref(), Some("abc"));
        assert_eq!(parse_token("a=1; token=t.o.k=en").as_deref(), Some("t.o.k=en"));
    }

    #[test]
    fn test_no_boundary_is_absent() {
        assert_eq!(parse_token(""), None);
        assert_eq!(parse_token("session=x; other=y"), None);
        assert_eq!(parse_token("session=x;token=abc"), None);
        assert_eq!(parse_token("a=1; xtoken=abc"), None);
    }

    #[test]
    fn test_duplicate_boundaries_are_absent() {
        assert_eq!(parse_token("a=1; token=first; token=second"), None);
        assert_eq!(parse_token("; token=; token=x"), None);
    }

    #[test]
    fn test_empty_value_is_absent() {
        assert_eq!(parse_token("a=1; token=; b=2"), None);
        assert_eq!(parse_token("a=1; token="), None);
    }

    #[test]
    fn test_value_stops_at_next_semicolon_without_space() {
        assert_eq!(parse_token("a=1; token=abc;b=2").as_deref(), Some("abc"));
    }

    #[test]
    fn test_probe_follows_cookie_changes() {
        let cookies = StaticCookies::new("a=1");
        let probe = SessionProbe::new(Rc::new(cookies.clone()));
        assert!(!probe.has_token());

        cookies.replace("; token=fresh");
        assert_eq!(probe.read_token().as_deref(), Some("fresh"));
    }
}
