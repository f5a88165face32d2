// ============================================================================
// API CLIENT - Solo HTTP, con cadena de augmenters previa al envío
// ============================================================================
// Cada request se describe con `RequestConfig`, pasa por todos los
// `RequestAugmenter` registrados en orden y luego va a gloo-net. Sin
// reintentos: los fallos vuelven tal cual al llamador.
// ============================================================================

use std::rc::Rc;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use web_sys::RequestCredentials;
use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Interceptor error: {0}")]
    Interceptor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Request saliente antes del envío
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    headers: Vec<(String, String)>,
    pub with_credentials: bool,
    pub body: Option<String>,
}

impl RequestConfig {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            with_credentials: false,
            body: None,
        }
    }

    /// Nombres de header sin distinguir mayúsculas; set reemplaza
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    fn into_request(self) -> Result<Request, ApiError> {
        let mut builder = match self.method {
            Method::Get => Request::get(&self.url),
            Method::Post => Request::post(&self.url),
            Method::Put => Request::put(&self.url),
            Method::Patch => Request::patch(&self.url),
            Method::Delete => Request::delete(&self.url),
        };
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if self.with_credentials {
            builder = builder.credentials(RequestCredentials::Include);
        }
        finish(builder, self.body)
    }
}

fn finish(builder: RequestBuilder, body: Option<String>) -> Result<Request, ApiError> {
    let request = match body {
        Some(body) => builder.body(body),
        None => builder.build(),
    };
    request.map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Hook previo que corre sobre cada request antes de enviarla.
///
/// `on_error` se llama en vez de `on_request` cuando una etapa anterior ya
/// falló; por defecto el error sigue intacto.
pub trait RequestAugmenter {
    fn on_request(&self, config: RequestConfig) -> Result<RequestConfig, ApiError>;

    fn on_error(&self, error: ApiError) -> ApiError {
        error
    }
}

/// Unir ruta relativa a la dirección base; URLs absolutas pasan tal cual
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    with_credentials: bool,
    augmenters: Vec<Rc<dyn RequestAugmenter>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_host.clone(),
            with_credentials: config.with_credentials,
            augmenters: Vec::new(),
        }
    }

    pub fn with_augmenter(mut self, augmenter: impl RequestAugmenter + 'static) -> Self {
        self.augmenters.push(Rc::new(augmenter));
        self
    }

    /// Request base: URL completa y flag de credenciales configurado
    pub fn request(&self, method: Method, path: &str) -> RequestConfig {
        let mut config = RequestConfig::new(method, &join_url(&self.base_url, path));
        config.with_credentials = self.with_credentials;
        config
    }

    /// Request con body JSON; un fallo de serialización entra a la cadena
    /// como error
    pub fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestConfig, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut config = self.request(method, path);
        config.set_header("Content-Type", "application/json");
        config.body = Some(json);
        Ok(config)
    }

    /// Correr la cadena de augmenters en orden de registro
    pub fn prepare(&self, request: Result<RequestConfig, ApiError>) -> Result<RequestConfig, ApiError> {
        self.augmenters
            .iter()
            .fold(request, |state, augmenter| match state {
                Ok(config) => augmenter.on_request(config),
                Err(error) => Err(augmenter.on_error(error)),
            })
    }

    /// Preparar y enviar; status fuera de 2xx → `ApiError::Http`
    pub async fn send(&self, request: Result<RequestConfig, ApiError>) -> Result<Response, ApiError> {
        let config = self.prepare(request)?;
        let method = config.method;
        let url = config.url.clone();
        log::debug!("[HTTP] {} {}", method.as_str(), url);

        let response = config
            .into_request()?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("⚠️ [HTTP] {} {} -> {}", method.as_str(), url, status);
            return Err(ApiError::Http { status, body });
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Ok(self.request(Method::Get, path))).await?;
        parse_json(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(self.json_request(Method::Post, path, body)).await?;
        parse_json(response).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(self.json_request(Method::Put, path, body)).await?;
        parse_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Ok(self.request(Method::Delete, path))).await?;
        Ok(())
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Tag(&'static str);

    impl RequestAugmenter for Tag {
        fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, ApiError> {
            let trail = config.header("X-Trail").unwrap_or("").to_string();
            config.set_header("X-Trail", &format!("{}{}", trail, self.0));
            Ok(config)
        }
    }

    struct Reject;

    impl RequestAugmenter for Reject {
        fn on_request(&self, _config: RequestConfig) -> Result<RequestConfig, ApiError> {
            Err(ApiError::Interceptor("rejected".into()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<ApiError>>,
    }

    impl RequestAugmenter for Rc<Recorder> {
        fn on_request(&self, config: RequestConfig) -> Result<RequestConfig, ApiError> {
            Ok(config)
        }

        fn on_error(&self, error: ApiError) -> ApiError {
            self.seen.borrow_mut().push(error.clone());
            error
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            api_host: "https://api.example.com/".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://api.example.com/", "/users"), "https://api.example.com/users");
        assert_eq!(join_url("https://api.example.com/v1", "users"), "https://api.example.com/v1/users");
        assert_eq!(join_url("https://api.example.com", "https://cdn.example.com/x"), "https://cdn.example.com/x");
        assert_eq!(join_url("", "/users"), "/users");
    }

    #[test]
    fn test_request_uses_base_and_credentials_flag() {
        let client = ApiClient::new(&config());
        let request = client.request(Method::Get, "/me");
        assert_eq!(request.url, "https://api.example.com/me");
        assert!(request.with_credentials);
        assert!(request.headers().is_empty());

        let client = ApiClient::new(&AppConfig { with_credentials: false, ..config() });
        assert!(!client.request(Method::Get, "/me").with_credentials);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut request = RequestConfig::new(Method::Get, "/x");
        request.set_header("content-type", "text/plain");
        request.set_header("Content-Type", "application/json");
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_chain_runs_in_order() {
        let client = ApiClient::new(&config())
            .with_augmenter(Tag("a"))
            .with_augmenter(Tag("b"));
        let prepared = client.prepare(Ok(client.request(Method::Get, "/x"))).unwrap();
        assert_eq!(prepared.header("X-Trail"), Some("ab"));
    }

    #[test]
    fn test_error_skips_later_on_request_and_reaches_on_error() {
        let recorder = Rc::new(Recorder::default());
        let client = ApiClient::new(&config())
            .with_augmenter(Reject)
            .with_augmenter(recorder.clone())
            .with_augmenter(Tag("never"));
        let result = client.prepare(Ok(client.request(Method::Get, "/x")));
        assert_eq!(result, Err(ApiError::Interceptor("rejected".into())));
        assert_eq!(*recorder.seen.borrow(), vec![ApiError::Interceptor("rejected".into())]);
    }

    #[test]
    fn test_json_request_sets_body_and_content_type() {
        let client = ApiClient::new(&config());
        let request = client
            .json_request(Method::Post, "/items", &serde_json::json!({ "name": "a" }))
            .unwrap();
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"a"}"#));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.method.as_str(), "POST");
    }

    #[test]
    fn test_unserializable_body_is_an_error() {
        use std::collections::HashMap;
        let client = ApiClient::new(&config());
        let mut body = HashMap::new();
        body.insert(vec![1u8], "non-string keys are rejected");
        assert!(matches!(
            client.json_request(Method::Post, "/items", &body),
            Err(ApiError::Serialization(_))
        ));
    }
}
