use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ubicación pedida al router, separada en partes.
/// Las políticas solo miran `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl Route {
    pub fn parse(target: &str) -> Self {
        let (rest, hash) = match target.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (target, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self { path, query, hash }
    }

    /// Path + query + hash, como va en la barra de direcciones
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if let Some(ref query) = self.query {
            full.push('?');
            full.push_str(query);
        }
        if let Some(ref hash) = self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }

    /// Segmentos no vacíos separados por `/`
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        path_segments(&self.path)
    }
}

pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Entrada de la tabla de rutas. Segmentos `:name` capturan params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    /// Alias estático, aplicado al resolver la tabla
    pub redirect: Option<String>,
}

impl RouteRecord {
    pub fn page(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            redirect: None,
        }
    }

    pub fn named(path: &str, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::page(path)
        }
    }

    pub fn alias(path: &str, redirect: &str) -> Self {
        Self {
            redirect: Some(redirect.to_string()),
            ..Self::page(path)
        }
    }

    /// Params capturados si `path` coincide con este record
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let pattern: Vec<&str> = path_segments(&self.path).collect();
        let actual: Vec<&str> = path_segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (expected, got) in pattern.iter().zip(actual.iter()) {
            match expected.strip_prefix(':') {
                Some(param) => {
                    params.insert(param.to_string(), got.to_string());
                }
                None if expected == got => {}
                None => return None,
            }
        }
        Some(params)
    }
}
