//! Transport-independent description of one HTTP call

use std::collections::{BTreeMap, HashMap};

use crate::common::types::HttpMethod;

/// Immutable description of a single HTTP request
///
/// Fully determined by its fields. Built right before execution and
/// discarded once the call completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Scheme, host and any fixed path prefix
    pub base_url: String,
    /// Path appended to the base, starting with '/'
    pub path: String,
    pub method: HttpMethod,
    /// Query parameters; order is irrelevant
    pub query: HashMap<String, String>,
    pub headers: Option<BTreeMap<String, String>>,
}

impl RequestDescriptor {
    /// Create a GET descriptor with no query parameters or headers
    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method: HttpMethod::Get,
            query: HashMap::new(),
            headers: None,
        }
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a query parameter, replacing any previous value for the key
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Base and path joined with exactly one '/' between them
    pub fn joined_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}
