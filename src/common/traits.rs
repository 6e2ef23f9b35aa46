//! Trait definitions at the networking seam

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::errors::TransportFailure;
use super::types::{HttpRequest, HttpResponse};

/// Trait for the underlying network transport
///
/// The only operation the request layer needs from the networking stack.
/// Implementations are shared between concurrent fetches and must accept
/// several in-flight calls at once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and return the status code and raw body
    ///
    /// A non-success status is NOT a failure at this level; only errors that
    /// prevented a response from arriving are reported as `TransportFailure`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// Shared transport handle for dynamic dispatch
pub type SharedTransport = Arc<dyn Transport>;

/// One entry of a shape's wire mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// JSON key as sent by the server
    pub wire: &'static str,
    /// Rust field the key is decoded into
    pub field: &'static str,
    /// Decoding fails when the key is missing
    pub required: bool,
}

impl FieldMapping {
    pub const fn required(wire: &'static str, field: &'static str) -> Self {
        Self {
            wire,
            field,
            required: true,
        }
    }

    pub const fn optional(wire: &'static str, field: &'static str) -> Self {
        Self {
            wire,
            field,
            required: false,
        }
    }
}

/// A response body shape the executor can decode into
///
/// Every decodable shape declares its wire keys explicitly. Keys not listed
/// here are ignored when decoding.
pub trait ResponseShape: DeserializeOwned + Send + 'static {
    /// Wire key to field mapping, one entry per decoded field
    const FIELDS: &'static [FieldMapping];

    /// Look up the wire key that feeds a given field
    fn wire_key(field: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|mapping| mapping.field == field)
            .map(|mapping| mapping.wire)
    }
}
