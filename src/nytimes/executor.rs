//! Generic request execution and response classification

use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

use super::request::RequestDescriptor;
use crate::common::errors::RequestError;
use crate::common::traits::{ResponseShape, SharedTransport, Transport};
use crate::common::types::HttpRequest;

/// Turns a [`RequestDescriptor`] into a decoded response shape
///
/// Exactly one transport call per `execute`; no retries, no caching.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: SharedTransport,
}

impl RequestExecutor {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// Convenience constructor taking ownership of a concrete transport
    pub fn from_transport<T: Transport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport))
    }

    /// Build the transport-level request: absolute URL with encoded query
    /// parameters, method and headers
    pub fn build_request(descriptor: &RequestDescriptor) -> Result<HttpRequest, RequestError> {
        let joined = descriptor.joined_url();
        let mut url = Url::parse(&joined)
            .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", joined, e)))?;

        if !descriptor.query.is_empty() {
            // Sorted so the same descriptor always yields the same URL
            let mut params: Vec<_> = descriptor.query.iter().collect();
            params.sort();
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(HttpRequest {
            method: descriptor.method,
            url,
            headers: descriptor.headers.clone().unwrap_or_default(),
        })
    }

    /// Execute the descriptor and decode the body into `R`
    #[instrument(
        skip(self, descriptor),
        fields(method = %descriptor.method, path = %descriptor.path)
    )]
    pub async fn execute<R: ResponseShape>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<R, RequestError> {
        let request = Self::build_request(descriptor)?;
        debug!(
            "Sending request to {}{}",
            request.url.origin().ascii_serialization(),
            request.url.path()
        );

        let response = self.transport.send(request).await.map_err(|failure| {
            warn!(error = %failure, "Transport failure");
            RequestError::from(failure)
        })?;

        if !response.is_success() {
            warn!(status = response.status, "Non-success status");
            return Err(RequestError::Http {
                status: response.status,
            });
        }

        serde_json::from_slice::<R>(&response.body).map_err(|e| {
            warn!(error = %e, "Response did not match expected shape");
            RequestError::Decoding(e.to_string())
        })
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}
