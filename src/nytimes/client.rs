//! Client bundle handed to fetch strategies

use tracing::info;

use super::executor::RequestExecutor;
use super::transport::ReqwestTransport;
use crate::common::errors::Result;
use crate::common::traits::SharedTransport;
use crate::config::types::{ApiCredentials, AppConfig};

/// Everything a strategy needs to run: the executor, the API base URL and
/// the credential that goes into each request
#[derive(Debug, Clone)]
pub struct MostPopularClient {
    executor: RequestExecutor,
    base_url: String,
    credentials: ApiCredentials,
}

impl MostPopularClient {
    /// Create a client over an arbitrary transport
    pub fn new(transport: SharedTransport, base_url: &str, credentials: ApiCredentials) -> Self {
        Self {
            executor: RequestExecutor::new(transport),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Create a client backed by reqwest from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let credentials = ApiCredentials::from_config(&config.nytimes)?;
        let transport = ReqwestTransport::with_timeout(config.settings.request_timeout())?;
        info!("Using Most Popular API at {}", config.nytimes.base_url);

        Ok(Self {
            executor: RequestExecutor::from_transport(transport),
            base_url: config.nytimes.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }
}
