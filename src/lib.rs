//! Most Popular Library
//!
//! A Rust client for the New York Times Most Popular API: transport-agnostic
//! request descriptors, a generic executor, per-category fetch strategies
//! and a single-owner reactive state container.

pub mod common;
pub mod config;
pub mod nytimes;
pub mod state;
pub mod strategy;

// Re-export commonly used types
pub use common::errors::{ClientError, FetchError, RequestError, Result, TransportFailure};
pub use common::traits::{FieldMapping, ResponseShape, SharedTransport, Transport};
pub use common::types::{
    Article, Category, HttpMethod, HttpRequest, HttpResponse, ShareChannel, TimeWindow,
};
pub use config::types::{ApiCredentials, AppConfig};
pub use nytimes::{
    ArticlesResponse, MostPopularClient, RequestDescriptor, RequestExecutor, ReqwestTransport,
};
pub use state::{ArticlesSnapshot, ArticlesState, ArticlesStore};
pub use strategy::FetchStrategy;
