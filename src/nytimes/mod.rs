//! NYT Most Popular API - request description, execution and transport

pub mod client;
pub mod executor;
pub mod messages;
pub mod request;
pub mod transport;

pub use client::MostPopularClient;
pub use executor::RequestExecutor;
pub use messages::ArticlesResponse;
pub use request::RequestDescriptor;
pub use transport::ReqwestTransport;
